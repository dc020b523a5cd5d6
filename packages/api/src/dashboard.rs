//! # Dashboard — the snapshot behind the vaccination page
//!
//! [`Dashboard`] owns the in-memory copy of users, the vaccine catalog and the
//! selected user's detail. It is only ever changed through its transition
//! methods, which the [`crate::DashboardLoader`] calls as each backend call
//! settles. Readers get borrowed views ([`Dashboard::grid`], accessors).
//!
//! ## Phases
//!
//! ```text
//! Idle → LoadingVaccines → LoadingUsers → Error            (no users / failure)
//!                                       → LoadingUserDetail → Ready
//! Ready → LoadingUserDetail                                 (user switch)
//! ```
//!
//! ## Detail generations
//!
//! Every detail load bumps a generation counter. The user and records fetches
//! of one load carry its generation, and a completion whose generation is not
//! the current one is dropped. Switching users therefore never lets a slow
//! response for the previous user overwrite the new one.
//!
//! ## Loading and errors
//!
//! [`Dashboard::loading`] is derived from the phase, which leaves
//! `LoadingUserDetail` once both detail fetches have settled or the load was
//! abandoned. Failures set one message; the last failure wins.
//!
//! ## Notices
//!
//! Each transition also queues [`Notice`]s for the operator: one per failure,
//! even when the same message repeats, plus load progress and created
//! entities. The UI drains them with [`Dashboard::take_notices`].

use records::grid::{vaccine_columns, VaccineGrid, DEFAULT_DOSE_LEVELS};
use records::{dose_label, User, UserId, VaccinationRecord, Vaccine, VaxbookConfig};

use crate::TransportError;

pub const FAILED_VACCINES: &str = "Failed to load vaccines.";
pub const FAILED_USERS: &str = "Failed to load users.";
pub const FAILED_USER: &str = "Failed to load user.";
pub const FAILED_RECORDS: &str = "Failed to load vaccination records.";
pub const NO_USERS: &str = "No users found.";
pub const FAILED_CREATE_USER: &str = "Failed to create user.";
pub const FAILED_CREATE_VACCINE: &str = "Failed to create vaccine.";
pub const FAILED_CREATE_RECORD: &str = "Failed to create vaccination record.";
pub const NO_USER_SELECTED: &str = "Select a user before adding a vaccination record.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadPhase {
    #[default]
    Idle,
    LoadingVaccines,
    LoadingUsers,
    LoadingUserDetail,
    Ready,
    Error,
}

impl LoadPhase {
    pub fn is_loading(self) -> bool {
        matches!(
            self,
            LoadPhase::LoadingVaccines | LoadPhase::LoadingUsers | LoadPhase::LoadingUserDetail
        )
    }
}

/// Progress of one fetch within a detail load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FetchStatus {
    #[default]
    Idle,
    Pending,
    Done,
    Failed,
}

impl FetchStatus {
    fn settled(self) -> bool {
        matches!(self, FetchStatus::Done | FetchStatus::Failed)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// Something the operator should see in the activity log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Dashboard {
    users: Vec<User>,
    vaccines: Vec<Vaccine>,
    selected_user_id: Option<UserId>,
    user: Option<User>,
    records: Vec<VaccinationRecord>,
    vaccine_columns: Vec<Vaccine>,
    dose_levels: Vec<i32>,
    phase: LoadPhase,
    error_message: Option<String>,
    generation: u64,
    user_status: FetchStatus,
    records_status: FetchStatus,
    notices: Vec<Notice>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(DEFAULT_DOSE_LEVELS.to_vec())
    }
}

impl Dashboard {
    pub fn new(dose_levels: Vec<i32>) -> Self {
        Self {
            users: Vec::new(),
            vaccines: Vec::new(),
            selected_user_id: None,
            user: None,
            records: Vec::new(),
            vaccine_columns: Vec::new(),
            dose_levels,
            phase: LoadPhase::Idle,
            error_message: None,
            generation: 0,
            user_status: FetchStatus::Idle,
            records_status: FetchStatus::Idle,
            notices: Vec::new(),
        }
    }

    pub fn from_config(config: &VaxbookConfig) -> Self {
        Self::new(config.grid.dose_levels.clone())
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn vaccines(&self) -> &[Vaccine] {
        &self.vaccines
    }

    pub fn selected_user_id(&self) -> Option<UserId> {
        self.selected_user_id
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn records(&self) -> &[VaccinationRecord] {
        &self.records
    }

    pub fn vaccine_columns(&self) -> &[Vaccine] {
        &self.vaccine_columns
    }

    pub fn dose_levels(&self) -> &[i32] {
        &self.dose_levels
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn loading(&self) -> bool {
        self.phase.is_loading()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn user_status(&self) -> FetchStatus {
        self.user_status
    }

    pub fn records_status(&self) -> FetchStatus {
        self.records_status
    }

    /// Notices queued since the last [`Dashboard::take_notices`].
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Dose grid over the current records and columns.
    pub fn grid(&self) -> VaccineGrid<'_> {
        VaccineGrid::new(&self.vaccine_columns, &self.records, &self.dose_levels)
    }

    fn notify(&mut self, severity: Severity, message: impl Into<String>) {
        self.notices.push(Notice {
            severity,
            message: message.into(),
        });
    }

    fn fail(&mut self, message: &str, err: &TransportError) {
        tracing::error!("{message} ({err})");
        self.error_message = Some(message.to_string());
        self.notify(Severity::Error, message);
    }

    pub fn begin_initial_load(&mut self) {
        self.phase = LoadPhase::LoadingVaccines;
    }

    /// Returns whether the initial load should go on to fetch users.
    pub fn vaccines_loaded(&mut self, result: Result<Vec<Vaccine>, TransportError>) -> bool {
        match result {
            Ok(vaccines) => {
                tracing::info!("Loaded {} vaccines", vaccines.len());
                self.notify(Severity::Info, format!("Loaded {} vaccines", vaccines.len()));
                self.vaccines = vaccines;
                self.phase = LoadPhase::LoadingUsers;
                true
            }
            Err(e) => {
                self.fail(FAILED_VACCINES, &e);
                self.phase = LoadPhase::Error;
                false
            }
        }
    }

    /// Returns the user whose detail should be loaded next, if any.
    pub fn users_loaded(&mut self, result: Result<Vec<User>, TransportError>) -> Option<UserId> {
        match result {
            Ok(users) => {
                tracing::info!("Loaded {} users", users.len());
                self.notify(Severity::Info, format!("Loaded {} users", users.len()));
                self.users = users;
                let first = self.users.first().map(|u| u.id);
                if first.is_none() {
                    self.error_message = Some(NO_USERS.to_string());
                    self.notify(Severity::Warning, NO_USERS);
                    self.phase = LoadPhase::Error;
                }
                first
            }
            Err(e) => {
                self.fail(FAILED_USERS, &e);
                self.phase = LoadPhase::Error;
                None
            }
        }
    }

    /// Select `user_id`, clear its detail and start a new generation.
    pub fn begin_detail(&mut self, user_id: UserId) -> u64 {
        self.generation += 1;
        self.selected_user_id = Some(user_id);
        self.user = None;
        self.records.clear();
        self.vaccine_columns.clear();
        self.error_message = None;
        self.user_status = FetchStatus::Pending;
        self.records_status = FetchStatus::Pending;
        self.phase = LoadPhase::LoadingUserDetail;
        self.notify(Severity::Info, format!("Loading user #{user_id}"));
        self.generation
    }

    /// The detail load of `generation` stopped before both fetches settled.
    /// Whatever already arrived is kept and the page leaves the loading state.
    pub fn detail_abandoned(&mut self, generation: u64) {
        if generation != self.generation || self.phase != LoadPhase::LoadingUserDetail {
            return;
        }
        for status in [&mut self.user_status, &mut self.records_status] {
            if *status == FetchStatus::Pending {
                *status = FetchStatus::Idle;
            }
        }
        self.phase = LoadPhase::Ready;
        tracing::warn!("Detail load {generation} abandoned before it settled");
        if let Some(user_id) = self.selected_user_id {
            self.notify(
                Severity::Warning,
                format!("Stopped loading user #{user_id}; refresh to retry"),
            );
        }
    }

    fn is_stale(&self, generation: u64, what: &str) -> bool {
        let stale = generation != self.generation;
        if stale {
            tracing::debug!(
                "Discarding stale {what} response (generation {generation}, current {})",
                self.generation
            );
        }
        stale
    }

    fn settle_detail(&mut self) {
        if self.user_status.settled() && self.records_status.settled() {
            self.phase = LoadPhase::Ready;
        }
    }

    /// Apply the user fetch of a detail load. Returns false if it was stale.
    pub fn user_loaded(&mut self, generation: u64, result: Result<User, TransportError>) -> bool {
        if self.is_stale(generation, "user") {
            return false;
        }
        match result {
            Ok(user) => {
                self.user = Some(user);
                self.user_status = FetchStatus::Done;
            }
            Err(e) => {
                self.fail(FAILED_USER, &e);
                self.user_status = FetchStatus::Failed;
            }
        }
        self.settle_detail();
        true
    }

    /// Apply the records fetch of a detail load. Returns false if it was stale.
    pub fn records_loaded(
        &mut self,
        generation: u64,
        result: Result<Vec<VaccinationRecord>, TransportError>,
    ) -> bool {
        if self.is_stale(generation, "records") {
            return false;
        }
        match result {
            Ok(records) => {
                self.vaccine_columns = vaccine_columns(&records, &self.vaccines);
                self.records = records;
                self.records_status = FetchStatus::Done;
            }
            Err(e) => {
                self.fail(FAILED_RECORDS, &e);
                self.records_status = FetchStatus::Failed;
            }
        }
        self.settle_detail();
        true
    }

    /// Returns the user to load if the new user should become the selection.
    pub fn user_created(&mut self, result: Result<User, TransportError>) -> Option<UserId> {
        match result {
            Ok(user) => {
                let id = user.id;
                self.notify(
                    Severity::Success,
                    format!("Created user {}", user.display_name()),
                );
                self.users.push(user);
                if self.selected_user_id.is_none() {
                    if self.error_message.as_deref() == Some(NO_USERS) {
                        self.error_message = None;
                    }
                    Some(id)
                } else {
                    None
                }
            }
            Err(e) => {
                self.fail(FAILED_CREATE_USER, &e);
                None
            }
        }
    }

    pub fn vaccine_created(&mut self, result: Result<Vaccine, TransportError>) -> bool {
        match result {
            Ok(vaccine) => {
                self.notify(Severity::Success, format!("Created vaccine {}", vaccine.name));
                self.vaccines.push(vaccine);
                // records may already reference the new vaccine
                self.vaccine_columns = vaccine_columns(&self.records, &self.vaccines);
                true
            }
            Err(e) => {
                self.fail(FAILED_CREATE_VACCINE, &e);
                false
            }
        }
    }

    /// Returns the user whose detail should be reloaded.
    pub fn record_created(
        &mut self,
        user_id: UserId,
        result: Result<VaccinationRecord, TransportError>,
    ) -> Option<UserId> {
        match result {
            Ok(record) => {
                self.notify(
                    Severity::Success,
                    format!(
                        "Saved {} for user #{user_id}",
                        dose_label(record.dose_number)
                    ),
                );
                Some(user_id)
            }
            Err(e) => {
                self.fail(FAILED_CREATE_RECORD, &e);
                None
            }
        }
    }

    pub fn record_without_user(&mut self) {
        tracing::warn!("Vaccination record submitted with no user selected");
        self.error_message = Some(NO_USER_SELECTED.to_string());
        self.notify(Severity::Warning, NO_USER_SELECTED);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server_error() -> TransportError {
        TransportError::Status {
            status: 500,
            body: "boom".to_string(),
        }
    }

    fn user(id: UserId, name: &str) -> User {
        User {
            id,
            name: name.to_string(),
            age: None,
            gender: None,
            vaccination_records: vec![],
        }
    }

    fn record(id: i64, user_id: UserId, vaccine_id: i64, dose: i32) -> VaccinationRecord {
        VaccinationRecord {
            id,
            user_id,
            vaccine_id,
            dose_number: dose,
            application_date: "2023-05-01".to_string(),
            note: None,
        }
    }

    #[test]
    fn test_initial_phases() {
        let mut dash = Dashboard::default();
        assert_eq!(dash.phase(), LoadPhase::Idle);
        assert!(!dash.loading());

        dash.begin_initial_load();
        assert!(dash.loading());
        assert!(dash.vaccines_loaded(Ok(vec![Vaccine { id: 1, name: "BCG".into() }])));
        assert_eq!(dash.phase(), LoadPhase::LoadingUsers);

        let first = dash.users_loaded(Ok(vec![user(7, "Ana"), user(8, "Bia")]));
        assert_eq!(first, Some(7));
    }

    #[test]
    fn test_no_users() {
        let mut dash = Dashboard::default();
        dash.begin_initial_load();
        dash.vaccines_loaded(Ok(vec![]));
        assert_eq!(dash.users_loaded(Ok(vec![])), None);
        assert_eq!(dash.error_message(), Some(NO_USERS));
        assert_eq!(dash.phase(), LoadPhase::Error);
        assert!(!dash.loading());
    }

    #[test]
    fn test_detail_waits_for_both_fetches() {
        let mut dash = Dashboard::default();
        dash.vaccines_loaded(Ok(vec![Vaccine { id: 1, name: "BCG".into() }]));
        let generation = dash.begin_detail(7);

        assert!(dash.records_loaded(generation, Ok(vec![record(1, 7, 1, 1)])));
        assert!(dash.loading());
        assert_eq!(dash.vaccine_columns().len(), 1);

        assert!(dash.user_loaded(generation, Err(server_error())));
        assert!(!dash.loading());
        assert_eq!(dash.phase(), LoadPhase::Ready);
        assert_eq!(dash.error_message(), Some(FAILED_USER));
        // records survive the user failure
        assert_eq!(dash.records().len(), 1);
    }

    #[test]
    fn test_stale_generation_is_dropped() {
        let mut dash = Dashboard::default();
        let first = dash.begin_detail(1);
        let second = dash.begin_detail(2);
        assert_eq!(dash.generation(), second);
        assert!(second > first);

        assert!(!dash.records_loaded(first, Ok(vec![record(1, 1, 1, 1)])));
        assert!(!dash.user_loaded(first, Ok(user(1, "Ana"))));
        assert!(dash.records().is_empty());
        assert!(dash.user().is_none());

        assert!(dash.user_loaded(second, Ok(user(2, "Bia"))));
        assert_eq!(dash.user().map(|u| u.id), Some(2));
        assert_eq!(dash.selected_user_id(), Some(2));
    }

    #[test]
    fn test_last_error_wins() {
        let mut dash = Dashboard::default();
        let generation = dash.begin_detail(1);
        dash.user_loaded(generation, Err(server_error()));
        dash.records_loaded(generation, Err(server_error()));
        assert_eq!(dash.error_message(), Some(FAILED_RECORDS));

        // a new detail load clears the message
        dash.begin_detail(1);
        assert_eq!(dash.error_message(), None);
    }

    #[test]
    fn test_created_user_becomes_selection_when_none() {
        let mut dash = Dashboard::default();
        dash.users_loaded(Ok(vec![]));
        assert_eq!(dash.user_created(Ok(user(3, "Caio"))), Some(3));
        assert_eq!(dash.error_message(), None);
        assert_eq!(dash.users().len(), 1);

        dash.begin_detail(3);
        assert_eq!(dash.user_created(Ok(user(4, "Dani"))), None);
        assert_eq!(dash.users().len(), 2);
    }

    #[test]
    fn test_repeated_failures_each_queue_a_notice() {
        let mut dash = Dashboard::default();
        dash.user_created(Err(server_error()));
        dash.user_created(Err(server_error()));

        let notices = dash.take_notices();
        let errors: Vec<_> = notices
            .iter()
            .filter(|n| n.severity == Severity::Error)
            .map(|n| n.message.as_str())
            .collect();
        assert_eq!(errors, [FAILED_CREATE_USER, FAILED_CREATE_USER]);
        assert!(dash.notices().is_empty());
        assert_eq!(dash.error_message(), Some(FAILED_CREATE_USER));
    }

    #[test]
    fn test_progress_and_warnings_are_noticed() {
        let mut dash = Dashboard::default();
        dash.begin_initial_load();
        dash.vaccines_loaded(Ok(vec![Vaccine { id: 1, name: "BCG".into() }]));
        dash.users_loaded(Ok(vec![]));
        dash.record_without_user();

        let notices = dash.take_notices();
        assert_eq!(
            notices,
            [
                Notice {
                    severity: Severity::Info,
                    message: "Loaded 1 vaccines".to_string(),
                },
                Notice {
                    severity: Severity::Info,
                    message: "Loaded 0 users".to_string(),
                },
                Notice {
                    severity: Severity::Warning,
                    message: NO_USERS.to_string(),
                },
                Notice {
                    severity: Severity::Warning,
                    message: NO_USER_SELECTED.to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_vaccine_created_reveals_existing_records() {
        let mut dash = Dashboard::default();
        dash.vaccines_loaded(Ok(vec![Vaccine { id: 1, name: "BCG".into() }]));
        let generation = dash.begin_detail(7);
        dash.user_loaded(generation, Ok(user(7, "Ana")));
        // record 2 points at a vaccine the catalog does not know yet
        dash.records_loaded(generation, Ok(vec![record(1, 7, 1, 1), record(2, 7, 9, 1)]));
        assert_eq!(dash.vaccine_columns().len(), 1);

        assert!(dash.vaccine_created(Ok(Vaccine { id: 9, name: "HPV".into() })));
        let names: Vec<_> = dash.vaccine_columns().iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["BCG", "HPV"]);
        assert_eq!(dash.grid().cell(9, 1).map(|r| r.id), Some(2));
    }

    #[test]
    fn test_abandoned_detail_leaves_loading() {
        let mut dash = Dashboard::default();
        let generation = dash.begin_detail(7);
        assert_eq!(dash.user_status(), FetchStatus::Pending);
        assert_eq!(dash.records_status(), FetchStatus::Pending);

        dash.user_loaded(generation, Ok(user(7, "Ana")));
        dash.detail_abandoned(generation);

        assert!(!dash.loading());
        assert_eq!(dash.phase(), LoadPhase::Ready);
        assert_eq!(dash.user_status(), FetchStatus::Done);
        assert_eq!(dash.records_status(), FetchStatus::Idle);
        assert_eq!(dash.user().map(|u| u.id), Some(7));
        assert_eq!(
            dash.notices().last().map(|n| n.severity),
            Some(Severity::Warning)
        );
    }

    #[test]
    fn test_abandoning_an_old_generation_is_ignored() {
        let mut dash = Dashboard::default();
        let first = dash.begin_detail(1);
        dash.begin_detail(2);
        dash.detail_abandoned(first);

        assert!(dash.loading());
        assert_eq!(dash.records_status(), FetchStatus::Pending);
    }
}
