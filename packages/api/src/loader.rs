//! # DashboardLoader — drives the backend calls behind the dashboard
//!
//! The loader sequences [`Gateway`] calls and feeds each result into the
//! [`Dashboard`] through a [`DashboardHandle`]:
//!
//! 1. vaccines, then users (only if vaccines succeeded), then the first user's detail;
//! 2. a detail load issues the user fetch and the records fetch together on the
//!    current task and applies each one as soon as it settles;
//! 3. create calls append to the snapshot and reload detail where needed.
//!
//! Everything runs on one task at a time. Completions interleave but never
//! overlap, so the handle only needs interior mutability, not locking.
//!
//! A detail load whose future is dropped before both fetches settle still
//! takes the dashboard out of the loading state.

use std::cell::RefCell;
use std::rc::Rc;

use records::{NewUser, NewVaccinationRecord, NewVaccine, User, UserId, VaccinationRecord, Vaccine};

use crate::dashboard::Dashboard;
use crate::gateway::Gateway;

/// Shared, single-writer access to a [`Dashboard`].
///
/// The UI implements this over a Dioxus signal; tests use `Rc<RefCell<_>>`.
pub trait DashboardHandle: Clone {
    fn read<R>(&self, f: impl FnOnce(&Dashboard) -> R) -> R;
    fn update<R>(&mut self, f: impl FnOnce(&mut Dashboard) -> R) -> R;

    /// Like [`DashboardHandle::update`], but `None` when the dashboard is gone.
    fn try_update<R>(&mut self, f: impl FnOnce(&mut Dashboard) -> R) -> Option<R> {
        Some(self.update(f))
    }
}

/// Settles a detail load that is dropped mid-flight.
struct DetailGuard<H: DashboardHandle> {
    state: H,
    generation: u64,
    settled: bool,
}

impl<H: DashboardHandle> Drop for DetailGuard<H> {
    fn drop(&mut self) {
        if !self.settled {
            let generation = self.generation;
            self.state.try_update(|d| d.detail_abandoned(generation));
        }
    }
}

impl DashboardHandle for Rc<RefCell<Dashboard>> {
    fn read<R>(&self, f: impl FnOnce(&Dashboard) -> R) -> R {
        f(&self.borrow())
    }

    fn update<R>(&mut self, f: impl FnOnce(&mut Dashboard) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}

#[derive(Clone, Debug)]
pub struct DashboardLoader<G, H> {
    gateway: G,
    state: H,
}

impl<G: Gateway, H: DashboardHandle> DashboardLoader<G, H> {
    pub fn new(gateway: G, state: H) -> Self {
        Self { gateway, state }
    }

    pub fn state(&self) -> &H {
        &self.state
    }

    /// Vaccines, then users, then the first user's detail.
    pub async fn load_initial(&self) {
        let mut state = self.state.clone();
        state.update(Dashboard::begin_initial_load);

        let vaccines = self.gateway.list_vaccines().await;
        if !state.update(|d| d.vaccines_loaded(vaccines)) {
            return;
        }

        let users = self.gateway.list_users().await;
        if let Some(first) = state.update(|d| d.users_loaded(users)) {
            self.select_user(first).await;
        }
    }

    /// Switch the selection and load that user's profile and records.
    pub async fn select_user(&self, user_id: UserId) {
        let generation = self.state.clone().update(|d| d.begin_detail(user_id));
        tracing::info!("Loading detail for user {user_id} (generation {generation})");
        let mut guard = DetailGuard {
            state: self.state.clone(),
            generation,
            settled: false,
        };

        let profile = async {
            let result = self.gateway.get_user(user_id).await;
            self.state
                .clone()
                .update(|d| d.user_loaded(generation, result));
        };
        let records = async {
            let result = self.gateway.list_records(user_id).await;
            self.state
                .clone()
                .update(|d| d.records_loaded(generation, result));
        };
        futures::future::join(profile, records).await;
        guard.settled = true;
    }

    /// Reload the selected user's detail, if any.
    pub async fn refresh(&self) {
        if let Some(user_id) = self.state.read(Dashboard::selected_user_id) {
            self.select_user(user_id).await;
        }
    }

    pub async fn create_user(&self, user: NewUser) -> Option<User> {
        let result = self.gateway.create_user(&user).await;
        let created = result.as_ref().ok().cloned();
        if let Some(select) = self.state.clone().update(|d| d.user_created(result)) {
            self.select_user(select).await;
        }
        created
    }

    pub async fn create_vaccine(&self, vaccine: NewVaccine) -> Option<Vaccine> {
        let result = self.gateway.create_vaccine(&vaccine).await;
        let created = result.as_ref().ok().cloned();
        self.state.clone().update(|d| d.vaccine_created(result));
        created
    }

    /// Create a record for the selected user and reload their detail.
    pub async fn create_record(&self, record: NewVaccinationRecord) -> Option<VaccinationRecord> {
        let mut state = self.state.clone();
        let Some(user_id) = state.read(Dashboard::selected_user_id) else {
            state.update(Dashboard::record_without_user);
            return None;
        };

        let result = self.gateway.create_record(user_id, &record).await;
        let created = result.as_ref().ok().cloned();
        if let Some(reload) = state.update(|d| d.record_created(user_id, result)) {
            // only reload if the operator has not moved on meanwhile
            if state.read(Dashboard::selected_user_id) == Some(reload) {
                self.select_user(reload).await;
            }
        }
        created
    }
}
