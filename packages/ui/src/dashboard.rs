//! Dashboard context and hooks for the UI.
//!
//! [`DashboardProvider`] owns the dashboard signal and runs every loader call
//! in its own scope. Views send [`DashboardCommand`]s instead of spawning
//! loader work themselves, so navigating away from a view never cancels a
//! load or a create halfway.

use api::{Dashboard, DashboardHandle, DashboardLoader, HttpGateway};
use dioxus::prelude::*;
use futures::channel::oneshot;
use futures::StreamExt;
use records::{NewUser, NewVaccinationRecord, NewVaccine, UserId};

use crate::activity_log::{use_activity_log, ActivityLog};
use crate::gateway::{use_config, use_gateway};

/// [`DashboardHandle`] over the context signals. The loader writes straight
/// into reactive state and every notice it queues lands in the activity log.
#[derive(Clone, Copy)]
pub struct SignalDashboard {
    dashboard: Signal<Dashboard>,
    log: Signal<ActivityLog>,
}

impl SignalDashboard {
    pub fn new(dashboard: Signal<Dashboard>, log: Signal<ActivityLog>) -> Self {
        Self { dashboard, log }
    }
}

impl DashboardHandle for SignalDashboard {
    fn read<R>(&self, f: impl FnOnce(&Dashboard) -> R) -> R {
        f(&self.dashboard.peek())
    }

    fn update<R>(&mut self, f: impl FnOnce(&mut Dashboard) -> R) -> R {
        let (result, notices) = {
            let mut dashboard = self.dashboard.write();
            let result = f(&mut *dashboard);
            (result, dashboard.take_notices())
        };
        if !notices.is_empty() {
            let mut log = self.log.write();
            for notice in notices {
                log.record(notice);
            }
        }
        result
    }

    fn try_update<R>(&mut self, f: impl FnOnce(&mut Dashboard) -> R) -> Option<R> {
        let (result, notices) = {
            let mut dashboard = self.dashboard.try_write().ok()?;
            let result = f(&mut *dashboard);
            (result, dashboard.take_notices())
        };
        if !notices.is_empty() {
            if let Ok(mut log) = self.log.try_write() {
                for notice in notices {
                    log.record(notice);
                }
            }
        }
        Some(result)
    }
}

pub type UiLoader = DashboardLoader<HttpGateway, SignalDashboard>;

/// Resolves `true` once the entity was created.
pub type Created = oneshot::Sender<bool>;

/// Loader work requested by views.
pub enum DashboardCommand {
    Select(UserId),
    Refresh,
    CreateUser(NewUser, Created),
    CreateVaccine(NewVaccine, Created),
    CreateRecord(NewVaccinationRecord, Created),
}

async fn run_command(loader: UiLoader, command: DashboardCommand) {
    match command {
        DashboardCommand::Select(user_id) => loader.select_user(user_id).await,
        DashboardCommand::Refresh => loader.refresh().await,
        DashboardCommand::CreateUser(user, done) => {
            let _ = done.send(loader.create_user(user).await.is_some());
        }
        DashboardCommand::CreateVaccine(vaccine, done) => {
            let _ = done.send(loader.create_vaccine(vaccine).await.is_some());
        }
        DashboardCommand::CreateRecord(record, done) => {
            let _ = done.send(loader.create_record(record).await.is_some());
        }
    }
}

/// Get the dashboard state. Updates whenever a load step settles.
pub fn use_dashboard() -> Signal<Dashboard> {
    use_context::<Signal<Dashboard>>()
}

/// Channel into the provider's loader.
pub fn use_dashboard_commands() -> Coroutine<DashboardCommand> {
    use_coroutine_handle::<DashboardCommand>()
}

/// Provider component that owns the dashboard and runs the loader.
/// Needs `VaxbookConfig`, `HttpGateway` and `Signal<ActivityLog>` in context.
#[component]
pub fn DashboardProvider(children: Element) -> Element {
    let config = use_config();
    let gateway = use_gateway();
    let log = use_activity_log();
    let dashboard = use_context_provider(|| Signal::new(Dashboard::from_config(&config)));
    let loader = DashboardLoader::new(gateway, SignalDashboard::new(dashboard, log));

    // Vaccines → users → first user's detail, once on mount
    let _ = use_resource({
        let loader = loader.clone();
        move || {
            let loader = loader.clone();
            async move { loader.load_initial().await }
        }
    });

    // Each command gets its own task so a slow load never blocks a switch
    use_coroutine(move |mut commands: UnboundedReceiver<DashboardCommand>| {
        let loader = loader.clone();
        async move {
            while let Some(command) = commands.next().await {
                spawn(run_command(loader.clone(), command));
            }
        }
    });

    rsx! {
        {children}
    }
}
