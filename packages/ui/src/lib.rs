//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

mod gateway;
pub use gateway::{load_config, make_gateway, use_config, use_gateway};

mod dashboard;
pub use dashboard::{
    use_dashboard, use_dashboard_commands, Created, DashboardCommand, DashboardProvider,
    SignalDashboard, UiLoader,
};

mod locale;
pub use locale::viewer_locale;

pub mod views;

pub const MAIN_CSS: Asset = asset!("/assets/vaxbook.css");

mod navbar;
pub use navbar::Navbar;

mod user_picker;
pub use user_picker::UserPicker;

mod dose_grid;
pub use dose_grid::DoseGrid;

mod new_user_form;
pub use new_user_form::{build_new_user, NewUserForm};

mod new_vaccine_form;
pub use new_vaccine_form::NewVaccineForm;

mod new_record_form;
pub use new_record_form::{build_new_record, NewRecordForm};

pub mod activity_log;
pub use activity_log::{use_activity_log, ActivityLog, LogEntry};

mod activity_log_panel;
pub use activity_log_panel::{ActivityLogPanel, ActivityLogToggle};
