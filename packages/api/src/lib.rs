//! # API crate — backend access and load orchestration for the vaccination dashboard
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`gateway`] | The [`Gateway`] trait: one async method per backend resource/verb, plus the REST paths |
//! | [`http`] | [`HttpGateway`], the `reqwest` implementation used by the apps |
//! | [`memory`] | [`MemoryGateway`], an in-memory implementation with scripted failures and delays |
//! | [`dashboard`] | [`Dashboard`], the page snapshot and its state transitions |
//! | [`loader`] | [`DashboardLoader`], which sequences gateway calls into a dashboard |
//!
//! Every gateway failure is a [`TransportError`]. The loader never returns it to
//! the UI; it is logged and turned into one of the fixed messages in
//! [`dashboard`].

mod error;
pub use error::TransportError;

pub mod dashboard;
pub mod gateway;
pub mod http;
pub mod loader;
pub mod memory;

pub use dashboard::{Dashboard, FetchStatus, LoadPhase, Notice, Severity};
pub use gateway::Gateway;
pub use http::HttpGateway;
pub use loader::{DashboardHandle, DashboardLoader};
pub use memory::{MemoryGateway, Operation};

pub use records::{
    NewUser, NewVaccinationRecord, NewVaccine, User, UserId, VaccinationRecord, Vaccine,
    VaxbookConfig,
};
