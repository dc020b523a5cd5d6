//! # Gateway — typed access to the vaccination REST backend
//!
//! [`Gateway`] has one method per resource/verb pair. Every call is a one-shot
//! future resolving to the typed entity or a [`TransportError`]; there are no
//! retries and no timeouts, a failure is handed back as-is.
//!
//! | Method | HTTP |
//! |--------|------|
//! | [`list_users`](Gateway::list_users) | `GET /api/user` |
//! | [`get_user`](Gateway::get_user) | `GET /api/user/{id}` |
//! | [`create_user`](Gateway::create_user) | `POST /api/user` |
//! | [`list_vaccines`](Gateway::list_vaccines) | `GET /api/vaccine` |
//! | [`create_vaccine`](Gateway::create_vaccine) | `POST /api/vaccine` |
//! | [`list_records`](Gateway::list_records) | `GET /api/users/{userId}/vaccinationrecords` |
//! | [`create_record`](Gateway::create_record) | `POST /api/users/{userId}/vaccinationrecords` |
//!
//! Implementations live in sibling modules ([`crate::http`], [`crate::memory`]).

use std::future::Future;

use records::{
    NewUser, NewVaccinationRecord, NewVaccine, User, UserId, VaccinationRecord, Vaccine,
};

use crate::TransportError;

/// Async interface to the backend.
pub trait Gateway {
    fn list_users(&self) -> impl Future<Output = Result<Vec<User>, TransportError>>;
    fn get_user(&self, id: UserId) -> impl Future<Output = Result<User, TransportError>>;
    fn create_user(&self, user: &NewUser) -> impl Future<Output = Result<User, TransportError>>;
    fn list_vaccines(&self) -> impl Future<Output = Result<Vec<Vaccine>, TransportError>>;
    fn create_vaccine(
        &self,
        vaccine: &NewVaccine,
    ) -> impl Future<Output = Result<Vaccine, TransportError>>;
    fn list_records(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<VaccinationRecord>, TransportError>>;
    fn create_record(
        &self,
        user_id: UserId,
        record: &NewVaccinationRecord,
    ) -> impl Future<Output = Result<VaccinationRecord, TransportError>>;
}

/// Backend paths, relative to the configured base URL.
pub mod paths {
    use records::UserId;

    pub const USERS: &str = "/api/user";
    pub const VACCINES: &str = "/api/vaccine";

    pub fn user(id: UserId) -> String {
        format!("{USERS}/{id}")
    }

    pub fn user_records(user_id: UserId) -> String {
        format!("/api/users/{user_id}/vaccinationrecords")
    }
}
