pub mod config;
pub mod grid;
pub mod labels;
pub mod models;

pub use config::VaxbookConfig;
pub use grid::{record_for, vaccine_columns, GridRow, VaccineGrid};
pub use labels::{dose_label, format_date, locale_from_tag, Locale};
pub use models::{
    NewUser, NewVaccinationRecord, NewVaccine, RecordId, User, UserId, VaccinationRecord, Vaccine,
    VaccineId,
};
