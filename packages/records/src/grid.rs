//! # Dose grid view model
//!
//! Turns the currently loaded user's records plus the vaccine catalog into the
//! dense vaccine × dose table rendered by the UI.
//!
//! - [`vaccine_columns`] picks the vaccines that appear in the records, in the
//!   order they are first seen in the record list. Identifiers with no catalog
//!   entry are skipped.
//! - [`record_for`] resolves one cell. When several records share the same
//!   `(vaccine, dose)` pair the first one in list order wins.
//! - [`VaccineGrid`] bundles both over borrowed data so the caller keeps sole
//!   ownership of the snapshot.

use std::collections::HashSet;

use crate::labels::dose_label;
use crate::models::{VaccinationRecord, Vaccine, VaccineId};

/// Dose rows shown when no configuration overrides them.
pub const DEFAULT_DOSE_LEVELS: [i32; 5] = [1, 2, 3, 4, 5];

/// Vaccines referenced by `records`, deduplicated, in first-seen order.
pub fn vaccine_columns(records: &[VaccinationRecord], catalog: &[Vaccine]) -> Vec<Vaccine> {
    let mut seen = HashSet::new();
    records
        .iter()
        .map(|r| r.vaccine_id)
        .filter(|id| seen.insert(*id))
        .filter_map(|id| catalog.iter().find(|v| v.id == id).cloned())
        .collect()
}

/// First record matching both `vaccine_id` and `dose`.
pub fn record_for(
    records: &[VaccinationRecord],
    vaccine_id: VaccineId,
    dose: i32,
) -> Option<&VaccinationRecord> {
    records
        .iter()
        .find(|r| r.vaccine_id == vaccine_id && r.dose_number == dose)
}

/// Read-only view over a user's records arranged by vaccine column and dose row.
#[derive(Clone, Copy, Debug)]
pub struct VaccineGrid<'a> {
    columns: &'a [Vaccine],
    records: &'a [VaccinationRecord],
    dose_levels: &'a [i32],
}

/// One dose row: its label and one cell per column.
#[derive(Clone, Debug, PartialEq)]
pub struct GridRow<'a> {
    pub dose: i32,
    pub label: String,
    pub cells: Vec<Option<&'a VaccinationRecord>>,
}

impl<'a> VaccineGrid<'a> {
    pub fn new(
        columns: &'a [Vaccine],
        records: &'a [VaccinationRecord],
        dose_levels: &'a [i32],
    ) -> Self {
        Self {
            columns,
            records,
            dose_levels,
        }
    }

    pub fn columns(&self) -> &'a [Vaccine] {
        self.columns
    }

    pub fn dose_levels(&self) -> &'a [i32] {
        self.dose_levels
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn cell(&self, vaccine_id: VaccineId, dose: i32) -> Option<&'a VaccinationRecord> {
        record_for(self.records, vaccine_id, dose)
    }

    /// Rows in configured dose order, cells in column order.
    pub fn rows(&self) -> Vec<GridRow<'a>> {
        self.dose_levels
            .iter()
            .map(|&dose| GridRow {
                dose,
                label: dose_label(dose),
                cells: self
                    .columns
                    .iter()
                    .map(|v| self.cell(v.id, dose))
                    .collect(),
            })
            .collect()
    }
}
