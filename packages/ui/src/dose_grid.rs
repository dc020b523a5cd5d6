use dioxus::prelude::*;
use records::{format_date, VaccinationRecord, Vaccine, VaccineGrid};

use crate::locale::viewer_locale;

/// Vaccine columns × dose rows for the selected user.
#[component]
pub fn DoseGrid(
    columns: Vec<Vaccine>,
    records: Vec<VaccinationRecord>,
    dose_levels: Vec<i32>,
) -> Element {
    let grid = VaccineGrid::new(&columns, &records, &dose_levels);

    if grid.is_empty() {
        return rsx! {
            p { class: "loading", "No vaccination records for this user." }
        };
    }

    let rows = grid.rows();

    rsx! {
        table {
            class: "dose-grid",
            thead {
                tr {
                    th { "Dose" }
                    for vaccine in columns.iter() {
                        th { key: "{vaccine.id}", "{vaccine.name}" }
                    }
                }
            }
            tbody {
                for row in rows {
                    tr {
                        key: "{row.dose}",
                        th { "{row.label}" }
                        for (vaccine, cell) in columns.iter().zip(row.cells.iter()) {
                            GridCell { key: "{vaccine.id}", record: cell.cloned() }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn GridCell(record: Option<VaccinationRecord>) -> Element {
    match record {
        Some(record) => {
            let date = format_date(&record.application_date, viewer_locale());
            let note = record.note.unwrap_or_default();
            rsx! {
                td {
                    class: "dose-cell filled",
                    title: "{note}",
                    "{date}"
                }
            }
        }
        None => rsx! {
            td { class: "dose-cell empty", "-" }
        },
    }
}
