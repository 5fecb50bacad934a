//! Medication resolution, titration marking and warning aggregation.
//!
//! Rules:
//! - Selected ids are matched against the catalog; rows follow catalog order
//! - Preventive medications that allow titration get night-only marks on the
//!   first three days when titration is enabled
//! - Warnings: each selected preventive medication's own warning, then one
//!   generic titration advisory if any titration medication is selected

use crate::{
    ActiveMedicationView, MedicationCategory, MedicationRecord, SheetWarning, TITRATION_DAYS,
};
use std::collections::BTreeSet;

/// Generic advisory appended when titration marks appear on the sheet
pub const TITRATION_ADVISORY: &str = "Titration medications: for the first three days take \
     them at bedtime only, to reduce dizziness and drowsiness.";

/// Output of medication resolution
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub acute: Vec<ActiveMedicationView>,
    pub preventive: Vec<ActiveMedicationView>,
    pub warnings: Vec<SheetWarning>,
    /// Warnings panel visibility: any warning, or titration switched on
    pub has_any_warning: bool,
}

/// Resolve selected medications against the catalog
///
/// Unknown ids are skipped, never reported as errors.
pub fn resolve(
    catalog_acute: &[MedicationRecord],
    catalog_preventive: &[MedicationRecord],
    selected_acute_ids: &BTreeSet<String>,
    selected_preventive_ids: &BTreeSet<String>,
    titration_enabled: bool,
    day_count: u32,
) -> Resolution {
    let day_count = day_count as usize;

    let acute: Vec<_> = select(catalog_acute, selected_acute_ids, MedicationCategory::Acute)
        .map(|record| ActiveMedicationView {
            record: record.clone(),
            category: MedicationCategory::Acute,
            night_only: vec![false; day_count],
            titration_badge: false,
        })
        .collect();

    let preventive: Vec<_> = select(
        catalog_preventive,
        selected_preventive_ids,
        MedicationCategory::Preventive,
    )
    .map(|record| {
        let titrating = titration_enabled && record.allow_titration;
        ActiveMedicationView {
            record: record.clone(),
            category: MedicationCategory::Preventive,
            night_only: (0..day_count)
                .map(|i| titrating && i < TITRATION_DAYS)
                .collect(),
            titration_badge: titrating,
        }
    })
    .collect();

    let mut warnings: Vec<SheetWarning> = preventive
        .iter()
        .filter_map(|view| {
            view.record
                .warning
                .as_ref()
                .map(|text| SheetWarning::Medication {
                    medication_id: view.record.id.clone(),
                    medication_name: view.record.name.clone(),
                    text: text.clone(),
                })
        })
        .collect();

    if titration_enabled && preventive.iter().any(|v| v.record.allow_titration) {
        warnings.push(SheetWarning::Titration {
            text: TITRATION_ADVISORY.into(),
        });
    }

    let has_any_warning = !warnings.is_empty() || titration_enabled;

    tracing::debug!(
        "Resolved {} acute, {} preventive, {} warnings",
        acute.len(),
        preventive.len(),
        warnings.len()
    );

    Resolution {
        acute,
        preventive,
        warnings,
        has_any_warning,
    }
}

/// Catalog entries whose id is selected, in catalog order
fn select<'a>(
    catalog: &'a [MedicationRecord],
    selected: &'a BTreeSet<String>,
    category: MedicationCategory,
) -> impl Iterator<Item = &'a MedicationRecord> {
    for id in selected {
        if !catalog.iter().any(|m| &m.id == id) {
            tracing::debug!("Ignoring unknown {:?} medication '{}'", category, id);
        }
    }

    catalog.iter().filter(move |m| selected.contains(&m.id))
}
