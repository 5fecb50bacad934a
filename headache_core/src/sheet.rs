//! Sheet model assembly.
//!
//! `SheetBuilder` combines the day sequence and the resolved medications
//! with the fixed tracking rows into one `DocumentModel`. The catalog is
//! injected at construction so tests can substitute their own.

use crate::{
    annotator, dates, ActiveMedicationView, DayDescriptor, DocumentModel, GridCell, GridRow,
    GridSection, IdentificationEntry, MedicationCatalog, Result, RowKind, SectionKind,
    SheetConfig, SheetFooter, SheetHeader, SidePanel,
};

const TITLE: &str = "Headache Diary & Medication Log";
const PATIENT_FIELDS: [&str; 3] = ["Name", "Chart No.", "Physician"];
const INSTRUCTION: &str =
    "Please fill this in every night before bed and bring it to every visit.";

const PAIN_TITLE: &str = "Pain level (enter 1, 2, 3)";
const PAIN_LEGEND: &str =
    "1: mild (daily routine unaffected) / 2: moderate (hard to focus) / 3: severe (bed rest)";
const PAIN_ROWS: [&str; 3] = ["Morning", "Afternoon", "Evening"];

const SYMPTOMS_TITLE: &str = "Associated symptoms (tick if present)";
const SYMPTOM_ROWS: [(&str, Option<&str>); 3] = [
    ("Nausea / vomiting", None),
    ("Light / noise sensitivity", None),
    ("Visual aura", Some("flashes / zigzags")),
];

const DURATION_TITLE: &str = "Duration";
const DURATION_ROWS: [&str; 2] = ["Longer than 4 hours", "Shorter than 4 hours"];

const ACUTE_TITLE: &str = "Acute pain relief (number of tablets)";
const PREVENTIVE_TITLE: &str = "Preventive medication (tick when taken)";
const PLACEHOLDER_LABEL: &str = "No medication selected";
const EXERCISE_LABEL: &str = "Exercise (minutes)";

const PANEL_TITLE: &str = "Medication identification & notes";
const PANEL_ACUTE_TITLE: &str = "Acute";
const PANEL_PREVENTIVE_TITLE: &str = "Preventive";
const NEXT_APPOINTMENT: &str = "Next appointment:";
const PANEL_REMINDER: &str =
    "Record how severe each headache was and how you responded to medication.";

const GENERAL_NOTES_TITLE: &str = "General advice";
const GENERAL_NOTES: [&str; 3] = [
    "If you need acute pain relief on more than 2 days a week, talk to your physician.",
    "Regular exercise (3 times a week, 30 minutes each) helps reduce migraine.",
    "Avoid relying on painkillers to prevent medication-overuse headache.",
];
const WARNINGS_TITLE: &str = "Medication-specific warnings";

/// Builds render-ready sheets against a fixed catalog
#[derive(Clone, Copy, Debug)]
pub struct SheetBuilder<'a> {
    catalog: &'a MedicationCatalog,
}

impl<'a> SheetBuilder<'a> {
    pub fn new(catalog: &'a MedicationCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a MedicationCatalog {
        self.catalog
    }

    /// Build the document model for one configuration snapshot
    ///
    /// Fails only with `InvalidConfiguration` from the day sequence.
    pub fn build(&self, config: &SheetConfig) -> Result<DocumentModel> {
        let days = dates::generate(config.start_date, config.day_count)?;

        let resolution = annotator::resolve(
            &self.catalog.acute,
            &self.catalog.preventive,
            &config.selected_acute_ids,
            &config.selected_preventive_ids,
            config.titration_enabled,
            config.day_count,
        );

        let sections = build_sections(&days, &resolution.acute, &resolution.preventive);
        let side_panel = build_side_panel(&resolution.acute, &resolution.preventive);

        tracing::info!(
            "Built sheet: {} days from {}, {} acute, {} preventive, {} warnings",
            days.len(),
            config.start_date,
            resolution.acute.len(),
            resolution.preventive.len(),
            resolution.warnings.len()
        );

        Ok(DocumentModel {
            header: SheetHeader {
                title: TITLE.into(),
                patient_fields: PATIENT_FIELDS.iter().map(|f| f.to_string()).collect(),
                instruction: INSTRUCTION.into(),
            },
            days,
            acute: resolution.acute,
            preventive: resolution.preventive,
            sections,
            side_panel,
            footer: SheetFooter {
                general_notes_title: GENERAL_NOTES_TITLE.into(),
                general_notes: GENERAL_NOTES.iter().map(|n| n.to_string()).collect(),
                warnings_title: WARNINGS_TITLE.into(),
            },
            warnings: resolution.warnings,
            has_any_warning: resolution.has_any_warning,
            titration_enabled: config.titration_enabled,
        })
    }
}

fn blank_row(label: &str, hint: Option<&str>, day_count: usize) -> GridRow {
    GridRow {
        label: label.into(),
        hint: hint.map(Into::into),
        kind: RowKind::Tracking,
        cells: vec![GridCell::default(); day_count],
        titration_badge: false,
    }
}

fn medication_rows(views: &[ActiveMedicationView], day_count: usize) -> Vec<GridRow> {
    if views.is_empty() {
        return vec![GridRow {
            kind: RowKind::Placeholder,
            ..blank_row(PLACEHOLDER_LABEL, None, day_count)
        }];
    }

    views
        .iter()
        .map(|view| GridRow {
            label: view.record.name.clone(),
            hint: None,
            kind: RowKind::Medication {
                medication_id: view.record.id.clone(),
            },
            cells: view
                .night_only
                .iter()
                .map(|&night_only| GridCell { night_only })
                .collect(),
            titration_badge: view.titration_badge,
        })
        .collect()
}

fn build_sections(
    days: &[DayDescriptor],
    acute: &[ActiveMedicationView],
    preventive: &[ActiveMedicationView],
) -> Vec<GridSection> {
    let n = days.len();

    vec![
        GridSection {
            kind: SectionKind::PainLevel,
            title: Some(PAIN_TITLE.into()),
            legend: Some(PAIN_LEGEND.into()),
            rows: PAIN_ROWS.iter().map(|l| blank_row(l, None, n)).collect(),
        },
        GridSection {
            kind: SectionKind::Symptoms,
            title: Some(SYMPTOMS_TITLE.into()),
            legend: None,
            rows: SYMPTOM_ROWS
                .iter()
                .map(|(l, hint)| blank_row(l, *hint, n))
                .collect(),
        },
        GridSection {
            kind: SectionKind::Duration,
            title: Some(DURATION_TITLE.into()),
            legend: None,
            rows: DURATION_ROWS.iter().map(|l| blank_row(l, None, n)).collect(),
        },
        GridSection {
            kind: SectionKind::AcuteMedication,
            title: Some(ACUTE_TITLE.into()),
            legend: None,
            rows: medication_rows(acute, n),
        },
        GridSection {
            kind: SectionKind::PreventiveMedication,
            title: Some(PREVENTIVE_TITLE.into()),
            legend: None,
            rows: medication_rows(preventive, n),
        },
        // Exercise is a single bold row without its own heading
        GridSection {
            kind: SectionKind::Exercise,
            title: None,
            legend: None,
            rows: vec![blank_row(EXERCISE_LABEL, None, n)],
        },
    ]
}

fn identification(view: &ActiveMedicationView) -> IdentificationEntry {
    IdentificationEntry {
        medication_id: view.record.id.clone(),
        name: view.record.name.clone(),
        shape: view.record.shape,
        color: view.record.color.clone(),
        description: view.record.description.clone(),
    }
}

fn build_side_panel(
    acute: &[ActiveMedicationView],
    preventive: &[ActiveMedicationView],
) -> SidePanel {
    SidePanel {
        title: PANEL_TITLE.into(),
        acute_title: PANEL_ACUTE_TITLE.into(),
        acute: acute.iter().map(identification).collect(),
        preventive_title: PANEL_PREVENTIVE_TITLE.into(),
        preventive: preventive.iter().map(identification).collect(),
        next_appointment_label: NEXT_APPOINTMENT.into(),
        reminder: PANEL_REMINDER.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_default_catalog, MedicationCategory, SheetWarning};
    use chrono::NaiveDate;

    fn config(acute: &[&str], preventive: &[&str], titration: bool, days: u32) -> SheetConfig {
        SheetConfig {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 30).unwrap(),
            day_count: days,
            selected_acute_ids: acute.iter().map(|s| s.to_string()).collect(),
            selected_preventive_ids: preventive.iter().map(|s| s.to_string()).collect(),
            titration_enabled: titration,
        }
    }

    #[test]
    fn test_every_row_has_day_count_cells() {
        let catalog = build_default_catalog();
        let builder = SheetBuilder::new(&catalog);

        for days in [1, 7, 14, 30, 60] {
            let model = builder
                .build(&config(&["panadol"], &["topamax", "inderal"], true, days))
                .unwrap();
            assert_eq!(model.day_count(), days as usize);
            for row in model.rows() {
                assert_eq!(row.cells.len(), days as usize, "row '{}'", row.label);
            }
        }
    }

    #[test]
    fn test_fixed_tracking_rows_present() {
        let catalog = build_default_catalog();
        let model = SheetBuilder::new(&catalog)
            .build(&config(&[], &[], false, 7))
            .unwrap();

        let kinds: Vec<_> = model.sections.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SectionKind::PainLevel,
                SectionKind::Symptoms,
                SectionKind::Duration,
                SectionKind::AcuteMedication,
                SectionKind::PreventiveMedication,
                SectionKind::Exercise,
            ]
        );

        let tracking = model
            .rows()
            .filter(|r| r.kind == RowKind::Tracking)
            .count();
        assert_eq!(tracking, 9);
        assert!(model
            .rows()
            .filter(|r| r.kind == RowKind::Tracking)
            .all(|r| r.cells.iter().all(|c| !c.night_only)));
    }

    #[test]
    fn test_empty_selection_gets_one_placeholder() {
        let catalog = build_default_catalog();
        let model = SheetBuilder::new(&catalog)
            .build(&config(&[], &["topamax"], true, 14))
            .unwrap();

        assert!(model.acute.is_empty());
        let acute = model.section(SectionKind::AcuteMedication).unwrap();
        assert_eq!(acute.rows.len(), 1);
        assert_eq!(acute.rows[0].kind, RowKind::Placeholder);
        assert_eq!(acute.rows[0].label, PLACEHOLDER_LABEL);
        assert!(model.side_panel.acute.is_empty());
    }

    #[test]
    fn test_medication_rows_follow_views() {
        let catalog = build_default_catalog();
        let model = SheetBuilder::new(&catalog)
            .build(&config(&["imigran", "panadol", "unknown"], &[], true, 7))
            .unwrap();

        let acute = model.section(SectionKind::AcuteMedication).unwrap();
        let ids: Vec<_> = acute
            .rows
            .iter()
            .map(|r| match &r.kind {
                RowKind::Medication { medication_id } => medication_id.as_str(),
                other => panic!("unexpected row kind {:?}", other),
            })
            .collect();
        assert_eq!(ids, vec!["panadol", "imigran"]);

        let panel: Vec<_> = model
            .side_panel
            .acute
            .iter()
            .map(|e| e.medication_id.as_str())
            .collect();
        assert_eq!(panel, vec!["panadol", "imigran"]);
    }

    #[test]
    fn test_titration_cells_in_preventive_block() {
        let catalog = build_default_catalog();
        let model = SheetBuilder::new(&catalog)
            .build(&config(&[], &["topamax", "depakine"], true, 14))
            .unwrap();

        let block = model.section(SectionKind::PreventiveMedication).unwrap();
        let topamax = &block.rows[0];
        let depakine = &block.rows[1];

        let marked: Vec<_> = topamax
            .cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.night_only)
            .map(|(i, _)| i + 1)
            .collect();
        assert_eq!(marked, vec![1, 2, 3]);
        assert!(topamax.titration_badge);

        assert!(depakine.cells.iter().all(|c| !c.night_only));
        assert!(!depakine.titration_badge);
    }

    #[test]
    fn test_warnings_and_panel_flag() {
        let catalog = build_default_catalog();
        let builder = SheetBuilder::new(&catalog);

        let model = builder
            .build(&config(&[], &["topamax", "depakine"], true, 14))
            .unwrap();
        assert_eq!(model.warnings.len(), 3);
        assert!(matches!(model.warnings[2], SheetWarning::Titration { .. }));
        assert!(model.has_any_warning);

        let model = builder.build(&config(&["panadol"], &["inderal"], false, 14)).unwrap();
        assert!(model.warnings.is_empty());
        assert!(!model.has_any_warning);
    }

    #[test]
    fn test_build_is_idempotent() {
        let catalog = build_default_catalog();
        let builder = SheetBuilder::new(&catalog);
        let cfg = config(&["panadol", "imigran"], &["topamax"], true, 14);

        assert_eq!(builder.build(&cfg).unwrap(), builder.build(&cfg).unwrap());
    }

    #[test]
    fn test_zero_days_propagates_error() {
        let catalog = build_default_catalog();
        let result = SheetBuilder::new(&catalog).build(&config(&[], &[], true, 0));
        assert!(matches!(result, Err(crate::Error::InvalidConfiguration(_))));
    }

    #[test]
    fn test_toggle_then_rebuild() {
        crate::logging::init_test();
        let catalog = build_default_catalog();
        let builder = SheetBuilder::new(&catalog);
        let mut cfg = SheetConfig::default_for(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());

        cfg.toggle_preventive("topamax");
        cfg.toggle_preventive("flunarizine");
        let model = builder.build(&cfg).unwrap();

        assert_eq!(model.preventive.len(), 1);
        assert_eq!(model.preventive[0].category, MedicationCategory::Preventive);
        assert_eq!(model.preventive[0].id(), "flunarizine");
        assert_eq!(model.warning_texts(), vec![annotator::TITRATION_ADVISORY]);
    }
}
