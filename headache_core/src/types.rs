//! Core domain types for the Headache Diary.
//!
//! This module defines the fundamental types used throughout the system:
//! - Medication records and the catalog that holds them
//! - The sheet configuration snapshot supplied by the UI
//! - Derived day descriptors and medication views
//! - The render-ready document model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Number of leading days covered by the titration (night-only) rule
pub const TITRATION_DAYS: usize = 3;

// ============================================================================
// Medication Types
// ============================================================================

/// Physical shape of a tablet or capsule, used for identification
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PillShape {
    Round,
    Oblong,
    Capsule,
    Apple,
}

impl PillShape {
    pub fn label(&self) -> &'static str {
        match self {
            PillShape::Round => "round",
            PillShape::Oblong => "oblong",
            PillShape::Capsule => "capsule",
            PillShape::Apple => "apple",
        }
    }
}

/// Swatch colour of a medication: fill plus optional outline
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PillColor {
    pub fill: String,
    #[serde(default)]
    pub outline: Option<String>,
}

impl PillColor {
    pub fn solid(fill: &str) -> Self {
        Self {
            fill: fill.into(),
            outline: None,
        }
    }

    pub fn outlined(fill: &str, outline: &str) -> Self {
        Self {
            fill: fill.into(),
            outline: Some(outline.into()),
        }
    }

    /// Human-readable form, e.g. "white, blue outline"
    pub fn label(&self) -> String {
        match &self.outline {
            Some(outline) => format!("{}, {} outline", self.fill, outline),
            None => self.fill.clone(),
        }
    }
}

/// A medication catalog entry (immutable, externally supplied)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MedicationRecord {
    pub id: String,
    pub name: String,
    pub shape: PillShape,
    pub color: PillColor,
    pub description: String,
    #[serde(default)]
    pub warning: Option<String>,
    /// Whether the first-three-days night-use rule applies
    #[serde(default)]
    pub allow_titration: bool,
}

/// Which side of the sheet a medication is recorded on
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MedicationCategory {
    /// As-needed pain relief, recorded as doses per day
    Acute,
    /// Daily prophylaxis, recorded as taken / not taken
    Preventive,
}

/// The medication reference catalog
///
/// Both lists are ordered; that order is the canonical order of rows on the
/// sheet.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct MedicationCatalog {
    #[serde(default)]
    pub acute: Vec<MedicationRecord>,
    #[serde(default)]
    pub preventive: Vec<MedicationRecord>,
}

impl MedicationCatalog {
    pub fn records(&self, category: MedicationCategory) -> &[MedicationRecord] {
        match category {
            MedicationCategory::Acute => &self.acute,
            MedicationCategory::Preventive => &self.preventive,
        }
    }

    pub fn find(&self, category: MedicationCategory, id: &str) -> Option<&MedicationRecord> {
        self.records(category).iter().find(|m| m.id == id)
    }
}

// ============================================================================
// Sheet Configuration
// ============================================================================

/// Snapshot of the user's sheet settings
///
/// Selections are sets: the order in which medications were picked never
/// affects the generated sheet.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SheetConfig {
    pub start_date: NaiveDate,
    pub day_count: u32,
    pub selected_acute_ids: BTreeSet<String>,
    pub selected_preventive_ids: BTreeSet<String>,
    pub titration_enabled: bool,
}

impl SheetConfig {
    /// Initial settings shown to a new user: two weeks, panadol and imigran
    /// as acute medications, topamax as preventive, titration marks on
    pub fn default_for(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            day_count: 14,
            selected_acute_ids: ["panadol", "imigran"].iter().map(|s| s.to_string()).collect(),
            selected_preventive_ids: ["topamax"].iter().map(|s| s.to_string()).collect(),
            titration_enabled: true,
        }
    }

    /// Flip an acute medication in or out of the selection
    ///
    /// Returns true if the medication is selected afterwards.
    pub fn toggle_acute(&mut self, id: &str) -> bool {
        toggle(&mut self.selected_acute_ids, id)
    }

    /// Flip a preventive medication in or out of the selection
    ///
    /// Returns true if the medication is selected afterwards.
    pub fn toggle_preventive(&mut self, id: &str) -> bool {
        toggle(&mut self.selected_preventive_ids, id)
    }

    pub fn selected(&self, category: MedicationCategory) -> &BTreeSet<String> {
        match category {
            MedicationCategory::Acute => &self.selected_acute_ids,
            MedicationCategory::Preventive => &self.selected_preventive_ids,
        }
    }
}

fn toggle(set: &mut BTreeSet<String>, id: &str) -> bool {
    if set.remove(id) {
        false
    } else {
        set.insert(id.to_string());
        true
    }
}

// ============================================================================
// Derived Types
// ============================================================================

/// One generated day column
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayDescriptor {
    /// 1-based position in the sheet
    pub day_index: u32,
    pub date: NaiveDate,
    /// "month/day" without zero padding, e.g. "2/1"
    pub short_label: String,
}

/// A selected medication resolved against the catalog
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActiveMedicationView {
    pub record: MedicationRecord,
    pub category: MedicationCategory,
    /// One flag per day; true marks a night-only (titration) cell
    pub night_only: Vec<bool>,
    /// Row name carries the "first 3 days" badge
    pub titration_badge: bool,
}

impl ActiveMedicationView {
    /// Whether the cell for a 1-based day index is a night-only cell
    pub fn is_night_only(&self, day_index: u32) -> bool {
        day_index
            .checked_sub(1)
            .and_then(|i| self.night_only.get(i as usize))
            .copied()
            .unwrap_or(false)
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }
}

/// A warning shown in the footer warnings panel
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SheetWarning {
    /// Static warning text carried by a selected medication
    Medication {
        medication_id: String,
        medication_name: String,
        text: String,
    },
    /// Generic advisory added when titration marks are in use
    Titration { text: String },
}

impl SheetWarning {
    pub fn text(&self) -> &str {
        match self {
            SheetWarning::Medication { text, .. } => text,
            SheetWarning::Titration { text } => text,
        }
    }
}

// ============================================================================
// Document Model
// ============================================================================

/// Title block at the top of the sheet
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SheetHeader {
    pub title: String,
    /// Blank fields for the patient to fill in (name, chart number, ...)
    pub patient_fields: Vec<String>,
    pub instruction: String,
}

/// Grid section identifiers, in sheet order
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    PainLevel,
    Symptoms,
    Duration,
    AcuteMedication,
    PreventiveMedication,
    Exercise,
}

/// What a grid row records
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RowKind {
    /// Fixed tracking row (pain, symptoms, duration, exercise)
    Tracking,
    /// One resolved medication
    Medication { medication_id: String },
    /// "No medication selected" stand-in for an empty medication block
    Placeholder,
}

/// One day cell of a grid row
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GridCell {
    pub night_only: bool,
}

/// A labelled row with exactly one cell per generated day
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GridRow {
    pub label: String,
    #[serde(default)]
    pub hint: Option<String>,
    pub kind: RowKind,
    pub cells: Vec<GridCell>,
    #[serde(default)]
    pub titration_badge: bool,
}

/// A group of rows under an optional heading
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GridSection {
    pub kind: SectionKind,
    pub title: Option<String>,
    #[serde(default)]
    pub legend: Option<String>,
    pub rows: Vec<GridRow>,
}

/// Identification aid for one active medication
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdentificationEntry {
    pub medication_id: String,
    pub name: String,
    pub shape: PillShape,
    pub color: PillColor,
    pub description: String,
}

/// Right-hand panel: medication identification and notes
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SidePanel {
    pub title: String,
    pub acute_title: String,
    pub acute: Vec<IdentificationEntry>,
    pub preventive_title: String,
    pub preventive: Vec<IdentificationEntry>,
    pub next_appointment_label: String,
    pub reminder: String,
}

/// Bottom notes area
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SheetFooter {
    pub general_notes_title: String,
    pub general_notes: Vec<String>,
    pub warnings_title: String,
}

/// The fully resolved, render-ready sheet
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentModel {
    pub header: SheetHeader,
    pub days: Vec<DayDescriptor>,
    pub acute: Vec<ActiveMedicationView>,
    pub preventive: Vec<ActiveMedicationView>,
    pub sections: Vec<GridSection>,
    pub side_panel: SidePanel,
    pub footer: SheetFooter,
    pub warnings: Vec<SheetWarning>,
    /// Whether the warnings panel is shown at all
    pub has_any_warning: bool,
    pub titration_enabled: bool,
}

impl DocumentModel {
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn section(&self, kind: SectionKind) -> Option<&GridSection> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    pub fn warning_texts(&self) -> Vec<&str> {
        self.warnings.iter().map(|w| w.text()).collect()
    }

    /// All grid rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &GridRow> {
        self.sections.iter().flat_map(|s| s.rows.iter())
    }
}
