//! Thin renderers over the document model.
//!
//! - `to_text`: fixed-width preview for the terminal
//! - `write_csv`: the grid for spreadsheet printing
//!
//! Neither renderer makes decisions of its own; everything they show comes
//! from the `DocumentModel`.

use crate::{DocumentModel, GridRow, IdentificationEntry, Result, SheetWarning};
use std::io;

/// Cell text for night-only (titration) cells
pub const NIGHT_MARK: &str = "night";
/// Badge appended to titrating medication names
pub const TITRATION_BADGE: &str = "[first 3 days: adjust]";

const ITEM_HEADING: &str = "Item / Day";
const DATE_HEADING: &str = "Date";

fn row_label(row: &GridRow) -> String {
    let mut label = row.label.clone();
    if let Some(hint) = &row.hint {
        label.push_str(&format!(" ({})", hint));
    }
    if row.titration_badge {
        label.push(' ');
        label.push_str(TITRATION_BADGE);
    }
    label
}

fn cell_text(night_only: bool) -> &'static str {
    if night_only {
        NIGHT_MARK
    } else {
        ""
    }
}

fn width_of(s: &str) -> usize {
    s.chars().count()
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(width_of(s));
    format!("{}{}", s, " ".repeat(fill))
}

fn identification_line(entry: &IdentificationEntry) -> String {
    format!(
        "  - {}: {} ({}, {})",
        entry.name,
        entry.description,
        entry.shape.label(),
        entry.color.label()
    )
}

/// Render the whole sheet as plain text
pub fn to_text(model: &DocumentModel) -> String {
    let mut lines: Vec<String> = Vec::new();

    // Header
    lines.push(model.header.title.clone());
    let fields: Vec<_> = model
        .header
        .patient_fields
        .iter()
        .map(|f| format!("{}: ____________", f))
        .collect();
    lines.push(fields.join("   "));
    lines.push(model.header.instruction.clone());
    lines.push(String::new());

    // Grid
    let label_width = model
        .rows()
        .map(|r| width_of(&row_label(r)))
        .chain([width_of(ITEM_HEADING), width_of(DATE_HEADING)])
        .max()
        .unwrap_or(0);
    let cell_width = model
        .days
        .iter()
        .map(|d| width_of(&d.short_label))
        .chain([width_of(NIGHT_MARK)])
        .max()
        .unwrap_or(0);

    let grid_line = |label: &str, cells: Vec<&str>| -> String {
        let mut line = pad(label, label_width);
        for cell in cells {
            line.push_str(" |");
            line.push_str(&pad(cell, cell_width));
        }
        line.push_str(" |");
        line
    };

    let indices: Vec<String> = model.days.iter().map(|d| d.day_index.to_string()).collect();
    lines.push(grid_line(
        ITEM_HEADING,
        indices.iter().map(String::as_str).collect(),
    ));
    lines.push(grid_line(
        DATE_HEADING,
        model.days.iter().map(|d| d.short_label.as_str()).collect(),
    ));

    for section in &model.sections {
        if let Some(title) = &section.title {
            lines.push(match &section.legend {
                Some(legend) => format!("== {}  {}", title, legend),
                None => format!("== {}", title),
            });
        }
        for row in &section.rows {
            let cells = row.cells.iter().map(|c| cell_text(c.night_only)).collect();
            lines.push(grid_line(&row_label(row), cells));
        }
    }
    lines.push(String::new());

    // Side panel
    let panel = &model.side_panel;
    lines.push(format!("[{}]", panel.title));
    if !panel.acute.is_empty() {
        lines.push(panel.acute_title.clone());
        lines.extend(panel.acute.iter().map(identification_line));
    }
    if !panel.preventive.is_empty() {
        lines.push(panel.preventive_title.clone());
        lines.extend(panel.preventive.iter().map(identification_line));
    }
    lines.push(format!("{} ____________", panel.next_appointment_label));
    lines.push(panel.reminder.clone());
    lines.push(String::new());

    // Footer
    lines.push(format!("[{}]", model.footer.general_notes_title));
    lines.extend(model.footer.general_notes.iter().map(|n| format!("  - {}", n)));

    if model.has_any_warning {
        lines.push(String::new());
        lines.push(format!("[{}]", model.footer.warnings_title));
        lines.extend(model.warnings.iter().map(|warning| match warning {
            SheetWarning::Medication {
                medication_name,
                text,
                ..
            } => format!("  ! {}: {}", medication_name, text),
            SheetWarning::Titration { text } => format!("  * {}", text),
        }));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Write the grid as CSV
///
/// Two header records (day indices, dates), then one record per section
/// heading and one per row. Heading records carry a single field.
pub fn write_csv<W: io::Write>(model: &DocumentModel, writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(writer);

    let mut indices = vec![ITEM_HEADING.to_string()];
    indices.extend(model.days.iter().map(|d| d.day_index.to_string()));
    wtr.write_record(&indices)?;

    let mut dates = vec![DATE_HEADING.to_string()];
    dates.extend(model.days.iter().map(|d| d.short_label.clone()));
    wtr.write_record(&dates)?;

    for section in &model.sections {
        if let Some(title) = &section.title {
            let heading = match &section.legend {
                Some(legend) => format!("{} {}", title, legend),
                None => title.clone(),
            };
            wtr.write_record([heading])?;
        }
        for row in &section.rows {
            let mut record = vec![row_label(row)];
            record.extend(row.cells.iter().map(|c| cell_text(c.night_only).to_string()));
            wtr.write_record(&record)?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Render the grid as a CSV string
pub fn to_csv(model: &DocumentModel) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(model, &mut buf)?;
    String::from_utf8(buf)
        .map_err(|e| crate::Error::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}
