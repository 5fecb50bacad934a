//! Default catalog of acute and preventive headache medications.
//!
//! This module provides the built-in medication reference data and loading of
//! replacement catalogs from TOML.

use crate::types::*;
use crate::Result;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::path::Path;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<MedicationCatalog> = Lazy::new(build_default_catalog_internal);

/// Get a reference to the cached default catalog
pub fn default_catalog() -> &'static MedicationCatalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog with the built-in medications
///
/// **Note**: For production use, prefer `default_catalog()` which returns a
/// cached reference. This function is retained for tests that need an owned
/// catalog to modify.
pub fn build_default_catalog() -> MedicationCatalog {
    build_default_catalog_internal()
}

fn record(
    id: &str,
    name: &str,
    shape: PillShape,
    color: PillColor,
    description: &str,
) -> MedicationRecord {
    MedicationRecord {
        id: id.into(),
        name: name.into(),
        shape,
        color,
        description: description.into(),
        warning: None,
        allow_titration: false,
    }
}

fn build_default_catalog_internal() -> MedicationCatalog {
    // ========================================================================
    // Acute (as-needed) medications
    // ========================================================================

    let acute = vec![
        record(
            "panadol",
            "Panadol (普拿疼)",
            PillShape::Round,
            PillColor::solid("red"),
            "Round / white",
        ),
        record(
            "eve",
            "EVE (布洛芬)",
            PillShape::Round,
            PillColor::outlined("white", "blue"),
            "Round / white / blue lettering",
        ),
        record(
            "cafergot",
            "Cafergot (加非葛)",
            PillShape::Round,
            PillColor::solid("light orange"),
            "Round / beige",
        ),
        record(
            "imigran",
            "Imigran (英明格)",
            PillShape::Oblong,
            PillColor::solid("pink"),
            "Oblong / pink",
        ),
        record(
            "arcoxia",
            "Arcoxia (萬克適)",
            PillShape::Apple,
            PillColor::solid("light green"),
            "Apple-shaped / green",
        ),
        record(
            "ultracet",
            "Ultracet (及通安)",
            PillShape::Oblong,
            PillColor::solid("light yellow"),
            "Oblong / pale yellow",
        ),
        record(
            "rizatan",
            "Rizatan (利扎翠)",
            PillShape::Round,
            PillColor::outlined("white", "gray"),
            "Round / white",
        ),
    ];

    // ========================================================================
    // Preventive (daily) medications
    // ========================================================================

    let preventive = vec![
        MedicationRecord {
            warning: Some(
                "Watch for numbness or tingling in hands and feet. Drink plenty of water \
                 to prevent kidney stones. Return immediately if vision becomes blurred \
                 (glaucoma risk)."
                    .into(),
            ),
            allow_titration: true,
            ..record(
                "topamax",
                "Topamax (托佩瑪)",
                PillShape::Round,
                PillColor::outlined("white", "pink"),
                "Round / sprinkle",
            )
        },
        MedicationRecord {
            warning: Some(
                "May cause weight gain, hair loss or affect liver function. \
                 Not for patients planning a pregnancy."
                    .into(),
            ),
            ..record(
                "depakine",
                "Depakine (帝拔癲)",
                PillShape::Round,
                PillColor::outlined("white", "purple"),
                "Round / white (extended release)",
            )
        },
        record(
            "inderal",
            "Inderal (恩特來)",
            PillShape::Round,
            PillColor::solid("pink"),
            "Small round / pink",
        ),
        MedicationRecord {
            allow_titration: true,
            ..record(
                "flunarizine",
                "Flunarizine (舒腦)",
                PillShape::Capsule,
                PillColor::solid("light red"),
                "Capsule / red",
            )
        },
        record(
            "gabapentin",
            "Gabapentin (卡巴本汀)",
            PillShape::Capsule,
            PillColor::solid("yellow"),
            "Capsule / yellow",
        ),
        record(
            "amitriptyline",
            "Amitriptyline",
            PillShape::Round,
            PillColor::solid("light blue"),
            "Small round / blue",
        ),
    ];

    MedicationCatalog { acute, preventive }
}

impl MedicationCatalog {
    /// Load a replacement catalog from a TOML file
    ///
    /// ```toml
    /// [[preventive]]
    /// id = "topamax"
    /// name = "Topamax"
    /// shape = "round"
    /// color = { fill = "white", outline = "pink" }
    /// description = "Round / sprinkle"
    /// allow_titration = true
    /// ```
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let catalog: MedicationCatalog = toml::from_str(&contents)?;
        tracing::info!(
            "Loaded catalog from {:?} ({} acute, {} preventive)",
            path,
            catalog.acute.len(),
            catalog.preventive.len()
        );
        Ok(catalog)
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();

        let lists = [
            (MedicationCategory::Acute, &self.acute),
            (MedicationCategory::Preventive, &self.preventive),
        ];

        for (category, records) in lists {
            for med in records.iter() {
                if med.id.is_empty() {
                    errors.push(format!("{:?} medication has empty ID", category));
                    continue;
                }
                // Ids are unique across both lists
                if !seen.insert(med.id.as_str()) {
                    errors.push(format!("Duplicate medication ID '{}'", med.id));
                }
                if med.name.is_empty() {
                    errors.push(format!("Medication '{}' has empty name", med.id));
                }
                if med.description.is_empty() {
                    errors.push(format!("Medication '{}' has empty description", med.id));
                }
                if matches!(&med.warning, Some(w) if w.trim().is_empty()) {
                    errors.push(format!("Medication '{}' has blank warning text", med.id));
                }
            }
        }

        errors
    }
}
