use clap::{Parser, Subcommand};
use headache_core::config::OutputFormat;
use headache_core::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "headache-diary")]
#[command(about = "Printable headache diary sheet generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override config file location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Medication catalog (TOML) replacing the built-in one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a diary sheet (default)
    Generate {
        /// First day of the sheet (YYYY-MM-DD, default today)
        #[arg(long)]
        start: Option<String>,

        /// Number of days (7, 14, 21, 28 or 30 print best)
        #[arg(long, allow_negative_numbers = true)]
        days: Option<i64>,

        /// Acute medication ids, comma-separated (empty for none)
        #[arg(long, value_delimiter = ',')]
        acute: Option<Vec<String>>,

        /// Preventive medication ids, comma-separated (empty for none)
        #[arg(long, value_delimiter = ',')]
        preventive: Option<Vec<String>>,

        /// Disable the first-three-days night-use marks
        #[arg(long)]
        no_titration: bool,

        /// Output format (text, json, csv)
        #[arg(long)]
        format: Option<String>,

        /// Write the sheet to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// List the medications available for selection
    Catalog,
}

struct GenerateArgs {
    start: Option<String>,
    days: Option<i64>,
    acute: Option<Vec<String>>,
    preventive: Option<Vec<String>>,
    no_titration: bool,
    format: Option<String>,
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    headache_core::logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let catalog = load_catalog(&config, cli.catalog.as_deref())?;

    match cli.command {
        Some(Commands::Generate {
            start,
            days,
            acute,
            preventive,
            no_titration,
            format,
            output,
        }) => cmd_generate(
            &config,
            &catalog,
            GenerateArgs {
                start,
                days,
                acute,
                preventive,
                no_titration,
                format,
                output,
            },
        ),
        Some(Commands::Catalog) => cmd_catalog(&catalog),
        None => {
            // Default to "generate" with config defaults
            cmd_generate(
                &config,
                &catalog,
                GenerateArgs {
                    start: None,
                    days: None,
                    acute: None,
                    preventive: None,
                    no_titration: false,
                    format: None,
                    output: None,
                },
            )
        }
    }
}

fn load_catalog(config: &Config, override_path: Option<&Path>) -> Result<MedicationCatalog> {
    let catalog = match override_path {
        Some(path) => MedicationCatalog::load_from(path)?,
        None => config.load_catalog()?,
    };

    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }

    Ok(catalog)
}

/// Comma-separated ids with blanks dropped, so `--acute ""` selects nothing
fn selection(ids: Vec<String>) -> std::collections::BTreeSet<String> {
    ids.into_iter()
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .collect()
}

fn cmd_generate(config: &Config, catalog: &MedicationCatalog, args: GenerateArgs) -> Result<()> {
    let start_date = match &args.start {
        Some(s) => parse_start_date(s)?,
        None => chrono::Local::now().date_naive(),
    };

    let mut sheet_config = config.sheet_config(start_date);
    if let Some(raw) = args.days {
        sheet_config.day_count = dates::checked_day_count(raw)?;
    }
    if let Some(ids) = args.acute {
        sheet_config.selected_acute_ids = selection(ids);
    }
    if let Some(ids) = args.preventive {
        sheet_config.selected_preventive_ids = selection(ids);
    }
    if args.no_titration {
        sheet_config.titration_enabled = false;
    }

    let format = match &args.format {
        Some(f) => f.parse::<OutputFormat>()?,
        None => config.output.format,
    };

    if let Some(advice) = layout::advise(sheet_config.day_count) {
        tracing::warn!("{}", advice);
    }

    let model = SheetBuilder::new(catalog).build(&sheet_config)?;

    let rendered = match format {
        OutputFormat::Text => render::to_text(&model),
        OutputFormat::Json => serde_json::to_string_pretty(&model)? + "\n",
        OutputFormat::Csv => render::to_csv(&model)?,
    };

    match args.output {
        Some(path) => {
            write_sheet(&path, &rendered)?;
            println!("✓ Sheet written to {}", path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

fn cmd_catalog(catalog: &MedicationCatalog) -> Result<()> {
    for category in [MedicationCategory::Acute, MedicationCategory::Preventive] {
        println!("{:?} medications:", category);
        for med in catalog.records(category) {
            let mut flags = Vec::new();
            if med.allow_titration {
                flags.push("titration");
            }
            if med.warning.is_some() {
                flags.push("warning");
            }
            let flags = if flags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", flags.join(", "))
            };
            println!(
                "  {:<14} {} ({}){}",
                med.id, med.name, med.description, flags
            );
        }
        println!();
    }
    Ok(())
}
