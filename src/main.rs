use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tender_types::SheetReport;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tender_annotate::config::{ColumnConfig, DatasetConfig};
use tender_annotate::gazetteer::Gazetteer;
use tender_annotate::keywords::KeywordSets;
use tender_annotate::table::Annotator;
use tender_annotate::{entity, locate, scanner};

const DEFAULT_INPUT_DIR: &str = "input";
const DEFAULT_OUTPUT_DIR: &str = "output";
const SUMMARY_FILE: &str = "summary.json";

#[derive(Parser)]
#[command(
    name = "tender_annotate",
    about = "Tag procurement notices with their province and contracting entity"
)]
struct Cli {
    /// Directory holding the gazetteer and keyword datasets
    #[arg(long, env = "TENDER_DATA_DIR", default_value = "data", global = true)]
    data_dir: PathBuf,

    #[command(flatten)]
    columns: ColumnArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Args)]
struct ColumnArgs {
    /// Column holding the notice text
    #[arg(long, env = "TENDER_TEXT_COLUMN", default_value = "招标信息", global = true)]
    text_column: String,
    /// Column after which the province column is inserted
    #[arg(long, env = "TENDER_ANCHOR_COLUMN", default_value = "招标时间", global = true)]
    anchor_column: String,
    #[arg(long, env = "TENDER_PROVINCE_COLUMN", default_value = "所属省份", global = true)]
    province_column: String,
    #[arg(long, env = "TENDER_ENTITY_COLUMN", default_value = "承建单位", global = true)]
    entity_column: String,
}

impl From<ColumnArgs> for ColumnConfig {
    fn from(args: ColumnArgs) -> Self {
        ColumnConfig {
            text: args.text_column,
            anchor: args.anchor_column,
            province: args.province_column,
            entity: args.entity_column,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Annotate every CSV sheet → output/*.csv + output/summary.json
    Annotate {
        /// A CSV file or a directory of CSV files (one per sheet)
        #[arg(default_value = DEFAULT_INPUT_DIR)]
        input: PathBuf,
        #[arg(long, short, default_value = DEFAULT_OUTPUT_DIR)]
        output: PathBuf,
    },
    /// Show which province a piece of text resolves to
    Locate {
        /// Notice text, e.g. "南京市某道路工程招标公告"
        text: Vec<String>,
    },
    /// Show the entity extracted from a piece of text
    Extract {
        /// Notice text, e.g. "中标人：某建设有限公司"
        text: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tender_annotate=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let datasets = DatasetConfig::from_data_dir(&cli.data_dir)
        .context("cannot read dataset manifest")?;

    match cli.command {
        Some(Command::Annotate { input, output }) => {
            run_annotate(&input, &output, &datasets, &cli.columns.into())
        }
        Some(Command::Locate { text }) => run_locate(&text.join(" "), &datasets),
        Some(Command::Extract { text }) => run_extract(&text.join(" "), &datasets),
        // Default: annotate the input directory
        None => run_annotate(
            Path::new(DEFAULT_INPUT_DIR),
            Path::new(DEFAULT_OUTPUT_DIR),
            &datasets,
            &cli.columns.into(),
        ),
    }
}

fn load_gazetteer(datasets: &DatasetConfig) -> anyhow::Result<Gazetteer> {
    let gazetteer = Gazetteer::load(datasets).context("cannot load location datasets")?;
    tracing::info!(
        tiers = gazetteer.tiers().len(),
        aliases = gazetteer.alias_count(),
        "gazetteer loaded"
    );
    Ok(gazetteer)
}

fn load_keywords(datasets: &DatasetConfig) -> anyhow::Result<KeywordSets> {
    KeywordSets::load(datasets).context("cannot load keyword lists")
}

// ═══════════════════════════════════════════════════════════════════════
//  ANNOTATE MODE: every sheet → output/<sheet>.csv
// ═══════════════════════════════════════════════════════════════════════

fn run_annotate(
    input: &Path,
    output: &Path,
    datasets: &DatasetConfig,
    columns: &ColumnConfig,
) -> anyhow::Result<()> {
    let gazetteer = load_gazetteer(datasets)?;
    let keywords = load_keywords(datasets)?;

    let sheets = scanner::scan_sheets(input);
    if sheets.is_empty() {
        anyhow::bail!("no CSV sheets found at {}", input.display());
    }
    tracing::info!(input = %input.display(), sheets = sheets.len(), "annotating");

    std::fs::create_dir_all(output)
        .with_context(|| format!("cannot create {}", output.display()))?;

    let annotator = Annotator::new(&gazetteer, &keywords, columns);
    let mut reports = Vec::with_capacity(sheets.len());

    for sheet in &sheets {
        tracing::info!(sheet = %sheet.name, "processing sheet");
        match annotator.annotate_sheet(sheet, output) {
            Ok(report) => reports.push(report),
            Err(e) => {
                // A broken sheet is reported; the rest of the run continues
                tracing::warn!(sheet = %sheet.name, error = %e, "sheet failed");
                reports.push(SheetReport {
                    sheet: sheet.name.clone(),
                    skipped: Some(e.to_string()),
                    ..Default::default()
                });
            }
        }
    }

    write_json(&output.join(SUMMARY_FILE), &reports)?;

    let annotated = reports.iter().filter(|r| r.skipped.is_none()).count();
    tracing::info!(
        output = %output.display(),
        annotated,
        skipped = reports.len() - annotated,
        rows = reports.iter().map(|r| r.rows).sum::<usize>(),
        "done"
    );
    Ok(())
}

fn write_json<T: serde::Serialize>(path: &Path, data: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(data).context("JSON serialization failed")?;
    std::fs::write(path, &json).with_context(|| format!("cannot write {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = json.len(), "wrote summary");
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
//  QUERY MODES: single text → stdout
// ═══════════════════════════════════════════════════════════════════════

fn run_locate(text: &str, datasets: &DatasetConfig) -> anyhow::Result<()> {
    let gazetteer = load_gazetteer(datasets)?;
    match locate::locate_match(text, &gazetteer) {
        Some(m) => println!("{}", serde_json::to_string_pretty(&m)?),
        None => eprintln!("No province found in: {text}"),
    }
    Ok(())
}

fn run_extract(text: &str, datasets: &DatasetConfig) -> anyhow::Result<()> {
    let keywords = load_keywords(datasets)?;
    match entity::extract_with(text, &keywords) {
        Some(name) => println!("{name}"),
        None => eprintln!("No entity found in: {text}"),
    }
    Ok(())
}
