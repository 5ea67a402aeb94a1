use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::json;
use spider_core::{
    build_series, summarize, to_traces, FilterSelection, MeasurementRecord, PlotlyLayout,
    PlottedSeries, Snapshot, SpiderConfig, SpiderConfigOverrides, SpiderFilters, ALL_SENTINEL,
};
use spider_source::{
    FileRecordSource, HttpRecordSource, RecordSource, SourceConfig, DEFAULT_BASE_URL,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "spider-cli",
    version,
    about = "Summarize tumor-response records and build spider plot series."
)]
struct Cli {
    /// Base URL of the record endpoint.
    #[arg(long, global = true, env = "SPIDER_API_URL", default_value = DEFAULT_BASE_URL)]
    url: String,

    /// Read records from a saved JSON payload instead of the endpoint.
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    /// JSON file overriding palette entries, consistency policy, plot
    /// thresholds or y range.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Distinct patients, arms and doses over the full record set.
    Summary,
    /// One series per subject for the selected filters.
    Series {
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Print the request URL for the selected filters.
    Query {
        #[command(flatten)]
        filters: FilterArgs,
    },
}

#[derive(Args, Debug)]
struct FilterArgs {
    #[arg(long, default_value = ALL_SENTINEL)]
    arm: String,
    #[arg(long, default_value = ALL_SENTINEL)]
    dose: String,
    #[arg(long = "tumor-type", default_value = ALL_SENTINEL)]
    tumor_type: String,
}

impl FilterArgs {
    fn to_filters(&self) -> anyhow::Result<SpiderFilters> {
        FilterSelection::new(&self.arm, &self.dose, &self.tumor_type)
            .to_filters()
            .context("invalid filter selection")
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Json,
    Plotly,
    /// Summary and series of the selected records with a timestamp.
    Snapshot,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    match &cli.command {
        Command::Summary => {
            let records = fetch(&cli, &SpiderFilters::default()).await?;
            let summary = summarize(&records).context("could not summarize records")?;
            println!("Unique patients: {}", summary.patient_count);
            println!(
                "Treatment arms: {} ({})",
                summary.arms.len(),
                summary.arms_label()
            );
            println!(
                "Dose levels: {} ({})",
                summary.doses.len(),
                summary.doses_label()
            );
        }
        Command::Series { filters, format } => {
            let filters = filters.to_filters()?;
            let records = fetch(&cli, &filters).await?;
            let series = build_series(&records, &config).context("could not build series")?;
            tracing::info!(
                records = records.len(),
                series = series.len(),
                "built spider series"
            );
            print_series(&records, &series, &config, *format)?;
        }
        Command::Query { filters } => {
            let filters = filters.to_filters()?;
            let source = HttpRecordSource::new(&SourceConfig::with_base_url(&cli.url))?;
            println!("{}", source.request_url(&filters));
        }
    }

    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<SpiderConfig> {
    let Some(path) = path else {
        return Ok(SpiderConfig::default());
    };
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("could not read config file {}", path.display()))?;
    let overrides: SpiderConfigOverrides = serde_json::from_str(&data)
        .with_context(|| format!("invalid config file {}", path.display()))?;
    Ok(SpiderConfig::from(overrides))
}

async fn fetch(cli: &Cli, filters: &SpiderFilters) -> anyhow::Result<Vec<MeasurementRecord>> {
    let source: Box<dyn RecordSource> = match &cli.input {
        Some(path) => Box::new(FileRecordSource::new(path)),
        None => Box::new(HttpRecordSource::new(&SourceConfig::with_base_url(&cli.url))?),
    };

    let records = source
        .fetch_records(filters)
        .await
        .context("could not load records")?;
    if records.is_empty() {
        tracing::warn!("no records matched the selected filters");
    }
    Ok(records)
}

fn print_series(
    records: &[MeasurementRecord],
    series: &[PlottedSeries],
    config: &SpiderConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            println!("{:<12} {:<14} {:<7} {:>8}  points", "subject", "group", "legend", "latest");
            for s in series {
                let latest = s
                    .latest_change()
                    .map(|change| format!("{change:.1}"))
                    .unwrap_or_else(|| "--".to_string());
                let points = s
                    .points
                    .iter()
                    .map(|p| format!("({:.2}, {:.1})", p.week, p.percent_change))
                    .collect::<Vec<_>>()
                    .join(" ");
                println!(
                    "{:<12} {:<14} {:<7} {:>8}  {}",
                    s.subject_id,
                    s.group_key,
                    if s.show_legend { "yes" } else { "no" },
                    latest,
                    points
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(series)?);
        }
        OutputFormat::Plotly => {
            let figure = json!({
                "data": to_traces(series),
                "layout": PlotlyLayout::from_config(config),
            });
            println!("{}", serde_json::to_string_pretty(&figure)?);
        }
        OutputFormat::Snapshot => {
            let snapshot = Snapshot::build(records, config).context("could not build snapshot")?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
    }
    Ok(())
}
