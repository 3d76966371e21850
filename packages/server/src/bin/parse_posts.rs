//! CLI for running the stats pipeline over a local posts file
//!
//! Prints a table of the final records, or JSON with `--json`.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use server_core::config::{Config, ExtractorKind};
use server_core::kernel::{build_pipeline_with, parse_posts_input};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use walk_stats::StatRecord;

#[derive(Parser)]
#[command(name = "parse_posts")]
#[command(about = "Extract per-day walking stats from a file of posts")]
struct Cli {
    /// JSON array, `{ "posts": [...] }` object, or blank-line separated text
    #[arg(short, long)]
    input: PathBuf,

    /// Use the offline rule-based extractor instead of OpenAI
    #[arg(long)]
    rules: bool,

    /// Do not write to the data file or spreadsheet
    #[arg(long)]
    dry_run: bool,

    /// Print `{ "results": [...] }` instead of a table
    #[arg(long)]
    json: bool,

    /// Year used to resolve dates (defaults to the current year)
    #[arg(long)]
    year: Option<i32>,
}

#[derive(Serialize)]
struct Output<'a> {
    results: &'a [StatRecord],
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,walk_stats=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if cli.rules {
        config.extractor = ExtractorKind::Rules;
    }

    let mut pipeline_config = config.pipeline_config().with_persist(!cli.dry_run);
    if let Some(year) = cli.year {
        pipeline_config = pipeline_config.with_year(year);
    }
    let pipeline =
        build_pipeline_with(&config, pipeline_config).context("Failed to build pipeline")?;

    let text = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;
    let posts = parse_posts_input(&text);

    let run = pipeline
        .run_with_report(&posts)
        .await
        .context("Parsing failed")?;

    if cli.json {
        let output = serde_json::to_string_pretty(&Output {
            results: &run.records,
        })?;
        println!("{}", output);
        return Ok(());
    }

    println!(
        "{:<10} {:>8} {:>8} {:>9} {:>8}",
        "DATE", "MINUTES", "MILES", "CALORIES", "STEPS"
    );
    for record in &run.records {
        println!(
            "{:<10} {:>8} {:>8} {:>9} {:>8}",
            record.date_label.as_deref().unwrap_or("-"),
            cell(record.minutes),
            cell(record.miles),
            cell(record.calories),
            cell(record.steps),
        );
    }
    println!(
        "\n{} posts ({} unique) -> {} units -> {} records{}",
        run.raw_posts,
        run.unique_posts,
        run.units,
        run.records.len(),
        if cli.dry_run { " (dry run)" } else { "" }
    );

    Ok(())
}

fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
