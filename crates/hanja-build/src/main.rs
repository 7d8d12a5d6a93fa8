use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use hanja_config::Config;
use hanja_core::BuildSummary;
use hanja_fetch::SourceClient;
use hanja_lang_korean::{HanjaStore, build_from_file};

mod cli;
mod logging;

use self::cli::Args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::load_or_default(args.config.as_deref())?;
    args.apply(&mut config);
    logging::init(&config.log);
    if let Some(path) = &args.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    let summary = run(args.input.clone(), &config).await?;
    report(&summary, args.json)?;
    Ok(())
}

async fn run(input: Option<PathBuf>, config: &Config) -> anyhow::Result<BuildSummary> {
    run_with_source(input, &config.output.path, || {
        SourceClient::new(config.source.url.clone(), config.source.timeout())
    })
    .await
}

/// Fetch the source if needed, then build. A downloaded source is removed on every exit path.
async fn run_with_source<F>(
    input: Option<PathBuf>,
    output: &Path,
    client: F,
) -> anyhow::Result<BuildSummary>
where
    F: FnOnce() -> anyhow::Result<SourceClient>,
{
    let (input, _downloaded) = match input {
        Some(path) => (path, None),
        None => {
            let temp = client()?.download().await?;
            (temp.to_path_buf(), Some(temp))
        }
    };
    let output = output.to_path_buf();

    tracing::info!("Building {} from {}", output.display(), input.display());

    let summary = tokio::task::spawn_blocking(move || {
        let summary = build_from_file(&input, &output)
            .with_context(|| format!("Failed to build {}", output.display()))?;

        if let Ok(store) = HanjaStore::open(&output) {
            if let Ok(readings) = store.distinct_readings() {
                tracing::debug!("{readings} distinct readings indexed");
            }
        }

        anyhow::Ok(summary)
    })
    .await
    .context("Build task panicked")??;

    Ok(summary)
}

fn report(summary: &BuildSummary, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    println!("Database created: {}", summary.output_path.display());
    println!("  Entries: {}", summary.record_count);
    println!("  Skipped: {}", summary.skipped.total());
    println!("  Size: {:.1} KB", summary.size_kib());
    Ok(())
}
