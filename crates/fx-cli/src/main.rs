//! fx-entregas: export one day of delivery attempts to CSV.
//!
//! Walks every configured DC, flattens its routes, waypoints and deliveries
//! into rows, and writes them to `entregas_<YYYY-MM-DD>.csv`.

use anyhow::Context;
use fx_collector::{Collector, CollectorConfig};
use fx_export::{export_csv, ExportConfig, Table};
use fx_ingestion::{ApiConfig, FoxtrotSource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fx_cli=info,fx_collector=info,fx_ingestion=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_config = ApiConfig::from_env().context("failed to load API config")?;
    let collector_config =
        CollectorConfig::from_env().context("failed to load collector config")?;
    let export_config = ExportConfig::from_env();

    tracing::info!(
        "Exporting {} DCs for {} (base URL: {})",
        collector_config.dc_ids.len(),
        collector_config.run_date,
        api_config.base_url
    );

    let source = FoxtrotSource::new(&api_config).context("failed to build HTTP client")?;
    let collector = Collector::new(source, collector_config)?;

    let collection = collector.collect().await;
    let table = Table::new(collection.rows);

    let path = export_csv(&export_config, collector.config().run_date, &table).with_context(|| {
        format!(
            "failed to write CSV to {}",
            export_config.output_dir().display()
        )
    })?;

    println!("\nExport complete. Data saved to: {}", path.display());

    Ok(())
}
