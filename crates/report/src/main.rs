use clap::Parser;
use golfdeals_core::config::Settings;
use golfdeals_core::report::html::render_dashboard;
use golfdeals_core::report::DashboardStats;
use golfdeals_core::storage;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "golfdeals_report")]
struct Args {
    /// Directory holding raw_deals.json; index.html and deals.json are written next to it.
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut settings = Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();
    if let Some(dir) = args.data_dir {
        settings.data_dir = dir;
    }

    if let Err(err) = run(&settings) {
        sentry_anyhow::capture_anyhow(&err);
        tracing::error!(error = %format!("{err:#}"), "dashboard generation failed");
        return Err(err);
    }
    Ok(())
}

fn run(settings: &Settings) -> anyhow::Result<()> {
    let input = settings.raw_deals_path();
    let doc = storage::deals::read_document(&input)?;
    tracing::info!(
        path = %input.display(),
        deals = doc.deals.len(),
        produced_at = %doc.timestamp,
        "loaded deals document"
    );

    let html = render_dashboard(&doc.deals, chrono::Utc::now())?;
    let dashboard = settings.dashboard_path();
    storage::write_text(&dashboard, &html)?;

    let deals_json = settings.deals_json_path();
    storage::deals::write_deals_array(&deals_json, &doc.deals)?;

    let stats = DashboardStats::from_deals(&doc.deals);
    tracing::info!(
        dashboard = %dashboard.display(),
        deals_json = %deals_json.display(),
        total = stats.total_deals,
        excellent = stats.excellent,
        "dashboard generated"
    );
    Ok(())
}

fn init_sentry(settings: &Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use golfdeals_core::domain::deal::{DealRecord, DealsDocument};

    fn settings_in(dir: &std::path::Path) -> Settings {
        Settings {
            data_dir: dir.to_path_buf(),
            ..Settings::default()
        }
    }

    #[test]
    fn missing_input_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&settings_in(dir.path())).unwrap_err();
        assert!(err.to_string().contains("raw_deals.json not found"));
        assert!(!dir.path().join("index.html").exists());
    }

    #[test]
    fn writes_dashboard_and_plain_deals_array() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path());
        let deal = DealRecord {
            product_name: "Stand Bag".to_string(),
            original_price: 200.0,
            sale_price: 120.0,
            savings: 80.0,
            discount_pct: 40.0,
            url: "https://www.golfclearancewarehouse.com/golf-bags-s/1.htm".to_string(),
            source: "Golf Clearance Warehouse".to_string(),
        };
        let doc = DealsDocument::new(chrono::Utc::now(), vec![deal.clone()]);
        storage::deals::write_document(&settings.raw_deals_path(), &doc).unwrap();

        run(&settings).unwrap();

        let html = std::fs::read_to_string(settings.dashboard_path()).unwrap();
        assert!(html.contains("<h3>Stand Bag</h3>"));

        let body = std::fs::read_to_string(settings.deals_json_path()).unwrap();
        let deals: Vec<DealRecord> = serde_json::from_str(&body).unwrap();
        assert_eq!(deals, vec![deal]);
    }
}
