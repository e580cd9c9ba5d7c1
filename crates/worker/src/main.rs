use clap::{Parser, ValueEnum};
use golfdeals_core::aggregate::{collect_deals, summarize};
use golfdeals_core::config::Settings;
use golfdeals_core::domain::catalog::CATALOG;
use golfdeals_core::domain::deal::DealsDocument;
use golfdeals_core::fetch::http::HttpPageFetcher;
use golfdeals_core::fetch::PageSource;
use golfdeals_core::llm::anthropic::AnthropicSearchClient;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FetchSource {
    /// GET each category page directly.
    Scrape,
    /// Ask the search model for listing text (needs ANTHROPIC_API_KEY).
    Search,
}

#[derive(Debug, Parser)]
#[command(name = "golfdeals_worker")]
struct Args {
    #[arg(long, value_enum, default_value_t = FetchSource::Scrape)]
    source: FetchSource,

    /// Directory for raw_deals.json. Defaults to GOLFDEALS_DATA_DIR or ./docs.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Fetch and extract, but don't write the deals document.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut settings = Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();
    if let Some(dir) = args.data_dir.clone() {
        settings.data_dir = dir;
    }

    if let Err(err) = run(&settings, &args).await {
        sentry_anyhow::capture_anyhow(&err);
        tracing::error!(error = %format!("{err:#}"), "deal search failed");
        return Err(err);
    }
    Ok(())
}

async fn run(settings: &Settings, args: &Args) -> anyhow::Result<()> {
    // Built up front so a missing credential fails before any fetching.
    let source: Box<dyn PageSource> = match args.source {
        FetchSource::Scrape => Box::new(HttpPageFetcher::from_settings(settings)?),
        FetchSource::Search => Box::new(AnthropicSearchClient::from_settings(settings)?),
    };

    let started_at = chrono::Utc::now();
    tracing::info!(source = source.source_name(), %started_at, "starting deal search");

    let deals = collect_deals(source.as_ref(), CATALOG).await;
    let summary = summarize(&deals);
    tracing::info!(
        total = summary.total,
        excellent = summary.excellent,
        great = summary.great,
        "deal summary (excellent: 50%+ off, great: 30-49% off)"
    );

    if args.dry_run {
        tracing::info!(dry_run = true, "skipping deals document write");
        return Ok(());
    }

    let path = settings.raw_deals_path();
    let doc = DealsDocument::new(chrono::Utc::now(), deals);
    golfdeals_core::storage::deals::write_document(&path, &doc)?;
    tracing::info!(path = %path.display(), total_deals = doc.total_deals, "deals saved");

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
