use anyhow::Result;
use axum::Router;
use clap::Parser;
use engine::{Language, SearchSession, SessionSettings};
use fetcher::{bootstrap, DocumentClient, FailurePolicy, FetchConfig};
use server::{build_app, AppState, UiSettings};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "server")]
#[command(about = "Serve bilingual article search over HTTP")]
struct Args {
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Directory listing endpoint (GitHub contents API)
    #[arg(long, default_value = fetcher::config::DEFAULT_LISTING_URL)]
    listing_url: String,
    /// Article file extension
    #[arg(long, default_value = fetcher::config::DEFAULT_EXTENSION)]
    extension: String,
    /// Per-request timeout seconds
    #[arg(long, default_value_t = 12)]
    timeout_secs: u64,
    /// Largest accepted response body
    #[arg(long, default_value_t = fetcher::config::DEFAULT_MAX_BODY_BYTES)]
    max_body_bytes: usize,
    /// User-Agent sent with every request
    #[arg(long, default_value = fetcher::config::DEFAULT_USER_AGENT)]
    user_agent: String,
    /// Abort the whole index build if any document fails to fetch
    #[arg(long, default_value_t = false)]
    strict: bool,
    /// Queries shorter than this are not searched
    #[arg(long, default_value_t = engine::session::DEFAULT_MIN_QUERY_LEN)]
    min_query_len: usize,
    /// Initial display language (en or gr)
    #[arg(long, default_value = "en")]
    language: String,
    /// Results returned per search unless the request asks otherwise
    #[arg(long, default_value_t = server::DEFAULT_RESULT_LIMIT)]
    result_limit: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let language: Language = args.language.parse()?;
    let session = Arc::new(SearchSession::new(SessionSettings { min_query_len: args.min_query_len, language }));
    let config = FetchConfig::default()
        .with_listing_url(args.listing_url.clone())
        .with_extension(args.extension.clone())
        .with_user_agent(args.user_agent.clone())
        .with_timeout(Duration::from_secs(args.timeout_secs))
        .with_max_body_bytes(args.max_body_bytes)
        .with_policy(if args.strict { FailurePolicy::Strict } else { FailurePolicy::Partial });
    let client = DocumentClient::new(config)?;

    let settings = UiSettings { result_limit: args.result_limit, ..UiSettings::default() };
    let state = AppState::new(session, client, settings);

    // Fire and forget: search answers "unavailable" until the index is ready.
    let boot_state = state.clone();
    tokio::spawn(async move {
        match bootstrap(&boot_state.session, &boot_state.client).await {
            Ok(Some(summary)) => tracing::info!(
                documents = summary.documents,
                items = summary.items,
                failed = summary.partial.as_ref().map_or(0, |p| p.failures.len()),
                "startup indexing finished"
            ),
            Ok(None) => {}
            Err(e) => tracing::error!(error = %e, "startup indexing failed"),
        }
    });

    let app: Router = build_app(state)?;
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, listing = %args.listing_url, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
