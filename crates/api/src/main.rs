use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use neofeed_core::feed::nasa::NasaFeedClient;

mod routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::from_filename("key.env").ok();
    dotenvy::dotenv().ok();

    let settings = neofeed_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    if let Err(e) = settings.require_api_key() {
        tracing::warn!(error = %e, "feed requests will fail upstream authorization; set YOUR_API_KEY in key.env or the environment");
    }

    let feed = NasaFeedClient::from_settings(&settings)?;
    let state = routes::AppState {
        feed: Arc::new(feed),
        default_range: settings.default_range.clone(),
    };

    let app = routes::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));

    tracing::info!(%addr, base_url = %settings.feed_base_url, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &neofeed_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
