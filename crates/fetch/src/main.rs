use anyhow::Context;
use clap::Parser;
use neofeed_core::domain::range::DateRange;
use neofeed_core::feed::{FeedError, NeoFeedClient};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "neofeed_fetch")]
struct Args {
    /// Feed start date (YYYY-MM-DD). Defaults to NEO_DEFAULT_START or 2025-01-01.
    #[arg(long)]
    start: Option<String>,

    /// Feed end date (YYYY-MM-DD). Defaults to NEO_DEFAULT_END or 2025-01-07.
    #[arg(long)]
    end: Option<String>,

    /// Print the reshaped feed as JSON on stdout.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::from_filename("key.env").ok();
    dotenvy::dotenv().ok();

    let settings = neofeed_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    if let Err(e) = settings.require_api_key() {
        tracing::warn!(error = %e, "feed service will likely reject the request; set YOUR_API_KEY in key.env or the environment");
    }

    let range = DateRange::resolve(
        args.start.as_deref(),
        args.end.as_deref(),
        &settings.default_range,
    );

    let client = neofeed_core::feed::nasa::NasaFeedClient::from_settings(&settings)?;
    let result = match client.fetch_feed(&range).await {
        Ok(result) => result,
        Err(FeedError::Rejected { status, body }) => {
            anyhow::bail!("feed service returned HTTP {status}: {body}");
        }
        Err(err) => {
            let err = anyhow::Error::new(err)
                .context(format!("fetching feed {}..{}", range.start, range.end));
            sentry_anyhow::capture_anyhow(&err);
            return Err(err);
        }
    };

    tracing::info!(
        start = %range.start,
        end = %range.end,
        dates = result.len(),
        asteroids = result.item_count(),
        "feed fetched"
    );
    neofeed_core::report::log_feed_result(&result);

    if args.json {
        let out = serde_json::to_string_pretty(&result).context("failed to encode feed as JSON")?;
        println!("{out}");
    }

    Ok(())
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_optional_range_and_json_flag() {
        let args = Args::try_parse_from(["neofeed_fetch", "--start", "2024-05-01", "--json"]).unwrap();
        assert_eq!(args.start.as_deref(), Some("2024-05-01"));
        assert_eq!(args.end, None);
        assert!(args.json);

        let args = Args::try_parse_from(["neofeed_fetch"]).unwrap();
        assert!(args.start.is_none() && args.end.is_none() && !args.json);
    }

    #[test]
    fn help_is_rendered_by_arg_parsing_alone() {
        let err = Args::try_parse_from(["neofeed_fetch", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        assert!(err.to_string().contains("--start"));
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(Args::try_parse_from(["neofeed_fetch", "--days", "3"]).is_err());
    }
}
