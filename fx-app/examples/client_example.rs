//! Client example running the full stack against a local fallback dataset.
//!
//! The provider points at a closed port, so every answer comes from the
//! fallback file written below.
//!
//! Run with: cargo run -p fx-app --example client_example

use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use fx_client::FxClient;
use fx_hex::{FxService, inbound::HttpServer};
use fx_repo::{FrankfurterProvider, LocalFileSource, ProviderConfig, RateCache, RetryPolicy};
use tokio::net::TcpListener;

const SAMPLE: &str = r#"[
    {"date": "2025-07-01", "rate": 1.087, "from": "EUR", "to": "USD"},
    {"date": "2025-07-02", "rate": 1.085, "from": "EUR", "to": "USD"},
    {"date": "2025-07-03", "rate": 1.092, "from": "EUR", "to": "USD"}
]"#;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    // A port nobody listens on
    let closed = TcpListener::bind("127.0.0.1:0").await?;
    let provider_url = format!("http://{}/v1", closed.local_addr()?);
    drop(closed);

    let mut fallback = tempfile::NamedTempFile::new()?;
    fallback.write_all(SAMPLE.as_bytes())?;

    let provider = FrankfurterProvider::new(ProviderConfig {
        base_url: provider_url,
        timeout: Duration::from_secs(1),
        retry: RetryPolicy::new(1, Duration::from_millis(100)),
    })?;
    let service = FxService::new(
        provider,
        LocalFileSource::new(fallback.path()),
        Arc::new(RateCache::default()),
    );
    let router = HttpServer::new(service).router();

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;
    println!("🚀 Server listening on {addr}");
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            eprintln!("server error: {e}");
        }
    });

    let client = FxClient::new(format!("http://{addr}"));
    let start = date(2025, 7, 1)?;
    let end = date(2025, 7, 3)?;

    println!("✅ Server health: {}", client.health().await?);

    let info = client.info().await?;
    println!("✅ {} v{}", info.service, info.version);

    let summary = client.summary(start, end).await?;
    println!(
        "✅ Summary {start}..{end}: {} → {} (mean {}, change {:?}%)",
        summary.start_rate, summary.end_rate, summary.mean_rate, summary.total_pct_change
    );

    println!("\n📋 Daily rates:");
    for day in client.daily(start, end).await? {
        println!("   - {}: {} ({:?}%)", day.date, day.rate, day.pct_change);
    }

    let outside = date(2024, 1, 1)?;
    match client.summary(outside, outside).await {
        Err(e) => println!("\n✅ Window without data rejected: {e}"),
        Ok(_) => println!("\n✗ Expected a 404 for a window without data"),
    }

    Ok(())
}

fn date(year: i32, month: u32, day: u32) -> anyhow::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| anyhow::anyhow!("Invalid date: {year}-{month:02}-{day:02}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_rejects_impossible_day() {
        assert_eq!(date(2025, 7, 1).unwrap().to_string(), "2025-07-01");
        assert!(date(2025, 2, 30).is_err());
        assert!(date(2025, 13, 1).is_err());
    }
}
