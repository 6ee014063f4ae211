//! # FX Summary Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Build the provider, fallback and cache adapters
//! - Create the FX service
//! - Start the HTTP server

mod config;

use std::sync::Arc;

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fx_hex::{FxService, inbound::HttpServer};
use fx_repo::{FrankfurterProvider, LocalFileSource, RateCache};

fn init_tracer() -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("fx-summary-service"), provider))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let (otel_tracer, otel_provider) = init_tracer()?;
    let telemetry = tracing_opentelemetry::layer().with_tracer(otel_tracer);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,fx_app=debug,fx_hex=debug,fx_repo=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    let config = config::Config::from_env()?;

    tracing::info!("Starting FX summary server on port {}", config.port);
    tracing::info!(
        provider = %config.provider_url,
        fallback = %config.fallback_path,
        cache_ttl_secs = config.cache_ttl.as_secs(),
        max_attempts = config.max_attempts,
        "Loaded configuration"
    );

    let provider = FrankfurterProvider::new(config.provider())?;
    let fallback = LocalFileSource::new(&config.fallback_path);
    let cache = Arc::new(RateCache::new(config.cache_ttl));

    let service = FxService::new(provider, fallback, cache);

    let server = HttpServer::new(service);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Flush pending spans before exit
    let _ = otel_provider.shutdown();
    Ok(())
}
