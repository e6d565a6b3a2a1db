//! Tracing subscriber initialization with structured logging and optional
//! OpenTelemetry trace export.
//!
//! The caller supplies a default filter directive (typically derived from
//! CLI verbosity); an explicit `RUST_LOG` in the environment always wins.
//!
//! # Usage
//!
//! ```no_run
//! // Structured logging only
//! hearth_observe::tracing_setup::init_tracing("warn,hearth=info", false).unwrap();
//!
//! // With OpenTelemetry export to stdout (for local development)
//! hearth_observe::tracing_setup::init_tracing("info", true).unwrap();
//! ```

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use std::sync::OnceLock;

/// Stores the OTel tracer provider so it can be shut down cleanly on exit.
static TRACER_PROVIDER: OnceLock<SdkTracerProvider> = OnceLock::new();

/// Initialize the global tracing subscriber.
///
/// Installs a structured `fmt` layer with target visibility and span close
/// timing, filtered by `RUST_LOG` when set and by `default_filter`
/// otherwise. When `enable_otel` is true, additionally bridges tracing
/// spans to OpenTelemetry using a stdout exporter (suitable for local
/// development; swap the exporter for OTLP in production).
///
/// # Errors
///
/// Returns an error if `default_filter` is not a valid filter directive or
/// the global subscriber has already been set.
pub fn init_tracing(
    default_filter: &str,
    enable_otel: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE);

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)?,
    };

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer);

    if enable_otel {
        let provider = SdkTracerProvider::builder()
            .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
            .build();
        let tracer = provider.tracer("hearth");
        let otel_layer = tracing_opentelemetry::layer().with_tracer(tracer);

        // Keep the provider for shutdown and register it globally.
        let _ = TRACER_PROVIDER.set(provider.clone());
        opentelemetry::global::set_tracer_provider(provider);

        registry.with(otel_layer).try_init()?;
    } else {
        registry.try_init()?;
    }

    Ok(())
}

/// Flush pending traces and shut down the OpenTelemetry tracer provider.
///
/// Call this before process exit so buffered spans are exported. Safe to
/// call even when OTel was not enabled (no-op in that case).
pub fn shutdown_tracing() {
    if let Some(provider) = TRACER_PROVIDER.get() {
        if let Err(e) = provider.shutdown() {
            eprintln!("Warning: OTel tracer provider shutdown error: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::EnvFilter;

    #[test]
    fn test_verbosity_directives_are_valid_filters() {
        for directive in ["error", "warn,hearth=info", "info,hearth=debug", "trace"] {
            assert!(EnvFilter::try_new(directive).is_ok(), "bad directive: {directive}");
        }
    }

    #[test]
    fn test_malformed_directive_rejected() {
        assert!(EnvFilter::try_new("not==a=filter").is_err());
    }
}
