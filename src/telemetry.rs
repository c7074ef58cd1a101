// SPDX-License-Identifier: MIT
//! Telemetry pipeline setup: OTLP trace export plus, by default, OTLP log
//! export of every `tracing` event.
//!
//! Public surface:
//!
//! * [`TelemetryConfig`] – endpoint and resource metadata, sourced from the
//!   environment with local defaults.
//! * [`init_telemetry`] – builds the exporters and installs the global tracer
//!   and the layered `tracing` subscriber.
//! * [`TelemetryHandle`] – explicit synchronous flush/shutdown.
//!
//! Cargo features:
//!
//! * `otlp-log` (default) – OTLP log exporter + bridge converting `tracing`
//!   events into OTLP log records.
//! * `console-log` – additional compact console formatting layer.
//!
//! # Shutdown
//! Call [`TelemetryHandle::shutdown`] before process exit; batch exporters
//! hold records until flushed, and dropping the handle without a shutdown may
//! lose the final batch.

use anyhow::Result;
use opentelemetry::{global, KeyValue};
#[cfg(feature = "otlp-log")]
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
#[cfg(feature = "otlp-log")]
use opentelemetry_otlp::LogExporter;
use opentelemetry_otlp::{Protocol, SpanExporter, WithExportConfig};
#[cfg(feature = "otlp-log")]
use opentelemetry_sdk::logs::SdkLoggerProvider;
use opentelemetry_sdk::trace::SdkTracerProvider;
use opentelemetry_sdk::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

/// Configuration used when initializing telemetry.
///
/// [`Default`] reads the environment:
/// * `OTEL_EXPORTER_OTLP_ENDPOINT` – base endpoint, default `http://localhost:4318`.
/// * `OTEL_SERVICE_NAME` – service name resource attribute.
/// * `RUST_ENV` – deployment environment tag, default `local`.
#[derive(Clone, Debug)]
pub struct TelemetryConfig {
    /// Base OTLP endpoint without per-signal suffix, e.g. `http://localhost:4318`.
    pub endpoint: String,
    /// Reported as the `service.name` resource attribute.
    pub service_name: String,
    /// Reported as the `service.version` resource attribute.
    pub service_version: String,
    /// Reported as the `deployment.environment` resource attribute.
    pub environment: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            endpoint: std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
                .unwrap_or_else(|_| "http://localhost:4318".to_string()),
            service_name: std::env::var("OTEL_SERVICE_NAME")
                .unwrap_or_else(|_| "user-registry-otel".to_string()),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: std::env::var("RUST_ENV").unwrap_or_else(|_| "local".to_string()),
        }
    }
}

/// Handle for explicit synchronous shutdown of the telemetry providers.
pub struct TelemetryHandle {
    tracer_provider: SdkTracerProvider,
    #[cfg(feature = "otlp-log")]
    logger_provider: SdkLoggerProvider,
}

impl TelemetryHandle {
    /// Flush and shut down all configured providers.
    ///
    /// Errors from individual providers are aggregated into one
    /// `anyhow::Error` rather than aborting on the first failure.
    pub fn shutdown(self) -> Result<()> {
        let mut errs = Vec::new();
        if let Err(e) = self.tracer_provider.shutdown() {
            errs.push(format!("tracer: {e}"));
        }
        #[cfg(feature = "otlp-log")]
        if let Err(e) = self.logger_provider.shutdown() {
            errs.push(format!("logger: {e}"));
        }
        if errs.is_empty() {
            Ok(())
        } else {
            anyhow::bail!(errs.join(", "))
        }
    }
}

/// Initialize trace (and, with `otlp-log`, log) export and install the global
/// `tracing` subscriber.
///
/// Must be called once, before any log events worth keeping are emitted.
/// Returns a [`TelemetryHandle`] that must be shut down to flush the export
/// queues.
///
/// # Errors
/// Fails if an exporter builder rejects the configuration (e.g. malformed
/// endpoint URL).
pub fn init_telemetry(cfg: TelemetryConfig) -> Result<TelemetryHandle> {
    let resource = Resource::builder()
        .with_service_name(cfg.service_name.clone())
        .with_attributes([
            KeyValue::new("service.version", cfg.service_version.clone()),
            KeyValue::new("deployment.environment", cfg.environment.clone()),
        ])
        .build();

    let base = cfg.endpoint.trim_end_matches('/');
    let span_exporter = SpanExporter::builder()
        .with_http()
        .with_protocol(Protocol::HttpBinary)
        .with_endpoint(format!("{}/v1/traces", base))
        .build()?;

    let tracer_provider = SdkTracerProvider::builder()
        .with_batch_exporter(span_exporter)
        .with_resource(resource.clone())
        .build();
    global::set_tracer_provider(tracer_provider.clone());

    #[cfg(feature = "otlp-log")]
    let logger_provider = {
        let log_exporter = LogExporter::builder()
            .with_http()
            .with_protocol(Protocol::HttpBinary)
            .with_endpoint(format!("{}/v1/logs", base))
            .build()?;
        SdkLoggerProvider::builder()
            .with_batch_exporter(log_exporter)
            .with_resource(resource)
            .build()
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = Registry::default().with(filter);

    #[cfg(feature = "console-log")]
    let subscriber = subscriber.with(
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .compact(),
    );

    #[cfg(feature = "otlp-log")]
    let subscriber = subscriber.with(OpenTelemetryTracingBridge::new(&logger_provider));

    subscriber
        .with(OpenTelemetryLayer::new(global::tracer("user-registry-otel")))
        .init();

    Ok(TelemetryHandle {
        tracer_provider,
        #[cfg(feature = "otlp-log")]
        logger_provider,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_config_values_are_kept() {
        let cfg = TelemetryConfig {
            endpoint: "http://collector:4318".to_string(),
            service_name: "svc".to_string(),
            service_version: "1.2.3".to_string(),
            environment: "staging".to_string(),
        };
        assert_eq!(cfg.endpoint, "http://collector:4318");
        assert_eq!(cfg.environment, "staging");
    }

    #[test]
    fn default_config_reports_crate_version() {
        let cfg = TelemetryConfig::default();
        assert_eq!(cfg.service_version, env!("CARGO_PKG_VERSION"));
        assert!(!cfg.endpoint.is_empty());
        assert!(!cfg.environment.is_empty());
    }
}
