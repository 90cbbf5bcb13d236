use std::{any::Any, backtrace::Backtrace};

use tower_http::{
    LatencyUnit,
    classify::{ServerErrorsAsFailures, SharedClassifier},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

const HTTP_TRACE_DIRECTIVE: &str = "tower_http=info";

pub fn init_tracing(cfg: &LoggingConfig) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directives = filter_directives(&cfg.rust_log, env);
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|err| {
        eprintln!("invalid log filter {directives:?} ({err}), falling back to info");
        EnvFilter::new("info")
    });
    fmt().with_env_filter(filter).with_target(false).init();
    set_panic_hook();
}

/// A non-blank `RUST_LOG` replaces the configured filter. Otherwise request tracing is
/// switched on unless the configured filter already mentions `tower_http`.
pub fn filter_directives(configured: &str, env: Option<String>) -> String {
    if let Some(env) = env.filter(|value| !value.trim().is_empty()) {
        return env;
    }
    let configured = configured.trim();
    if configured.is_empty() {
        return format!("info,{HTTP_TRACE_DIRECTIVE}");
    }
    if configured.contains("tower_http") {
        configured.to_string()
    } else {
        format!("{configured},{HTTP_TRACE_DIRECTIVE}")
    }
}

/// One INFO span per request, closed with status and latency in milliseconds.
pub fn http_trace_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}

pub fn panic_message(payload: &dyn Any) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}

fn set_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let message = panic_message(info.payload());
        let backtrace = Backtrace::capture();
        match info.location() {
            Some(location) => tracing::error!(
                panic = %message,
                location = %location,
                backtrace = %backtrace,
                "panic"
            ),
            None => tracing::error!(panic = %message, backtrace = %backtrace, "panic"),
        }
    }));
}

#[cfg(test)]
mod tests {
    use super::{filter_directives, panic_message};

    #[test]
    fn env_filter_overrides_config() {
        assert_eq!(
            filter_directives("info", Some("debug,sea_orm=warn".to_string())),
            "debug,sea_orm=warn"
        );
        assert_eq!(filter_directives("warn", Some("  ".to_string())), "warn,tower_http=info");
    }

    #[test]
    fn request_tracing_is_added_once() {
        assert_eq!(filter_directives("info", None), "info,tower_http=info");
        assert_eq!(
            filter_directives("info,tower_http=debug", None),
            "info,tower_http=debug"
        );
        assert_eq!(filter_directives("", None), "info,tower_http=info");
    }

    #[test]
    fn panic_payloads_are_readable() {
        assert_eq!(panic_message(&"chain snapped"), "chain snapped");
        assert_eq!(panic_message(&String::from("flat tire")), "flat tire");
        assert_eq!(panic_message(&42_u8), "unknown panic");
    }
}
