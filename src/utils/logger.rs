use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_cli_logger(verbose: bool) {
    if verbose {
        init_logger_with_level("debug");
    } else {
        init_logger_with_level("info");
    }
}

/// `level` applies to this crate only; `RUST_LOG` still takes precedence.
pub fn init_logger_with_level(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// 以 JSON 格式輸出日誌，方便交給 log collector
pub fn init_json_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(true)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}

fn default_filter(level: &str) -> EnvFilter {
    match level {
        "debug" | "trace" => EnvFilter::new(format!("anagram_etl={},info", level)),
        other => EnvFilter::new(format!("anagram_etl={}", other)),
    }
}
