use std::fs;
use tracing_subscriber::{filter::Directive, fmt, prelude::*, EnvFilter};

const DEFAULT_DIRECTIVE: &str = "hotel_resolver=info";

/// Initializes the logging system with both console and file output.
pub fn init_logging() {
    // Ensure logs directory exists
    let _ = fs::create_dir_all("logs");

    // Create a non-blocking file appender for daily log rotation
    let file_appender = tracing_appender::rolling::daily("logs", "resolver.log");
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);

    // JSON for the file, human-readable for the console
    let file_layer = fmt::layer().json().with_writer(non_blocking_writer);
    let console_layer = fmt::layer().with_writer(std::io::stderr);

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = DEFAULT_DIRECTIVE.parse::<Directive>() {
        filter = filter.add_directive(directive);
    }

    // try_init so a second call (tests, embedding apps) is a no-op
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init();

    // We need to keep the guard alive so logs are flushed on exit
    std::mem::forget(guard);
}
