//! Tracing setup for the binary.

/// Filter directive for the library and binary at `level`. Both share the
/// `group_draw` target prefix.
pub fn filter_directive(level: &str) -> String {
    format!("group_draw={level},rayon=warn")
}

/// Installs a fmt subscriber writing to stderr; stdout is reserved for
/// results. `RUST_LOG` takes precedence over `level` when set.
pub fn init_tracing(level: Option<&str>) {
    use tracing_subscriber::{fmt, EnvFilter};

    let base_level = level.unwrap_or("info");
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(base_level)));

    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
