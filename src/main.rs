use plottrail::app::run_demo;
use plottrail::TrailConfig;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("plottrail=debug")),
        )
        .init();

    // Optional first argument: a JSON or YAML trail config.
    let config = match std::env::args_os().nth(1) {
        Some(path) => TrailConfig::load(&path).unwrap_or_else(|err| {
            tracing::error!(%err, "failed to load config, using defaults");
            TrailConfig::default()
        }),
        None => TrailConfig::default(),
    };
    run_demo(config)
}
