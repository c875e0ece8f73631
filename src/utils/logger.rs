use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

pub fn init_cli_logger(verbose: bool) {
    let default_directive = if verbose {
        "analytics_etl=debug,info"
    } else {
        "analytics_etl=info"
    };

    tracing_subscriber::registry()
        .with(env_filter(default_directive))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

pub fn init_lambda_logger() {
    tracing_subscriber::registry()
        .with(env_filter("analytics_etl=info"))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .json(), // CloudWatch-friendly structured output
        )
        .init();
}
