//! ocr-score -- stdio JSON-RPC scoring server.
//!
//! Usage: ocr-score [--lcs table|backtrace] [--parallel]

fn main() -> anyhow::Result<()> {
    // Log to stderr; stdout carries the protocol.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ocr_score::ScoreConfig::from_args(std::env::args().skip(1))?;

    ocr_score::run_server(&config)
}
