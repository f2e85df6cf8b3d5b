use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = lifx_alert::cli::Cli::parse();
    init_logging(cli.debug);
    let exit_code = lifx_alert::run(cli).await;
    std::process::exit(exit_code);
}

/// Logs go to stderr so stdout stays clean for rendered results.
fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("lifx_alert=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lifx_alert=warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
