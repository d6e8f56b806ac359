//! tts-batch binary entry point.

use tts_batch::cli::Cli;

#[tokio::main]
async fn main() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_args();

    match tts_batch::cli::convert::handle_convert(&cli).await {
        Ok(report) => {
            tracing::info!(
                files = report.succeeded(),
                output = %cli.output.display(),
                "Conversion complete"
            );
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
