use std::{io::stdout, process::ExitCode};

use clap::Parser;
use snapprune::library::cli::{Cli, run};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Narration owns stdout, diagnostics go to stderr.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Cli::parse();

    match run(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            error.report(&mut stdout()).ok();
            ExitCode::from(error.exit_code())
        }
    }
}
