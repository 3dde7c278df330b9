//! LuvRang storefront command line client

use std::{fmt::Display, io, process::ExitCode};

use tracing::error;

use luvrang::{context::AppContext, observability};

use crate::cli::Cli;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::load() {
        Ok(cli) => cli,
        Err(error) => {
            // Help and version output also arrive here
            _ = error.print();

            return ExitCode::from(u8::try_from(error.exit_code()).unwrap_or(2));
        }
    };

    if let Err(error) = observability::init(&cli.config.logging) {
        report_error(error);

        return ExitCode::FAILURE;
    }

    let context = match AppContext::from_config(&cli.config).await {
        Ok(context) => context,
        Err(error) => {
            error!("failed to initialise: {error}");
            report_error(error);

            return ExitCode::FAILURE;
        }
    };

    match cli.command.run(&context, io::stdout()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("command failed: {error}");
            report_error(error);

            ExitCode::FAILURE
        }
    }
}

fn report_error(error: impl Display) {
    #[expect(
        clippy::print_stderr,
        reason = "user-facing error summary, independent of log level"
    )]
    {
        eprintln!("Error: {error}");
    }
}
