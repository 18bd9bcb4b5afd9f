//! litshop CLI entrypoint.

use std::io::{self, Write};
use std::process::ExitCode;

use litshop::{ClientError, LitshopConfig};
use ortho_config::OrthoConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "LITSHOP_LOG";

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so stdout carries only the rendered view.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    if let Err(error) = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init()
    {
        let _ignored = writeln!(io::stderr().lock(), "logging unavailable: {error}");
    }
}

async fn run() -> Result<(), ClientError> {
    let config = load_config()?;
    let mut stdout = io::stdout().lock();
    litshop::cli::run(&config, &mut stdout).await.map(drop)
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`ClientError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<LitshopConfig, ClientError> {
    LitshopConfig::load().map_err(|error| ClientError::Configuration {
        message: error.to_string(),
    })
}
