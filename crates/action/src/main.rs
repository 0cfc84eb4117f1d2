//! `herald` binary entrypoint, run once per GitHub Actions step.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use herald_action::reporter::Reporter;
use herald_action::run::run_from_source;
use herald_common::config::ProcessEnv;
use herald_notifier::webhook::HttpTransport;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // stdout carries workflow commands, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("herald_action=info,herald_notifier=info")
        }))
        .with_writer(std::io::stderr)
        .init();

    let outcome = run_from_source(&ProcessEnv, &HttpTransport::new()).await;

    Reporter::from_source(&ProcessEnv)
        .report(&outcome, &mut std::io::stdout())
        .exit_code()
}
