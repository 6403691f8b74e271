//! manual-approval — request manual approval from users and teams.
//!
//! Invoked by the workflow orchestrator once per lifecycle event:
//!   manual-approval --handler init       # open the approval request
//!   manual-approval --handler callback   # record the approver's decision
//!   manual-approval --handler cancel     # withdraw on abort or timeout
//!
//! All inputs arrive through environment variables; see the handlers module.

use clap::Parser;
use colored::Colorize;
use manual_approval::api::ReqwestTransport;
use manual_approval::config::{Environment, Settings};
use manual_approval::console::StdoutConsole;
use manual_approval::{ApprovalError, HandlerKind, ManualApproval};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Request manual approval from users and teams.
#[derive(Parser)]
#[command(
    name = "manual-approval",
    version,
    about = "Request manual approval from users and teams"
)]
struct Cli {
    /// Handler to run: init, callback, or cancel
    #[arg(long, default_value = "")]
    handler: String,

    /// Positional arguments are not accepted; collected only to report them.
    #[arg(hide = true)]
    args: Vec<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let env = Environment::from_process();
    let settings = Settings::from_env(&env);

    // Diagnostics share stdout with the job log, as the orchestrator only captures stdout.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(settings.log_directive()))
        .with_writer(std::io::stdout)
        .with_target(false)
        .init();

    if let Err(e) = run(cli, settings, env).await {
        let e = anyhow::Error::from(e);
        eprintln!("  {} {}", "✗".red().bold(), e);
        for cause in e.chain().skip(1) {
            eprintln!("  {} {}", "caused by:".dimmed(), cause);
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli, settings: Settings, env: Environment) -> Result<(), ApprovalError> {
    if !cli.args.is_empty() {
        return Err(ApprovalError::UnknownArguments(cli.args));
    }
    let handler: HandlerKind = cli.handler.parse()?;

    let transport = Arc::new(ReqwestTransport::new()?);
    let runner = ManualApproval::new(settings, env, transport, Arc::new(StdoutConsole));

    // Dropping the handler future on interrupt aborts any in-flight request.
    tokio::select! {
        result = runner.run(handler) => result,
        _ = tokio::signal::ctrl_c() => {
            println!("\n{}", format!("Interrupted, abandoning {handler} handler").yellow());
            Err(ApprovalError::Interrupted)
        }
    }
}
