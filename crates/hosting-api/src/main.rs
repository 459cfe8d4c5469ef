// # hosting-api - command-line client for the hosting DNS-management API
//
// This binary is a THIN integration layer:
// 1. Parse the command line
// 2. Initialize logging
// 3. Load the configuration file
// 4. Dispatch the subcommand to `hosting_core::HostingEngine`
// 5. Print JSON results to stdout and map errors to exit codes
//
// All record logic lives in `hosting-core`.
//
// ## Configuration
//
// `~/.hosting-api.ini` (or `--config PATH`):
//
// ```ini
// [Api]
// Url = https://api.hosting.example/v1
// Token = your_token
// ```
//
// ## Example
//
// ```bash
// hosting-api record get -n www.example.com
// hosting-api record add -n www.example.com -t A -c 192.0.2.1 --ttl 300
// hosting-api record upd -i 1234 -n www.example.com -c 192.0.2.2
// hosting-api record del -n www.example.com -t A
// ```

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, DomainCommand, RecordAddArgs, RecordCommand};
use hosting_core::record::NewRecord;
use hosting_core::{ApiConfig, HostingEngine, QueryCriteria, RecordChanges, UpdateOutcome};
use hosting_gateway_http::HttpGateway;
use serde_json::Value;
use std::path::Path;
use std::process::ExitCode;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for the different outcomes
///
/// - 0: Success, including "nothing matched" for plain queries and no-op updates
/// - 1: Any hard failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CliExitCode {
    /// Operation completed
    Success = 0,
    /// Configuration, request or lookup failure
    Failure = 1,
}

impl From<CliExitCode> for ExitCode {
    fn from(code: CliExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.debug) {
        eprintln!("{:#}", e);
        return CliExitCode::Failure.into();
    }

    if cli.debug {
        info!("Debug mode enabled");
    }

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return CliExitCode::Failure.into();
        }
    };

    let gateway = match HttpGateway::new(config, cli.dry_run) {
        Ok(gateway) => gateway,
        Err(e) => {
            error!("{}", e);
            return CliExitCode::Failure.into();
        }
    };

    if cli.dry_run {
        warn!("Running in DRY-RUN mode - no changes will be made");
    }

    let engine = HostingEngine::new(Box::new(gateway));

    // Requests are strictly sequential; a single-threaded runtime is enough
    let rt = match build_runtime() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("{:#}", e);
            return CliExitCode::Failure.into();
        }
    };

    rt.block_on(dispatch(&engine, cli.command)).into()
}

/// Install the stderr log subscriber
fn init_tracing(debug: bool) -> Result<()> {
    let log_level = if debug { Level::DEBUG } else { Level::INFO };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

fn build_runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")
}

fn load_config(path: Option<&Path>) -> hosting_core::Result<ApiConfig> {
    match path {
        Some(path) => ApiConfig::load_from(path),
        None => ApiConfig::load(),
    }
}

/// Run one subcommand and decide the exit code
///
/// This is the only place where errors are turned into exit codes.
async fn dispatch(engine: &HostingEngine, command: Command) -> CliExitCode {
    let result = match command {
        Command::Domain {
            action: DomainCommand::Get { domain },
        } => domain_get(engine, domain.as_deref()).await,
        Command::Record { action } => match action {
            RecordCommand::Get(args) => {
                let criteria = QueryCriteria {
                    domain: args.domain,
                    name: args.name,
                    record_type: args.record_type,
                    content: args.content,
                    id: args.id,
                };
                match record_get(engine, &criteria).await {
                    // Records exist but none match: not a failure for a plain query
                    Err(e) if e.is_benign_for_query() => {
                        warn!("{}", e);
                        Ok(())
                    }
                    other => other,
                }
            }
            RecordCommand::Add(args) => record_add(engine, args).await,
            RecordCommand::Upd(args) => {
                let changes = RecordChanges {
                    record_type: args.record_type,
                    content: args.content,
                    ttl: args.ttl,
                    prio: args.prio,
                };
                record_upd(engine, args.id, &args.name, &changes).await
            }
            RecordCommand::Del(args) => {
                record_del(engine, &args.name, args.record_type, args.content.as_deref()).await
            }
        },
    };

    match result {
        Ok(()) => CliExitCode::Success,
        Err(e) => {
            error!("{}", e);
            CliExitCode::Failure
        }
    }
}

async fn domain_get(engine: &HostingEngine, domain: Option<&str>) -> hosting_core::Result<()> {
    let data = engine.get_domains(domain).await?;
    print_json(&data);
    Ok(())
}

async fn record_get(engine: &HostingEngine, criteria: &QueryCriteria) -> hosting_core::Result<()> {
    let records = engine.query_records(criteria).await?;
    println!("{}", serde_json::to_string(&records)?);
    Ok(())
}

async fn record_add(engine: &HostingEngine, args: RecordAddArgs) -> hosting_core::Result<()> {
    let record = NewRecord::new(args.name, args.record_type, args.content, args.ttl, args.prio)?;
    let data = engine.add_record(record).await?;
    print_json(&data);
    Ok(())
}

async fn record_upd(
    engine: &HostingEngine,
    id: u64,
    name: &str,
    changes: &RecordChanges,
) -> hosting_core::Result<()> {
    if let UpdateOutcome::Updated(data) = engine.update_record(id, name, changes).await? {
        print_json(&data);
    }
    Ok(())
}

async fn record_del(
    engine: &HostingEngine,
    name: &str,
    record_type: Option<hosting_core::RecordType>,
    content: Option<&str>,
) -> hosting_core::Result<()> {
    let data = engine.delete_records(name, record_type, content).await?;
    if !data.is_null() {
        print_json(&data);
    }
    Ok(())
}

fn print_json(data: &Value) {
    println!("{}", data);
}
