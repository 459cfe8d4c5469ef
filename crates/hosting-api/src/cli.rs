//! Command-line surface
//!
//! ```text
//! hosting-api domain get [-d DOMAIN]
//! hosting-api record get [-d DOMAIN] [-i ID] [-n NAME] [-t TYPE] [-c CONTENT]
//! hosting-api record add -n NAME -t TYPE -c CONTENT [--ttl T] [--prio P]
//! hosting-api record upd -i ID -n NAME [-t TYPE] [-c CONTENT] [--ttl T] [--prio P]
//! hosting-api record del -n NAME [-t TYPE] [-c CONTENT]
//! ```

use clap::{Args, Parser, Subcommand};
use hosting_core::record::{DEFAULT_PRIO, DEFAULT_TTL, RecordType, validate_ttl};
use std::path::PathBuf;

/// Wrapper around the hosting.nl API
#[derive(Debug, Parser)]
#[command(name = "hosting-api", version, about, long_about = None)]
pub struct Cli {
    /// Enable debug mode
    #[arg(long, global = true)]
    pub debug: bool,

    /// Send GET requests only; log the payload of every write instead of sending it
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Config file (default: ~/.hosting-api.ini)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Get domain objects
    Domain {
        #[command(subcommand)]
        action: DomainCommand,
    },
    /// Create/delete/get/update dns records
    Record {
        #[command(subcommand)]
        action: RecordCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum DomainCommand {
    /// Get domain objects
    Get {
        /// Domain name
        #[arg(short, long)]
        domain: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum RecordCommand {
    /// Get (a) dns record(s)
    Get(RecordGetArgs),
    /// Add dns records
    Add(RecordAddArgs),
    /// Update dns records
    Upd(RecordUpdArgs),
    /// Delete dns records
    Del(RecordDelArgs),
}

#[derive(Debug, Args)]
pub struct RecordGetArgs {
    /// Domain (returns all record(s) in this domain)
    #[arg(short, long)]
    pub domain: Option<String>,

    /// Id
    #[arg(short, long)]
    pub id: Option<u64>,

    /// Name (returns record(s) matching this name)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Type (returns record(s) matching this type)
    #[arg(short = 't', long = "type", value_parser = parse_record_type)]
    pub record_type: Option<RecordType>,

    /// Content (returns record(s) matching this content)
    #[arg(short, long)]
    pub content: Option<String>,
}

#[derive(Debug, Args)]
pub struct RecordAddArgs {
    /// Name
    #[arg(short, long)]
    pub name: String,

    /// Type
    #[arg(short = 't', long = "type", value_parser = parse_record_type)]
    pub record_type: RecordType,

    /// Content
    #[arg(short, long)]
    pub content: String,

    /// TTL
    #[arg(long, default_value_t = DEFAULT_TTL, value_parser = parse_ttl)]
    pub ttl: u32,

    /// Prio
    #[arg(long, default_value_t = DEFAULT_PRIO)]
    pub prio: u32,
}

#[derive(Debug, Args)]
pub struct RecordUpdArgs {
    /// Id
    #[arg(short, long)]
    pub id: u64,

    /// Name
    #[arg(short, long)]
    pub name: String,

    /// New type
    #[arg(short = 't', long = "type", value_parser = parse_record_type)]
    pub record_type: Option<RecordType>,

    /// New content
    #[arg(short, long)]
    pub content: Option<String>,

    /// New TTL
    #[arg(long, value_parser = parse_ttl)]
    pub ttl: Option<u32>,

    /// New prio
    #[arg(long)]
    pub prio: Option<u32>,
}

#[derive(Debug, Args)]
pub struct RecordDelArgs {
    /// Name
    #[arg(short, long)]
    pub name: String,

    /// Type
    #[arg(short = 't', long = "type", value_parser = parse_record_type)]
    pub record_type: Option<RecordType>,

    /// Content
    #[arg(short, long)]
    pub content: Option<String>,
}

fn parse_record_type(value: &str) -> Result<RecordType, String> {
    value.parse().map_err(|e: hosting_core::Error| e.to_string())
}

fn parse_ttl(value: &str) -> Result<u32, String> {
    let ttl: u32 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    validate_ttl(ttl).map_err(|e| e.to_string())
}
