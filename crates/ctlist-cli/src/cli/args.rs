use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ctlist",
    version,
    about = "Generate a deterministic Rust table of trusted Certificate Transparency logs"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Verify the signed log list and emit the log table
    Generate(GenerateArgs),
    /// Decode one base64 SubjectPublicKeyInfo and print its raw key and key id
    Spki(SpkiArgs),
}

#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// YAML config file (flags and CTLIST_* variables take precedence)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log list JSON
    #[arg(long)]
    pub log_list: Option<PathBuf>,

    /// Detached signature over the log list
    #[arg(long)]
    pub signature: Option<PathBuf>,

    /// Public key (SPKI PEM) the signature must verify against
    #[arg(long)]
    pub public_key: Option<PathBuf>,

    /// Write the table here instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Unix time used for disqualification checks (default: now)
    #[arg(long)]
    pub now: Option<i64>,

    /// Rust path of the table element type
    #[arg(long)]
    pub log_type: Option<String>,
}

#[derive(Args, Debug)]
pub struct SpkiArgs {
    /// Base64 DER SubjectPublicKeyInfo, as in a log list `key` field
    pub key: String,
}
