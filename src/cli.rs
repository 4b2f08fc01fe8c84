use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Natural-language project and task assistant.
/// Storage defaults to ~/.parlo/projects.json or a path passed via --db.
#[derive(Parser)]
#[command(name = "parlo", version, about = "Assistant de projets en langage naturel")]
pub struct Cli {
    /// Path to the JSON store file.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}
