//! # parlo — natural-language project and task assistant
//!
//! A CLI task tracker driven by free-form French sentences. A deterministic,
//! rule-based interpreter turns a sentence into a structured command
//! (action, project, task, deadline, estimate, priority), and a small
//! ranking engine orders tasks and recommends the next one to work on.
//!
//! ```bash
//! # Talk to it
//! parlo say "Crée un nouveau projet Alpha avec description Suivi des releases"
//! parlo say "Ajoute une tâche urgente corriger les bugs dans le projet Alpha avant le 2025-10-31"
//! parlo say "Affiche le projet Alpha"
//!
//! # Or use the structured subcommands
//! parlo add-task "corriger les bugs" --project Alpha --deadline 2025-10-31
//! parlo suggest Alpha
//!
//! # Interactive loop
//! parlo repl
//! ```
//!
//! Data is stored locally in `~/.parlo/projects.json` (override with `--db`).

use std::path::PathBuf;

use clap::Parser;

pub mod agent;
pub mod cli;
pub mod cmd;
pub mod db;
pub mod fields;
pub mod nlp;
pub mod planner;
pub mod project;
pub mod task;

use agent::Agent;
use cli::Cli;
use cmd::*;

fn main() {
    let cli = Cli::parse();

    // Completions never touch the store.
    if let Commands::Completions { shell } = &cli.command {
        cmd_completions(*shell);
        return;
    }

    let store_path = match cli.db {
        Some(path) => path,
        None => {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            let dir = PathBuf::from(home).join(".parlo");
            if let Err(e) = std::fs::create_dir_all(&dir) {
                eprintln!("Failed to create data directory {}: {e}", dir.display());
                std::process::exit(1);
            }
            dir.join("projects.json")
        }
    };

    let mut agent = Agent::new(store_path);

    match cli.command {
        Commands::Say { text, verbose } => cmd_say(&mut agent, &text, verbose),
        Commands::AddProject { name, desc } => cmd_add_project(&mut agent, &name, &desc),
        Commands::AddTask { name, project, deadline, estimate } => {
            cmd_add_task(&mut agent, &name, project.as_deref(), deadline, estimate)
        }
        Commands::Done { name, project } => cmd_done(&mut agent, &name, project.as_deref()),
        Commands::DeleteTask { name, project } => {
            cmd_delete_task(&mut agent, &name, project.as_deref())
        }
        Commands::DeleteProject { name } => cmd_delete_project(&mut agent, &name),
        Commands::Show { project } => cmd_show(&mut agent, project.as_deref()),
        Commands::Suggest { project } => cmd_suggest(&mut agent, project.as_deref()),
        Commands::Projects => cmd_projects(&agent),
        Commands::Repl => cmd_repl(&mut agent),
        Commands::Completions { .. } => unreachable!("handled above"),
    }
}
