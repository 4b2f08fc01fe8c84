//! Command implementations for the CLI interface.
//!
//! Every subcommand maps onto one agent operation. `say` and `repl` go
//! through the natural-language interpreter; the remaining subcommands are
//! the structured equivalents for scripting.

use std::io::{self, BufRead, Write};

use clap::Subcommand;
use clap_complete::{generate, Shell};

use crate::agent::Agent;

#[derive(Subcommand)]
pub enum Commands {
    /// Interpret one natural-language sentence.
    Say {
        /// The sentence, given as one or more words.
        #[arg(required = true)]
        text: Vec<String>,
        /// Print the parsed command before applying it.
        #[arg(long)]
        verbose: bool,
    },

    /// Create a new project.
    AddProject {
        name: String,
        /// Free-text description.
        #[arg(long, default_value = "")]
        desc: String,
    },

    /// Add a task to a project (or the active one).
    AddTask {
        name: String,
        #[arg(long)]
        project: Option<String>,
        /// Deadline: YYYY-MM-DD or a date phrase.
        #[arg(long)]
        deadline: Option<String>,
        /// Effort estimate, e.g. "2h" or "5pts".
        #[arg(long)]
        estimate: Option<String>,
    },

    /// Mark a task as done.
    Done {
        name: String,
        #[arg(long)]
        project: Option<String>,
    },

    /// Delete a task.
    DeleteTask {
        name: String,
        #[arg(long)]
        project: Option<String>,
    },

    /// Delete a whole project.
    DeleteProject { name: String },

    /// Show a project's status with ranked tasks and a suggestion.
    Show { project: Option<String> },

    /// Suggest the next task to work on.
    Suggest { project: Option<String> },

    /// List known projects.
    Projects,

    /// Interactive loop reading sentences until quit/exit.
    Repl,

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Interpret a sentence given on the command line.
pub fn cmd_say(agent: &mut Agent, text: &[String], verbose: bool) {
    let sentence = text.join(" ");
    if verbose {
        println!("{}\n", agent.parse_command(&sentence));
    }
    println!("{}", agent.interpret(&sentence));
}

pub fn cmd_add_project(agent: &mut Agent, name: &str, desc: &str) {
    println!("{}", agent.add_project(name, desc));
}

pub fn cmd_add_task(
    agent: &mut Agent,
    name: &str,
    project: Option<&str>,
    deadline: Option<String>,
    estimate: Option<String>,
) {
    println!("{}", agent.add_task(project, name, deadline, estimate));
}

pub fn cmd_done(agent: &mut Agent, name: &str, project: Option<&str>) {
    println!("{}", agent.complete_task(project, name));
}

pub fn cmd_delete_task(agent: &mut Agent, name: &str, project: Option<&str>) {
    println!("{}", agent.delete_task(project, name));
}

pub fn cmd_delete_project(agent: &mut Agent, name: &str) {
    println!("{}", agent.delete_project(name));
}

pub fn cmd_show(agent: &mut Agent, project: Option<&str>) {
    println!("{}", agent.show_status(project));
}

pub fn cmd_suggest(agent: &mut Agent, project: Option<&str>) {
    println!("{}", agent.suggest(project));
}

pub fn cmd_projects(agent: &Agent) {
    println!("{}", agent.list_projects());
}

/// Read sentences from stdin until quit/exit or end of input.
pub fn cmd_repl(agent: &mut Agent) {
    println!("🤖 parlo — dis-moi ce que tu veux faire (quit pour sortir)");
    let stdin = io::stdin();
    loop {
        print!("\n> ");
        if io::stdout().flush().is_err() {
            break;
        }
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            println!("👋 À bientôt.");
            break;
        }
        println!("{}", agent.interpret(line));
    }
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}
