//! Orchestration: applies interpreted commands to the project store.
//!
//! This layer owns validation and every user-facing message; the
//! interpretation core itself never produces user text and never fails.
//! The last project touched is remembered as the active project, so
//! follow-up sentences can omit it.

use std::path::PathBuf;

use chrono::Local;

use crate::db::Database;
use crate::fields::Action;
use crate::nlp::{Command, Interpreter};
use crate::planner::{create_task, sort_tasks, suggest_next, Suggestion};
use crate::project::Project;

pub struct Agent {
    db: Database,
    path: PathBuf,
    interpreter: Interpreter,
    active_project: Option<String>,
}

impl Agent {
    pub fn new(path: PathBuf) -> Self {
        let db = Database::load(&path);
        Agent::with_database(db, path)
    }

    pub fn with_database(db: Database, path: PathBuf) -> Self {
        Agent {
            db,
            path,
            interpreter: Interpreter::new(),
            active_project: None,
        }
    }

    /// Interpret a sentence without applying it.
    pub fn parse_command(&self, text: &str) -> Command {
        self.interpreter.parse(text)
    }

    fn persist(&self) {
        if let Err(e) = self.db.save(&self.path) {
            eprintln!("Failed to save store {}: {e}", self.path.display());
        }
    }

    /// Resolve an explicit name, or fall back to the active project.
    fn resolve_key(&self, project: Option<&str>) -> Option<String> {
        let name = project
            .map(str::to_string)
            .or_else(|| self.active_project.clone())?;
        self.db.project_key(&name)
    }

    pub fn add_project(&mut self, name: &str, description: &str) -> String {
        if let Some(existing) = self.db.project_key(name) {
            return format!("⚠️ Le projet '{existing}' existe déjà.");
        }
        self.db
            .projects
            .insert(name.to_string(), Project::new(description));
        self.active_project = Some(name.to_string());
        self.persist();
        format!("✅ Projet '{name}' ajouté et défini comme projet actif.")
    }

    pub fn add_task(
        &mut self,
        project: Option<&str>,
        name: &str,
        deadline: Option<String>,
        estimate: Option<String>,
    ) -> String {
        let Some(key) = self.resolve_key(project) else {
            return "❌ Aucun projet trouvé ou actif.".to_string();
        };
        let Some(proj) = self.db.get_mut(&key) else {
            return "❌ Aucun projet trouvé ou actif.".to_string();
        };
        let task = create_task(proj.next_id(), name, deadline, estimate);
        let priority = task.priority;
        proj.insert(task);
        self.active_project = Some(key.clone());
        self.persist();
        format!("Tâche '{name}' ajoutée à {key} (priorité: {priority}).")
    }

    pub fn complete_task(&mut self, project: Option<&str>, name: &str) -> String {
        let Some(key) = self.resolve_key(project) else {
            return "❌ Aucun projet actif ou trouvé.".to_string();
        };
        let Some(proj) = self.db.get_mut(&key) else {
            return "❌ Aucun projet actif ou trouvé.".to_string();
        };
        let msg = if proj.mark_done(name) {
            format!("Tâche '{name}' marquée comme terminée ✅")
        } else {
            format!("Aucune tâche nommée '{name}' trouvée.")
        };
        self.active_project = Some(key);
        self.persist();
        msg
    }

    pub fn delete_task(&mut self, project: Option<&str>, name: &str) -> String {
        let Some(key) = self.resolve_key(project) else {
            return "❌ Aucun projet actif ou trouvé.".to_string();
        };
        let Some(proj) = self.db.get_mut(&key) else {
            return "❌ Aucun projet actif ou trouvé.".to_string();
        };
        let msg = if proj.remove_by_name(name) {
            format!("Tâche '{name}' supprimée 🗑️")
        } else {
            format!("Aucune tâche nommée '{name}' trouvée.")
        };
        self.active_project = Some(key);
        self.persist();
        msg
    }

    pub fn delete_project(&mut self, name: &str) -> String {
        let Some(key) = self.db.project_key(name) else {
            return format!("❌ Projet inconnu : {name}");
        };
        self.db.projects.remove(&key);
        if self.active_project.as_deref() == Some(key.as_str()) {
            self.active_project = None;
        }
        self.persist();
        format!("🗑️ Projet '{key}' supprimé.")
    }

    /// Ranked status view: tasks ordered by priority and deadline urgency,
    /// followed by the next-task suggestion.
    pub fn show_status(&mut self, project: Option<&str>) -> String {
        let Some(key) = self.resolve_key(project) else {
            return "❌ Aucun projet actif ou trouvé.".to_string();
        };
        let Some(proj) = self.db.get(&key) else {
            return "❌ Aucun projet actif ou trouvé.".to_string();
        };
        let today = Local::now().date_naive();
        let tasks = proj.tasks_in_order();
        let ranked = sort_tasks(&tasks, today);

        let mut lines = vec![format!("📁 {key} — {}", proj.description)];
        for t in &ranked {
            let status = if t.done { "✅" } else { "🕓" };
            let dl = t
                .deadline
                .as_deref()
                .map(|d| format!(" ⏰ {d}"))
                .unwrap_or_default();
            let est = t
                .estimate
                .as_deref()
                .map(|e| format!(" ⏱️ {e}"))
                .unwrap_or_default();
            lines.push(format!(" - {} ({}){dl}{est} {status}", t.name, t.priority));
        }
        lines.push(suggestion_line(&tasks));
        self.active_project = Some(key);
        lines.join("\n")
    }

    pub fn suggest(&mut self, project: Option<&str>) -> String {
        let Some(key) = self.resolve_key(project) else {
            return "❌ Aucun projet actif ou trouvé.".to_string();
        };
        let Some(proj) = self.db.get(&key) else {
            return "❌ Aucun projet actif ou trouvé.".to_string();
        };
        let tasks = proj.tasks_in_order();
        self.active_project = Some(key);
        suggestion_line(&tasks)
    }

    pub fn list_projects(&self) -> String {
        if self.db.projects.is_empty() {
            return "Aucun projet.".to_string();
        }
        self.db
            .projects
            .iter()
            .map(|(name, p)| format!("• {name} — {} tâche(s)", p.len()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Interpret one sentence, validate the required fields for its action,
    /// and dispatch. Every failure path is a message, never a panic.
    pub fn interpret(&mut self, text: &str) -> String {
        let cmd = self.parse_command(text);
        let project = cmd.project.as_deref();

        match cmd.action {
            Action::Unknown => "🤔 Je n'ai pas compris la commande.".to_string(),
            Action::AddProject => match project {
                Some(name) => {
                    let name = name.to_string();
                    self.add_project(&name, cmd.description.as_deref().unwrap_or(""))
                }
                None => "❌ Il manque le nom du projet.".to_string(),
            },
            Action::AddTask => match self.require_task_fields(&cmd) {
                Ok(task_name) => self.add_task(project, &task_name, cmd.deadline, cmd.estimate),
                Err(msg) => msg,
            },
            Action::CompleteTask => match self.require_task_fields(&cmd) {
                Ok(task_name) => self.complete_task(project, &task_name),
                Err(msg) => msg,
            },
            Action::DeleteTask => match self.require_task_fields(&cmd) {
                Ok(task_name) => self.delete_task(project, &task_name),
                Err(msg) => msg,
            },
            Action::DeleteProject => match project {
                Some(name) => {
                    let name = name.to_string();
                    self.delete_project(&name)
                }
                None => "❌ Il faut préciser le projet à supprimer.".to_string(),
            },
            Action::ShowProject => {
                if project.is_none() && self.active_project.is_none() {
                    return "❌ Il faut préciser quel projet tu veux voir.".to_string();
                }
                self.show_status(project)
            }
        }
    }

    /// Task-level actions need a project (explicit or active) and a task name.
    fn require_task_fields(&self, cmd: &Command) -> Result<String, String> {
        if cmd.project.is_none() && self.active_project.is_none() {
            return Err("❌ Il manque le nom du projet.".to_string());
        }
        match &cmd.task_name {
            Some(name) => Ok(name.clone()),
            None => Err("❌ Il manque le nom de la tâche.".to_string()),
        }
    }
}

fn suggestion_line(tasks: &[crate::task::Task]) -> String {
    match suggest_next(tasks) {
        Suggestion::Task(t) => {
            format!("Prochaine tâche recommandée : {} (priorité: {})", t.name, t.priority)
        }
        Suggestion::AllDone => "✅ Toutes les tâches sont terminées.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(tag: &str) -> Agent {
        let path = std::env::temp_dir().join(format!(
            "parlo_agent_{tag}_{}.json",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        Agent::with_database(Database::default(), path)
    }

    #[test]
    fn duplicate_projects_are_rejected_case_insensitively() {
        let mut a = agent("dup");
        assert!(a.add_project("Alpha", "demo").contains("ajouté"));
        assert!(a.add_project("ALPHA", "autre").contains("existe déjà"));
    }

    #[test]
    fn interpreted_pipeline_end_to_end() {
        let mut a = agent("e2e");
        a.add_project("Alpha", "suivi des releases");

        let msg = a.interpret(
            "ajoute une tâche urgente corriger les bugs dans le projet Alpha avant le 2025-10-31",
        );
        assert!(msg.contains("Corriger les bugs"), "{msg}");
        assert!(msg.contains("haute"), "{msg}");

        let msg = a.interpret("J'ai fini la tâche corriger les bugs dans le projet Alpha");
        assert!(msg.contains("terminée"), "{msg}");
    }

    #[test]
    fn active_project_fallback() {
        let mut a = agent("active");
        a.add_project("Alpha", "demo");
        let msg = a.interpret("ajoute une tâche préparer la démo");
        assert!(msg.contains("ajoutée à Alpha"), "{msg}");
    }

    #[test]
    fn missing_project_is_a_message_not_a_crash() {
        let mut a = agent("missing");
        assert_eq!(
            a.interpret("ajoute une tâche corriger les bugs"),
            "❌ Il manque le nom du projet."
        );
    }

    #[test]
    fn missing_task_name_is_reported() {
        let mut a = agent("noname");
        a.add_project("Alpha", "demo");
        assert_eq!(
            a.interpret("ajoute une tâche dans le projet Alpha"),
            "❌ Il manque le nom de la tâche."
        );
    }

    #[test]
    fn unknown_sentence_is_not_understood() {
        let mut a = agent("unknown");
        assert_eq!(a.interpret("bonjour comment vas-tu"), "🤔 Je n'ai pas compris la commande.");
    }

    #[test]
    fn deleting_the_active_project_clears_the_fallback() {
        let mut a = agent("delactive");
        a.add_project("Alpha", "demo");
        assert!(a.delete_project("alpha").contains("supprimé"));
        assert_eq!(
            a.interpret("ajoute une tâche corriger les bugs"),
            "❌ Il manque le nom du projet."
        );
    }

    #[test]
    fn status_lists_ranked_tasks_and_suggestion() {
        let mut a = agent("status");
        a.add_project("Alpha", "demo");
        a.add_task(Some("Alpha"), "écrire les tests", None, None);
        a.add_task(Some("Alpha"), "corriger bug login", None, None);

        let status = a.show_status(Some("Alpha"));
        assert!(status.contains("📁 Alpha"), "{status}");
        // haute task ranks above the basse one and is the suggestion.
        let bug_pos = status.find("corriger bug login").unwrap();
        let test_pos = status.find("écrire les tests").unwrap();
        assert!(bug_pos < test_pos, "{status}");
        assert!(status.contains("Prochaine tâche recommandée : corriger bug login"), "{status}");
    }

    #[test]
    fn all_done_suggestion_sentinel() {
        let mut a = agent("alldone");
        a.add_project("Alpha", "demo");
        a.add_task(Some("Alpha"), "corriger bug login", None, None);
        a.complete_task(Some("Alpha"), "corriger bug login");
        assert_eq!(a.suggest(Some("Alpha")), "✅ Toutes les tâches sont terminées.");
    }
}
