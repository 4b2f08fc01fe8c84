//! Natural-language command interpretation.
//!
//! Rule-based, deterministic classification: no statistical NLP. A sentence
//! is normalized, matched against an ordered table of classification rules
//! (first match wins), and mined for entities (project name, deadline,
//! estimate, description). The task label is whatever remains once known
//! entities and stop words are stripped out.
//!
//! All tables live in an injectable [`RuleSet`] so alternate vocabularies can
//! be tested or swapped without touching the control flow. The pipeline never
//! fails: unmatched input classifies as `unknown` and malformed optional
//! entities degrade to best-effort strings.

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::fields::{Action, Priority};

/// Structured result of interpreting one sentence, consumed immediately by
/// the orchestration layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Command {
    pub action: Action,
    pub project: Option<String>,
    pub task_name: Option<String>,
    /// ISO `YYYY-MM-DD` when the matched token parses strictly, otherwise
    /// the matched date phrase verbatim.
    pub deadline: Option<String>,
    pub estimate: Option<String>,
    pub priority: Priority,
    pub description: Option<String>,
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "action: {}", self.action)?;
        if let Some(p) = &self.project {
            writeln!(f, "project: {p}")?;
        }
        if let Some(t) = &self.task_name {
            writeln!(f, "task_name: {t}")?;
        }
        if let Some(d) = &self.deadline {
            writeln!(f, "deadline: {d}")?;
        }
        if let Some(e) = &self.estimate {
            writeln!(f, "estimate: {e}")?;
        }
        write!(f, "priority: {}", self.priority)?;
        if let Some(d) = &self.description {
            write!(f, "\ndescription: {d}")?;
        }
        Ok(())
    }
}

/// One classification rule: a predicate over the normalized text plus the
/// action it yields. Keyword groups are substring sets; every group must
/// contribute at least one hit. A compiled pattern, when present, must match
/// as well.
pub struct ActionRule {
    pub action: Action,
    pub keyword_groups: Vec<Vec<String>>,
    pub pattern: Option<Regex>,
}

impl ActionRule {
    pub fn keywords(action: Action, groups: &[&[&str]]) -> Self {
        ActionRule {
            action,
            keyword_groups: groups.iter().map(|g| words(g)).collect(),
            pattern: None,
        }
    }

    pub fn pattern(action: Action, pattern: &str) -> Self {
        ActionRule {
            action,
            keyword_groups: Vec::new(),
            pattern: Some(Regex::new(pattern).unwrap()),
        }
    }

    pub fn matches(&self, text: &str) -> bool {
        if self.keyword_groups.is_empty() && self.pattern.is_none() {
            return false;
        }
        let groups_hit = self
            .keyword_groups
            .iter()
            .all(|group| group.iter().any(|kw| text.contains(kw.as_str())));
        let pattern_hit = self.pattern.as_ref().map_or(true, |re| re.is_match(text));
        groups_hit && pattern_hit
    }
}

/// Classification rules, entity patterns, and keyword vocabularies for one
/// language. `RuleSet::default()` carries the French tables.
pub struct RuleSet {
    /// Ordered; the first matching rule decides the action.
    pub actions: Vec<ActionRule>,
    pub project_re: Regex,
    /// Removes the whole project phrase (connective included) when carving
    /// out the task label.
    pub project_strip_re: Regex,
    pub date_re: Regex,
    pub estimate_re: Regex,
    pub description_re: Regex,
    /// Verb-led task phrase: an action verb followed by the rest of the line.
    pub task_verb_re: Regex,
    /// Whole-word removals applied before isolating the task label.
    pub stop_words: Vec<String>,
    /// Sentence-level priority cues, high checked before low.
    pub high_cues: Vec<String>,
    pub low_cues: Vec<String>,
}

const DATE_PATTERN: &str = r"\d{4}-\d{2}-\d{2}|\d{1,2}\s*(?:janvier|février|mars|avril|mai|juin|juillet|août|septembre|octobre|novembre|décembre)\s*\d{4}";

impl Default for RuleSet {
    fn default() -> Self {
        let creation: &[&str] = &["ajoute", "crée", "nouveau", "nouvelle", "ajouter"];
        let deletion: &[&str] = &["supprime", "supprimer", "efface", "enlève", "retire"];
        let task_noun: &[&str] = &["tâche", "tache"];

        RuleSet {
            actions: vec![
                // Creation and deletion share verbs; the object noun
                // disambiguates, and the task noun is checked first.
                ActionRule::keywords(Action::AddTask, &[creation, task_noun]),
                ActionRule::keywords(Action::AddProject, &[creation, &["projet"]]),
                // Completion before deletion: "la tâche est faite" carries
                // no create/delete verb and must not fall through to show.
                ActionRule::keywords(
                    Action::CompleteTask,
                    &[&["termine", "fini", "complète", "faite", "terminée", "achevée"]],
                ),
                ActionRule::pattern(
                    Action::DeleteProject,
                    r"(?:supprimer?|efface|enl[eè]ve|retire)\s+(?:le\s+)?projet",
                ),
                ActionRule::keywords(Action::DeleteTask, &[deletion, task_noun]),
                ActionRule::keywords(
                    Action::ShowProject,
                    &[&["montre", "affiche", "voir", "statut", "donne-moi l'état"]],
                ),
            ],
            project_re: Regex::new(r#"projet\s+"?([a-z0-9_-]+)"?"#).unwrap(),
            project_strip_re: Regex::new(
                r#"(?:dans\s+le\s+|pour\s+le\s+|du\s+|le\s+)?projet\s+"?[a-z0-9_-]+"?"#,
            )
            .unwrap(),
            date_re: Regex::new(DATE_PATTERN).unwrap(),
            estimate_re: Regex::new(r"\b\d+\s*(?:heures?|hours?|h|points?|pts?)\b").unwrap(),
            description_re: Regex::new(r"avec description\s+(.+)").unwrap(),
            task_verb_re: Regex::new(
                r"\b(?:corriger|faire|implémenter|ajouter|réparer|tester|documenter|préparer|mettre|corrigé|bug|erreur|test|documentation|version|build)\b\s+.*",
            )
            .unwrap(),
            stop_words: words(&[
                "avant", "pour", "dans", "à", "le", "la", "du", "de", "des", "une", "un",
                "tâche", "tache", "ajoute", "crée", "nouvelle", "urgent", "immédiat", "j'ai",
                "jai", "est", "faite", "terminée", "complète", "fini", "termine", "achevée",
                "supprime", "supprimer", "efface", "enlève", "retire", "s'il", "te", "plaît",
                "merci",
            ]),
            high_cues: words(&["urgent", "immédiat", "prioritaire", "critique", "bloquant"]),
            low_cues: words(&["optionnel", "secondaire", "test", "doc"]),
        }
    }
}

fn words(ws: &[&str]) -> Vec<String> {
    ws.iter().map(|s| s.to_string()).collect()
}

/// Lowercase and trim raw input.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Strip surrounding whitespace and quotes; empty strings collapse to None.
pub fn clean_name(name: &str) -> Option<String> {
    let cleaned = name.trim().trim_matches(|c| c == '"' || c == '\'').trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// The command-interpretation pipeline.
pub struct Interpreter {
    rules: RuleSet,
}

impl Default for Interpreter {
    fn default() -> Self {
        Interpreter::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter { rules: RuleSet::default() }
    }

    pub fn with_rules(rules: RuleSet) -> Self {
        Interpreter { rules }
    }

    /// Interpret one sentence into a structured command. Never fails:
    /// unmatched input yields `unknown`, absent entities stay None.
    pub fn parse(&self, text: &str) -> Command {
        let text = normalize(text);
        let action = self.classify_action(&text);
        let task_name = match action {
            Action::AddTask | Action::CompleteTask | Action::DeleteTask => {
                self.extract_task_name(&text)
            }
            _ => None,
        };
        let description = if action == Action::AddProject {
            self.extract_description(&text)
        } else {
            None
        };
        Command {
            action,
            project: self.extract_project(&text),
            task_name,
            deadline: self.extract_deadline(&text),
            estimate: self.extract_estimate(&text),
            priority: self.classify_priority(&text),
            description,
        }
    }

    /// First matching rule wins; no rule means `unknown`.
    pub fn classify_action(&self, text: &str) -> Action {
        self.rules
            .actions
            .iter()
            .find(|rule| rule.matches(text))
            .map(|rule| rule.action)
            .unwrap_or(Action::Unknown)
    }

    /// Sentence-level priority: high cues beat low cues, absence of both is
    /// `moyenne`. Cues are substring matches, so "urgente" triggers "urgent".
    pub fn classify_priority(&self, text: &str) -> Priority {
        if self.rules.high_cues.iter().any(|k| text.contains(k.as_str())) {
            Priority::Haute
        } else if self.rules.low_cues.iter().any(|k| text.contains(k.as_str())) {
            Priority::Basse
        } else {
            Priority::Moyenne
        }
    }

    pub fn extract_project(&self, text: &str) -> Option<String> {
        self.rules
            .project_re
            .captures(text)
            .and_then(|c| clean_name(c.get(1).map_or("", |m| m.as_str())))
    }

    /// ISO tokens are round-tripped through a strict parse so invalid
    /// calendar dates degrade to the verbatim token; French long dates pass
    /// through as written. Extraction never fails.
    pub fn extract_deadline(&self, text: &str) -> Option<String> {
        let token = self.rules.date_re.find(text)?.as_str();
        if token.contains('-') {
            match NaiveDate::parse_from_str(token, "%Y-%m-%d") {
                Ok(d) => Some(d.format("%Y-%m-%d").to_string()),
                Err(_) => Some(token.to_string()),
            }
        } else {
            Some(token.to_string())
        }
    }

    pub fn extract_estimate(&self, text: &str) -> Option<String> {
        self.rules
            .estimate_re
            .find(text)
            .map(|m| m.as_str().to_string())
    }

    pub fn extract_description(&self, text: &str) -> Option<String> {
        self.rules
            .description_re
            .captures(text)
            .and_then(|c| clean_name(c.get(1).map_or("", |m| m.as_str())))
    }

    /// Carve the task label out of the sentence: drop the project and date
    /// spans, drop stop words token-wise, then prefer a verb-led phrase over
    /// the raw remainder. An empty remainder stays None; no placeholder is
    /// ever invented.
    pub fn extract_task_name(&self, text: &str) -> Option<String> {
        let stripped = self.rules.project_strip_re.replace_all(text, " ");
        let stripped = self.rules.date_re.replace_all(&stripped, " ");
        let kept: Vec<&str> = stripped
            .split_whitespace()
            .filter(|token| {
                let bare = token.trim_matches(|c: char| {
                    matches!(c, '"' | '\'' | ',' | '.' | '!' | '?' | ';' | ':')
                });
                !self.rules.stop_words.iter().any(|s| s == bare)
            })
            .collect();
        let cleaned = kept.join(" ");
        let label = match self.rules.task_verb_re.find(&cleaned) {
            Some(m) => m.as_str(),
            None => cleaned.as_str(),
        };
        clean_name(label).map(|name| capitalize(&name))
    }
}
