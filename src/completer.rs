use rustyline::completion::{Completer, FilenameCompleter, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper, Result};
use std::collections::HashMap;

use crate::router::ROUTES;

const COMMANDS: [&str; 10] = [
    "analyze", "history", "show", "health", "theme", "open", "home", "config", "help", "exit",
];
const CONFIG_ACTIONS: [&str; 3] = ["show", "set", "server-url"];
const CONFIG_KEYS: [&str; 7] = [
    "server_url",
    "api_base_path",
    "analyze_timeout_secs",
    "max_file_size_mb",
    "allowed_extensions",
    "page_size",
    "max_page_size",
];
const SEVERITIES: [&str; 3] = ["all", "error", "warning"];
const GLOBAL_FLAGS: [&str; 2] = ["--json", "--server"];

pub struct MdauditCompleter {
    flags: HashMap<&'static str, Vec<&'static str>>,
    files: FilenameCompleter,
}

impl MdauditCompleter {
    pub fn new() -> Self {
        let mut flags = HashMap::new();
        flags.insert("analyze", vec!["--keyword", "-k", "--export"]);
        flags.insert("history", vec!["--page", "--page-size", "--severity"]);
        flags.insert("show", vec!["--export"]);

        Self { flags, files: FilenameCompleter::new() }
    }

    /// Candidates for the word being typed, given the words before it.
    fn get_completions(&self, before: &[&str], word: &str) -> Vec<String> {
        let starts = |candidates: &[&str]| -> Vec<String> {
            candidates
                .iter()
                .filter(|c| c.starts_with(word))
                .map(|c| c.to_string())
                .collect()
        };

        let Some(&command) = before.first() else {
            return starts(&COMMANDS[..]);
        };

        match (command, before.last().copied()) {
            (_, Some("--severity")) => starts(&SEVERITIES[..]),
            ("open", _) if before.len() == 1 => {
                let paths: Vec<&str> = ROUTES.iter().map(|r| r.path).collect();
                starts(&paths[..])
            }
            ("config", _) if before.len() == 1 => starts(&CONFIG_ACTIONS[..]),
            ("config", Some("set")) => starts(&CONFIG_KEYS[..]),
            (cmd, _) if word.starts_with('-') => {
                let mut candidates: Vec<&str> = self.flags.get(cmd).cloned().unwrap_or_default();
                candidates.extend(GLOBAL_FLAGS);
                starts(&candidates[..])
            }
            _ => Vec::new(),
        }
    }
}

impl Default for MdauditCompleter {
    fn default() -> Self {
        Self::new()
    }
}

impl Completer for MdauditCompleter {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Result<(usize, Vec<Pair>)> {
        let line_up_to_pos = &line[..pos];
        let start_pos = line_up_to_pos.rfind(' ').map_or(0, |i| i + 1);
        let word = &line_up_to_pos[start_pos..];
        let before: Vec<&str> = line_up_to_pos[..start_pos].split_whitespace().collect();

        // file arguments
        let wants_path = matches!(before.first(), Some(&"analyze"))
            && !word.starts_with('-')
            && !matches!(before.last(), Some(&"-k") | Some(&"--keyword"));
        let wants_export = matches!(before.last(), Some(&"--export"));
        if wants_path || wants_export {
            return self.files.complete(line, pos, ctx);
        }

        Ok((
            start_pos,
            self.get_completions(&before, word)
                .into_iter()
                .map(|s| Pair {
                    display: s.clone(),
                    replacement: s,
                })
                .collect(),
        ))
    }
}

impl Helper for MdauditCompleter {}

impl Hinter for MdauditCompleter {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if line.is_empty() || pos < line.len() || line.contains(' ') {
            return None;
        }
        COMMANDS
            .iter()
            .find(|c| c.starts_with(line) && c.len() > line.len())
            .map(|c| c[line.len()..].to_string())
    }
}

impl Highlighter for MdauditCompleter {}
impl Validator for MdauditCompleter {}
