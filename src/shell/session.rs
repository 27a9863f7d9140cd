//! Interactive session: prompt, input loop, start script, logging.

use std::path::{Path, PathBuf};

use anyhow::Context;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

use crate::config::Config;
use crate::core::{Result, VfsBackend};
use crate::shell::dispatch::{Dispatcher, Response, timestamp};
use crate::shell::log::LogSink;

/// One interactive shell session over a loaded VFS.
///
/// Owns the read-eval-print loop around the [`Dispatcher`]: each command is
/// fully parsed, executed, logged, and printed before the next read. The log
/// gets two lines per command: an audit line with the raw input and a result
/// line with the output.
pub struct Session {
    username: String,
    dispatcher: Dispatcher,
    log: LogSink,
    start_script: Option<PathBuf>,
}

impl Session {
    pub fn new(config: &Config, vfs: Box<dyn VfsBackend>) -> Session {
        Session {
            username: config.username.clone(),
            dispatcher: Dispatcher::new(vfs),
            log: LogSink::new(&config.log_file),
            start_script: config.start_script.clone(),
        }
    }

    fn prompt(&self) -> String {
        format!("{}:/{}$ ", self.username, self.dispatcher.cwd())
    }

    /// Runs one full command cycle: audit log, dispatch, result log.
    /// Blank input produces neither output nor log entries.
    pub fn handle_line(&mut self, line: &str) -> Option<Response> {
        if line.trim().is_empty() {
            return None;
        }
        self.log
            .append(&format!("{} {} {}", self.username, timestamp(), line));
        let response = self.dispatcher.dispatch(line)?;
        self.log
            .append(&format!("{} {}", timestamp(), response.output));
        Some(response)
    }

    /// Runs the interactive loop until `exit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        self.log.truncate();
        self.log
            .append(&format!("{} Welcome to the Shell Emulator!", timestamp()));
        println!("Welcome to the Shell Emulator!");

        if let Some(script) = self.start_script.clone() {
            if self.run_start_script(&script) {
                return Ok(());
            }
        }

        let mut rl: Editor<(), DefaultHistory> =
            Editor::new().context("cannot create line editor")?;

        loop {
            match rl.readline(&self.prompt()) {
                Ok(line) => {
                    let _ = rl.add_history_entry(line.as_str());
                    if let Some(response) = self.handle_line(&line) {
                        println!("{}", response.output);
                        if response.exit {
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("^D");
                    break;
                }
                Err(err) => return Err(err.into()),
            }
        }

        Ok(())
    }

    /// Feeds start script lines through the normal command cycle.
    /// Returns true when the script requested exit.
    fn run_start_script(&mut self, path: &Path) -> bool {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(error = %e, path = %path.display(), "cannot read start script");
                return false;
            }
        };

        for line in content.lines() {
            println!("{}{}", self.prompt(), line);
            if let Some(response) = self.handle_line(line) {
                println!("{}", response.output);
                if response.exit {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    use crate::vfs::{ArchiveMember, EntryKind, TreeFS};

    fn fixture_vfs() -> Box<dyn VfsBackend> {
        Box::new(TreeFS::from_members(vec![
            ArchiveMember {
                path: "root_folder/".to_string(),
                kind: EntryKind::Directory,
                mode: 0o755,
                owner: String::new(),
            },
            ArchiveMember {
                path: "root_folder/test.py".to_string(),
                kind: EntryKind::File,
                mode: 0o644,
                owner: String::new(),
            },
        ]))
    }

    fn make_session(tmp: &TempDir) -> (Session, PathBuf) {
        let log_path = tmp.path().join("session.log");
        let config = Config {
            username: "alice".to_string(),
            log_file: log_path.clone(),
            vfs: PathBuf::from("unused.zip"),
            start_script: None,
            mode: Default::default(),
        };
        (Session::new(&config, fixture_vfs()), log_path)
    }

    #[test]
    fn test_prompt_renders_username_and_cwd() {
        let tmp = TempDir::new("arcsh-session").unwrap();
        let (mut session, _) = make_session(&tmp);

        assert_eq!(session.prompt(), "alice:/$ ");
        session.handle_line("cd root_folder");
        assert_eq!(session.prompt(), "alice:/root_folder$ ");
    }

    #[test]
    fn test_command_cycle_writes_audit_and_result_lines() {
        let tmp = TempDir::new("arcsh-session").unwrap();
        let (mut session, log_path) = make_session(&tmp);

        let response = session.handle_line("echo hi").unwrap();
        assert_eq!(response.output, "hi");

        let log = std::fs::read_to_string(&log_path).unwrap();
        let lines: Vec<&str> = log.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("alice "));
        assert!(lines[0].ends_with(" echo hi"));
        assert!(lines[1].ends_with(" hi"));
    }

    #[test]
    fn test_blank_line_writes_nothing() {
        let tmp = TempDir::new("arcsh-session").unwrap();
        let (mut session, log_path) = make_session(&tmp);

        assert!(session.handle_line("   ").is_none());
        assert!(!log_path.exists());
    }

    #[test]
    fn test_start_script_runs_through_command_cycle() {
        let tmp = TempDir::new("arcsh-session").unwrap();
        let (mut session, log_path) = make_session(&tmp);

        let script = tmp.path().join("start.txt");
        std::fs::write(&script, "cd root_folder\nexit\n").unwrap();

        assert!(session.run_start_script(&script));
        assert_eq!(session.dispatcher.cwd(), "root_folder");

        let log = std::fs::read_to_string(&log_path).unwrap();
        assert!(log.contains("cd root_folder"));
        assert!(log.contains("Exiting..."));
    }

    #[test]
    fn test_missing_start_script_is_not_fatal() {
        let tmp = TempDir::new("arcsh-session").unwrap();
        let (mut session, _) = make_session(&tmp);
        assert!(!session.run_start_script(Path::new("/nonexistent/start.txt")));
    }
}
