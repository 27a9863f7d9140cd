//! Command parsing and dispatch.
//!
//! One raw input line in, one result string out. The dispatcher owns the VFS
//! backing and the session cursor; every failure condition is converted to a
//! descriptive result string, nothing panics across this boundary.

use crate::core::{VfsBackend, utils};
use crate::vfs::{DirEntry, EntryKind};

/// Result of dispatching one command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// Text to print and log (may be empty, e.g. plain `echo`).
    pub output: String,
    /// True when the command requested session termination.
    pub exit: bool,
}

impl Response {
    fn output(output: String) -> Response {
        Response { output, exit: false }
    }
}

/// Parses raw input lines and routes them to VFS operations.
///
/// Holds the only mutable session state: the current-directory cursor.
/// The cursor is a canonical key (empty string = root) and moves only on a
/// successful `cd`.
pub struct Dispatcher {
    vfs: Box<dyn VfsBackend>,
    cwd: String,
}

impl Dispatcher {
    pub fn new(vfs: Box<dyn VfsBackend>) -> Dispatcher {
        Dispatcher {
            vfs,
            cwd: String::new(),
        }
    }

    /// Returns the current-directory cursor (canonical key, `""` = root).
    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    /// Dispatches one input line. Blank input is a no-op and yields `None`.
    ///
    /// Tokens are split on whitespace; the first is the command name. `echo`
    /// is the exception: its argument is the raw remainder of the line after
    /// the command token, so internal spacing round-trips exactly.
    pub fn dispatch(&mut self, line: &str) -> Option<Response> {
        let trimmed = line.trim();
        let mut parts = trimmed.split_whitespace();
        let command = parts.next()?;
        let args: Vec<&str> = parts.collect();

        let response = match command {
            "ls" => Response::output(self.list_directory()),
            "cd" => Response::output(self.change_directory(&args)),
            "chown" => Response::output(self.change_owner(&args)),
            "rmdir" => Response::output(self.remove_directory(&args)),
            "echo" => Response::output(echo_text(trimmed).to_string()),
            "date" => Response::output(timestamp()),
            "help" => Response::output(HELP_TEXT.to_string()),
            "exit" => Response {
                output: "Exiting...".to_string(),
                exit: true,
            },
            other => Response::output(format!("{}: command not found", other)),
        };
        Some(response)
    }

    fn list_directory(&self) -> String {
        if self.vfs.kind(&self.cwd) != Some(EntryKind::Directory) {
            return "Directory not found.".to_string();
        }
        self.vfs
            .children(&self.cwd)
            .iter()
            .map(render_entry)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn change_directory(&mut self, args: &[&str]) -> String {
        match args {
            [] => "cd: missing argument".to_string(),
            [path] => {
                let target = utils::resolve(&self.cwd, path);
                match self.vfs.kind(&target) {
                    Some(EntryKind::Directory) => {
                        self.cwd = target;
                        format!("Changed directory to /{}", self.cwd)
                    }
                    Some(EntryKind::File) => format!("cd: {}: not a directory", path),
                    None => format!("cd: {}: no such directory", path),
                }
            }
            _ => "cd: expected exactly one argument".to_string(),
        }
    }

    fn change_owner(&mut self, args: &[&str]) -> String {
        match args {
            [file, owner] => {
                let target = utils::resolve(&self.cwd, file);
                match self.vfs.set_owner(&target, owner) {
                    Ok(()) => format!("Changed owner of {} to {}", file, owner),
                    Err(e) => format!("chown: {}", e),
                }
            }
            [] | [_] => "chown: missing arguments".to_string(),
            _ => "chown: expected exactly two arguments".to_string(),
        }
    }

    fn remove_directory(&mut self, args: &[&str]) -> String {
        match args {
            [dir] => {
                let target = utils::resolve(&self.cwd, dir);
                // the cursor must never point at a removed path
                if target == self.cwd {
                    return "rmdir: cannot remove the current directory".to_string();
                }
                match self.vfs.remove_dir(&target) {
                    Ok(()) => format!("Removed directory {}", dir),
                    Err(e) => format!("rmdir: {}", e),
                }
            }
            [] => "rmdir: missing argument".to_string(),
            _ => "rmdir: expected exactly one argument".to_string(),
        }
    }
}

/// The raw remainder of an `echo` line: everything after the command token
/// and one separator space, internal whitespace preserved.
fn echo_text(trimmed: &str) -> &str {
    let rest = &trimmed["echo".len()..];
    rest.strip_prefix(' ').unwrap_or(rest)
}

fn render_entry(entry: &DirEntry) -> String {
    let kind = if entry.is_dir() { 'd' } else { '-' };
    let mut line = format!("{} {} ({:o})", kind, entry.name, entry.mode);
    if !entry.owner.is_empty() {
        line.push(' ');
        line.push_str(&entry.owner);
    }
    line
}

/// Current local time as `YYYY-MM-DD HH:MM:SS`.
pub(crate) fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

const HELP_TEXT: &str = "Available commands:
  ls                       - List directory contents
  cd <directory>           - Change directory
  rmdir <directory>        - Remove an empty directory
  date                     - Show current date and time
  echo <text>              - Print text
  chown <file> <new_owner> - Change owner of file
  help                     - Show this help message
  exit                     - Exit the shell emulator";
