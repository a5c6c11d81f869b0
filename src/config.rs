// ABOUTME: Constants for the interpreter: version, prompt, history file

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PROMPT: &str = "\x1b[1;32mlispy\x1b[0m> ";
pub const HISTORY_FILE: &str = ".lispy_history";
