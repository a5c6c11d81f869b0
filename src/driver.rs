// ABOUTME: Interpreter driver: session flags, prelude loading, -e strings,
// script files, and the interactive rustyline loop

use crate::builtins;
use crate::completer::LispyHelper;
use crate::config;
use crate::env::Environment;
use crate::error::LispError;
use crate::eval;
use crate::parser;
use crate::reader;
use crate::value::Value;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};
use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

pub const FLAG_INTERACTIVE: u8 = 1 << 0;
pub const FLAG_CLEAR_OUTPUT: u8 = 1 << 1;
pub const FLAG_FAIL_ON_ERROR: u8 = 1 << 2;
pub const FLAG_EXIT: u8 = 1 << 3;

// Builtins and the driver share the session flags through thread-local
// storage; the evaluator itself never touches them.
thread_local! {
    static FLAGS: Cell<u8> = const { Cell::new(0) };
}

pub fn raise_flag(flag: u8) {
    FLAGS.with(|flags| flags.set(flags.get() | flag));
}

pub fn clear_flag(flag: u8) {
    FLAGS.with(|flags| flags.set(flags.get() & !flag));
}

pub fn flag_set(flag: u8) -> bool {
    FLAGS.with(|flags| flags.get() & flag != 0)
}

pub fn reset_flags() {
    FLAGS.with(|flags| flags.set(0));
}

const PRELUDE: &str = include_str!("prelude.lspy");

/// Parse a source text and evaluate its top-level form list as one
/// S-expression. Parse failures come back as in-band error values.
pub fn eval_source(env: &Rc<Environment>, source: &str, origin: &str) -> Value {
    match parser::parse_string(source, origin) {
        Ok(ast) => eval::eval(env, reader::read(&ast)),
        Err(err) => Value::error(LispError::CouldNotLoadLibrary(err.to_string())),
    }
}

/// Evaluate the embedded prelude against the root environment, one form
/// at a time
pub fn load_prelude(env: &Rc<Environment>) -> Result<(), String> {
    let ast = parser::parse_string(PRELUDE, "<prelude>")
        .map_err(|err| Value::error(LispError::CouldNotLoadLibrary(err.to_string())).to_string())?;

    if let Value::SExpr(forms) = reader::read(&ast) {
        for form in forms {
            if let err @ Value::Error { .. } = eval::eval(env, form) {
                return Err(format!("Failed to load prelude: {err}"));
            }
        }
    }
    Ok(())
}

/// The interpreter driver: the root environment plus the exit status the
/// process should finish with.
pub struct Lispy {
    env: Rc<Environment>,
    exit_code: i32,
}

impl Lispy {
    /// Installs builtins and the prelude into a fresh root environment
    pub fn new() -> Result<Self, String> {
        reset_flags();
        let env = Environment::new();
        builtins::register_builtins(&env);
        load_prelude(&env)?;
        Ok(Lispy { env, exit_code: 0 })
    }

    pub fn env(&self) -> &Rc<Environment> {
        &self.env
    }

    /// Evaluates `-e` strings, then script files, then enters the REPL if
    /// both were empty or interactive mode was forced. Returns the process
    /// exit status.
    pub fn run(&mut self, interactive: bool, programs: &[String], files: &[PathBuf]) -> i32 {
        if !self.eval_strings(programs) {
            return self.exit_code;
        }
        if !self.load_files(files) {
            return self.exit_code;
        }

        if (programs.is_empty() && files.is_empty()) || interactive {
            raise_flag(FLAG_INTERACTIVE);
            builtins::register_commands(&self.env);
            self.run_interactive();
        }

        self.exit_code
    }

    fn eval_strings(&mut self, programs: &[String]) -> bool {
        raise_flag(FLAG_FAIL_ON_ERROR);
        for program in programs {
            let result = eval_source(&self.env, program, "<eval>");
            if !self.process_result(&result) {
                return false;
            }
        }
        clear_flag(FLAG_FAIL_ON_ERROR);
        true
    }

    fn load_files(&mut self, files: &[PathBuf]) -> bool {
        raise_flag(FLAG_FAIL_ON_ERROR);
        for file in files {
            let args = Value::SExpr(vec![Value::String(file.display().to_string())]);
            let result = builtins::scripts::builtin_load(&self.env, args);
            if !self.process_result(&result) {
                return false;
            }
        }
        clear_flag(FLAG_FAIL_ON_ERROR);
        true
    }

    fn run_interactive(&mut self) {
        let config = Config::builder().auto_add_history(true).build();
        let mut rl: Editor<LispyHelper, DefaultHistory> = match Editor::with_config(config) {
            Ok(editor) => editor,
            Err(err) => {
                eprintln!("Failed to initialize the REPL: {err}");
                return;
            }
        };
        rl.set_helper(Some(LispyHelper::new(self.env.clone())));
        let _ = rl.load_history(config::HISTORY_FILE);

        println!("Lispy Version {}", config::VERSION);
        println!("Press Ctrl+C to Exit\n");

        loop {
            match rl.readline(config::PROMPT) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    match parser::parse_string(&line, "<stdin>") {
                        Ok(ast) => {
                            let result = eval::eval(&self.env, reader::read(&ast));
                            if !self.process_result(&result) {
                                break;
                            }
                        }
                        Err(err) => eprintln!("{err}"),
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => {
                    eprintln!("Error: {err}");
                    break;
                }
            }
        }

        let _ = rl.save_history(config::HISTORY_FILE);
        if self.exit_code == 0 {
            println!("\nBye");
        }
    }

    /// Interprets a top-level result against the session flags. Returns
    /// whether the current source of input should keep going.
    fn process_result(&mut self, result: &Value) -> bool {
        if flag_set(FLAG_CLEAR_OUTPUT) {
            print!("\x1b[2J\x1b[H");
            clear_flag(FLAG_CLEAR_OUTPUT);
            return true;
        }

        if flag_set(FLAG_EXIT) {
            if let Value::Error { message, code } = result {
                self.exit_code = *code;
                if !message.is_empty() {
                    println!("Exiting with message: {message}");
                }
            }
            return false;
        }

        let is_error = matches!(result, Value::Error { .. });
        if flag_set(FLAG_INTERACTIVE) || is_error {
            println!("{result}");
        }

        if is_error && flag_set(FLAG_FAIL_ON_ERROR) {
            self.exit_code = 1;
            return false;
        }

        true
    }
}
