// ABOUTME: Command-line entry point: argument parsing and process exit

use clap::Parser;
use lispy::driver::Lispy;
use std::path::PathBuf;

/// The Lispy interpreter
#[derive(Parser, Debug)]
#[command(name = "lispy")]
#[command(version = lispy::config::VERSION)]
#[command(about = "The Lispy interpreter")]
struct CliArgs {
    /// Run the REPL, even when -e is present or files are given
    #[arg(short, long)]
    interactive: bool,

    /// Eval program given as string (can be repeated)
    #[arg(short = 'e', long = "eval", value_name = "PROGRAM", action = clap::ArgAction::Append)]
    eval: Vec<String>,

    /// Read programs from scripts
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,
}

fn main() {
    let args = CliArgs::parse();

    let mut lispy = match Lispy::new() {
        Ok(lispy) => lispy,
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(1);
        }
    };

    let code = lispy.run(args.interactive, &args.eval, &args.files);
    std::process::exit(code);
}
