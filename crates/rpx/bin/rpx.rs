//! rpx command-line calculator.
//!
//! Usage:
//!   rpx [ commands ]   Arguments become initial calculator input
//!   rpx                Interactive; reads lines from stdin
//!
//! The RPX_INIT environment variable, if set, is evaluated first with
//! its output suppressed (useful for setting a preferred mode or
//! precision). Comments run from '#' to end of line. The process exit
//! status reflects the top of stack: 0 when non-zero, 1 when zero, 2
//! when the stack is empty.

use std::env;
use std::io::{self, BufRead, IsTerminal, Write};
use std::process::ExitCode;

use rpx::{Engine, Outcome, OutputLine};

fn usage(progname: &str) -> ExitCode {
    eprintln!("usage: {} [ commands ]", progname);
    eprintln!("  'commands' will be used as initial program input");
    eprintln!("  Use \"{} help\" for documentation.", progname);
    ExitCode::from(1)
}

/// Strip a '#' comment. Fancier input scrubbing (locale digit
/// separators, currency symbols) belongs to an outer preprocessor.
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(i) => &line[..i],
        None => line,
    }
}

fn flush_output(engine: &mut Engine, suppress_stdout: bool) {
    for line in engine.take_output() {
        match line {
            OutputLine::Stdout(s) => {
                if !suppress_stdout {
                    println!("{}", s);
                }
            }
            OutputLine::Stderr(s) => eprintln!("{}", s),
        }
    }
    let _ = io::stdout().flush();
}

/// Evaluate one line and flush its output; `Some` means exit now.
fn run_line(engine: &mut Engine, line: &str, suppress_stdout: bool) -> Option<u8> {
    let outcome = engine.eval_line(strip_comment(line));
    flush_output(engine, suppress_stdout);
    match outcome {
        Outcome::Exit(code) => Some(code.clamp(0, 255) as u8),
        Outcome::Continue => None,
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let progname = args
        .first()
        .map(|a| a.rsplit('/').next().unwrap_or(a).to_string())
        .unwrap_or_else(|| "rpx".to_string());

    // only numbers may start with '-'; any other hyphen use asks for help
    if let Some(first) = args.get(1) {
        let mut chars = first.chars();
        if chars.next() == Some('-') && !chars.next().is_some_and(|c| c.is_ascii_digit()) {
            return usage(&progname);
        }
    }

    let mut engine = Engine::new();

    // environment seeding runs before anything else, silently
    if let Ok(seed) = env::var("RPX_INIT") {
        if let Some(code) = run_line(&mut engine, &seed, true) {
            return ExitCode::from(code);
        }
    }

    // command line arguments become the first input line
    if args.len() > 1 {
        let line = args[1..].join(" ");
        if let Some(code) = run_line(&mut engine, &line, false) {
            return ExitCode::from(code);
        }
    }

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("{}: read error: {}", progname, e);
                return ExitCode::from(3);
            }
        };

        // when input is redirected, echo it so commands and results
        // interleave in the transcript
        if !interactive {
            println!("{}", line);
        }

        if let Some(code) = run_line(&mut engine, &line, false) {
            return ExitCode::from(code);
        }
    }

    // EOF: report the truth of the top of stack
    ExitCode::from(engine.finish().clamp(0, 255) as u8)
}
