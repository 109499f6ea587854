//! Global flag parsing and command dispatch.

use std::{io::Write, path::Path};

use log::LevelFilter;
use thiserror::Error;

use crate::{
    commands::{self, write_usage},
    error::{CommandError, Status},
};

const DEFAULT_PROG_NAME: &str = "x16";

/// Per-run configuration, fixed once the flags are parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub prog_name: String,
    pub debug: bool,
    pub verbose: bool,
}
impl Options {
    pub fn new(prog_name: impl Into<String>) -> Self {
        Self {
            prog_name: prog_name.into(),
            debug: false,
            verbose: false,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.debug {
            LevelFilter::Debug
        } else if self.verbose {
            LevelFilter::Info
        } else {
            LevelFilter::Warn
        }
    }
}

/// What a handler sees: the whole argument vector and where its command
/// token sits in it.
#[derive(Debug)]
pub struct Context<'a> {
    pub options: Options,
    pub args: &'a [String],
    pub position: usize,
}
impl<'a> Context<'a> {
    pub fn command(&self) -> &'a str {
        &self.args[self.position]
    }

    /// Arguments after the command token.
    pub fn operands(&self) -> &'a [String] {
        &self.args[self.position + 1..]
    }
}

/// Output streams handed to handlers.
pub struct Console<'a> {
    pub out: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
}

#[derive(Debug)]
pub enum Invocation<'a> {
    Help(Options),
    Version(Options),
    Run(Context<'a>),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("No command given!")]
    NoCommand,

    #[error("Unknown command '{0}'!")]
    UnknownCommand(String),

    #[error("unrecognized option '--{0}'")]
    UnrecognizedOption(String),

    #[error("invalid option -- '{0}'")]
    InvalidOption(char),

    #[error("option '--{}' is ambiguous; possibilities: {}", .0, possibilities(.1))]
    AmbiguousOption(String, Vec<&'static str>),

    #[error("option '--{0}' doesn't allow an argument")]
    UnexpectedArgument(&'static str),
}

fn possibilities(names: &[&str]) -> String {
    names
        .iter()
        .map(|name| format!("'--{name}'"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flag {
    Debug,
    Help,
    Verbose,
    Version,
}

static LONG_FLAGS: [(&str, Flag); 4] = [
    ("debug", Flag::Debug),
    ("help", Flag::Help),
    ("verbose", Flag::Verbose),
    ("version", Flag::Version),
];

fn short_flag(c: char) -> Result<Flag, UsageError> {
    match c {
        'd' => Ok(Flag::Debug),
        'h' => Ok(Flag::Help),
        'v' => Ok(Flag::Verbose),
        'V' => Ok(Flag::Version),
        c => Err(UsageError::InvalidOption(c)),
    }
}

/// Resolves `--name` exactly or by unique prefix.
fn long_flag(arg: &str) -> Result<Flag, UsageError> {
    let (name, value) = match arg.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (arg, None),
    };
    let (full, flag) = match LONG_FLAGS.iter().find(|(long, _)| *long == name) {
        Some(&entry) => entry,
        None => {
            let candidates: Vec<_> = LONG_FLAGS
                .iter()
                .filter(|(long, _)| !name.is_empty() && long.starts_with(name))
                .collect();
            match candidates[..] {
                [&entry] => entry,
                [] => return Err(UsageError::UnrecognizedOption(arg.to_owned())),
                _ => {
                    return Err(UsageError::AmbiguousOption(
                        name.to_owned(),
                        candidates.iter().map(|(long, _)| *long).collect(),
                    ))
                }
            }
        }
    };
    match value {
        Some(_) => Err(UsageError::UnexpectedArgument(full)),
        None => Ok(flag),
    }
}

/// File name of argv[0], as shown in help and diagnostics.
pub fn program_name(args: &[String]) -> String {
    args.first()
        .and_then(|arg0| Path::new(arg0).file_name())
        .and_then(|name| name.to_str())
        .unwrap_or(DEFAULT_PROG_NAME)
        .to_owned()
}

/// Reads flags up to the first operand, which becomes the command.
///
/// `-h` and `-V` end parsing as soon as they are seen; `--` ends it and makes
/// the following argument the command.
pub fn parse(args: &[String]) -> Result<Invocation<'_>, UsageError> {
    let mut options = Options::new(program_name(args));
    let mut position = None;
    for (i, arg) in args.iter().enumerate().skip(1) {
        if arg == "--" {
            position = Some(i + 1).filter(|&p| p < args.len());
            break;
        }
        let flags: Vec<_> = if let Some(long) = arg.strip_prefix("--") {
            vec![long_flag(long)]
        } else if let Some(shorts) = arg.strip_prefix('-').filter(|s| !s.is_empty()) {
            shorts.chars().map(short_flag).collect()
        } else {
            position = Some(i);
            break;
        };
        for flag in flags {
            match flag? {
                Flag::Debug => options.debug = true,
                Flag::Verbose => options.verbose = true,
                Flag::Help => return Ok(Invocation::Help(options)),
                Flag::Version => return Ok(Invocation::Version(options)),
            }
        }
    }
    let position = position.ok_or(UsageError::NoCommand)?;
    Ok(Invocation::Run(Context {
        options,
        args,
        position,
    }))
}

pub fn execute(invocation: Invocation<'_>, console: &mut Console<'_>) -> Status {
    let result = match invocation {
        Invocation::Help(options) => commands::write_help(console.out, &options.prog_name),
        Invocation::Version(options) => commands::write_version(console.out, &options.prog_name),
        Invocation::Run(context) => return dispatch(&context, console),
    };
    finish(result.map_err(CommandError::from), console)
}

/// Looks the command up in the registry and runs its handler.
pub fn dispatch(context: &Context<'_>, console: &mut Console<'_>) -> Status {
    let registry = commands::registry();
    log::debug!(
        "argc: {}, command at: {}, options: {:?}",
        context.args.len(),
        context.position,
        context.options
    );
    match registry.get(context.command()) {
        Some(command) => finish((command.run)(context, console), console),
        None => report(
            &context.options.prog_name,
            &UsageError::UnknownCommand(context.command().to_owned()),
            console,
        ),
    }
}

/// Prints a usage error, with the usage hint where one helps.
pub fn report(prog_name: &str, error: &UsageError, console: &mut Console<'_>) -> Status {
    let written = match error {
        UsageError::NoCommand => writeln!(console.err, "{error}")
            .and_then(|()| write_usage(console.err, prog_name)),
        UsageError::UnknownCommand(_) => writeln!(console.err, "{error}"),
        _ => writeln!(console.err, "{prog_name}: {error}")
            .and_then(|()| write_usage(console.err, prog_name)),
    };
    // A failed write to stderr has nowhere left to be reported.
    let _ = written;
    Status::Unknown
}

/// Parses and executes in one go.
pub fn run(args: &[String], console: &mut Console<'_>) -> Status {
    match parse(args) {
        Ok(invocation) => execute(invocation, console),
        Err(error) => report(&program_name(args), &error, console),
    }
}

fn finish(result: Result<(), CommandError>, console: &mut Console<'_>) -> Status {
    match result {
        Ok(()) => Status::Success,
        Err(error) => {
            let _ = writeln!(console.err, "{error}");
            error.status()
        }
    }
}
