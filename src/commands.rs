use std::{
    collections::BTreeMap,
    io::{self, Write},
    path::Path,
};

use crate::{
    cli::{Console, Context},
    error::CommandError,
    logo::{self, Palette, LOGO_FILENAME},
};

const COPYRIGHT_YEARS: &str = "2012";

pub type Handler = fn(&Context<'_>, &mut Console<'_>) -> Result<(), CommandError>;

pub struct Command {
    pub name: &'static str,
    pub summary: &'static str,
    pub run: Handler,
}

/// Every command, keyed by the exact token that selects it.
pub fn registry() -> BTreeMap<&'static str, Command> {
    [
        Command {
            name: "help",
            summary: "show help on a command",
            run: help,
        },
        Command {
            name: "logo",
            summary: "create a logo",
            run: create_logo,
        },
        Command {
            name: "usage",
            summary: "show a short usage hint",
            run: usage,
        },
        Command {
            name: "version",
            summary: "show version information",
            run: version,
        },
    ]
    .into_iter()
    .map(|command| (command.name, command))
    .collect()
}

fn help(context: &Context<'_>, console: &mut Console<'_>) -> Result<(), CommandError> {
    let prog_name = &context.options.prog_name;
    match context.operands().first().map(String::as_str) {
        None => write_help(console.out, prog_name)?,
        Some("logo") => write_logo_help(console.out, prog_name)?,
        Some(other) => {
            writeln!(console.err, "No help available for command '{other}'!\n")?;
            write_commands(console.out, prog_name)?;
        }
    }
    Ok(())
}

fn create_logo(context: &Context<'_>, _console: &mut Console<'_>) -> Result<(), CommandError> {
    for (i, arg) in context.args.iter().enumerate() {
        log::debug!("argv[{i}]: '{arg}'");
    }
    let palette = Palette::from_args(context.operands())?;
    logo::save(logo::paint(&palette), Path::new(LOGO_FILENAME))
}

fn usage(context: &Context<'_>, console: &mut Console<'_>) -> Result<(), CommandError> {
    write_usage(console.err, &context.options.prog_name)?;
    Ok(())
}

fn version(context: &Context<'_>, console: &mut Console<'_>) -> Result<(), CommandError> {
    write_version(console.out, &context.options.prog_name)?;
    Ok(())
}

pub fn write_help(out: &mut dyn Write, prog_name: &str) -> io::Result<()> {
    writeln!(
        out,
        "Usage: {prog_name} [GLOBALOPTIONS] [COMMAND] [PARAMETERS]"
    )?;
    writeln!(out)?;
    writeln!(out, "Global options are:")?;
    writeln!(out, "  -d, --debug    additional debug output")?;
    writeln!(out, "  -v, --verbose  more messages")?;
    writeln!(out)?;
    writeln!(out, "  -V, --version  show version information and exit")?;
    writeln!(out, "  -h, --help     show this help and exit")?;
    writeln!(out)?;
    write_commands(out, prog_name)
}

pub fn write_commands(out: &mut dyn Write, prog_name: &str) -> io::Result<()> {
    writeln!(out, "Commands are:")?;
    for command in registry().values() {
        writeln!(out, "  {:<15}{}", command.name, command.summary)?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "Use '{prog_name} help COMMAND' for getting more help on a command."
    )
}

pub fn write_logo_help(out: &mut dyn Write, prog_name: &str) -> io::Result<()> {
    let [c1, c2, c3, c4] = Palette::default().levels();
    writeln!(out, "{prog_name} [GLOBALOPTIONS] logo [C1 C2 C3 C4]")?;
    writeln!(out)?;
    writeln!(
        out,
        "Paints a {size}x{size} striped logo and writes it to '{LOGO_FILENAME}'.",
        size = logo::LOGO_SIZE
    )?;
    writeln!(out)?;
    writeln!(out, "  C1 .. C4       grey levels 0-255, background first")?;
    writeln!(out, "                 (default: {c1} {c2} {c3} {c4})")
}

pub fn write_usage(out: &mut dyn Write, prog_name: &str) -> io::Result<()> {
    writeln!(out, "Try '{prog_name} --help' to see possible parameters.")
}

pub fn write_version(out: &mut dyn Write, prog_name: &str) -> io::Result<()> {
    writeln!(out, "{prog_name} {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "Copyright {COPYRIGHT_YEARS} Netz39 e.V.")
}
