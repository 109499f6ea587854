use std::{io, process::ExitCode};

use x16::cli::{self, Console, Invocation};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let (mut stdout, mut stderr) = (io::stdout().lock(), io::stderr().lock());
    let mut console = Console {
        out: &mut stdout,
        err: &mut stderr,
    };
    let status = match cli::parse(&args) {
        Ok(invocation) => {
            if let Invocation::Run(context) = &invocation {
                pretty_env_logger::formatted_builder()
                    .filter_level(context.options.log_level())
                    .init();
            }
            cli::execute(invocation, &mut console)
        }
        Err(error) => cli::report(&cli::program_name(&args), &error, &mut console),
    };
    status.into()
}
