//! Entry point for the Falcon CLI.
use std::process::ExitCode;

use falcon_cli::{
    cli::{Dispatcher, RuntimeExit},
    commands::build_registry,
    config::EnvSnapshot,
    lib::prompt::{self, DISABLE_PROMPT_ENV},
};

fn main() -> ExitCode {
    match bootstrap() {
        Ok(_) => ExitCode::SUCCESS,
        Err(exit) => exit.report(),
    }
}

fn bootstrap() -> Result<(), RuntimeExit> {
    let tree = build_registry().map_err(RuntimeExit::from_error)?;
    let env = EnvSnapshot::capture();
    let prompter = prompt::for_terminal(env.is_true(DISABLE_PROMPT_ENV));
    let dispatcher = Dispatcher::new(tree, env).with_tracing(true);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    dispatcher.dispatch(std::env::args_os(), &mut out, prompter.as_ref())
}
