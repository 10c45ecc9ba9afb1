//! Shell completion generation

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use scrubline::cli::Cli;

pub fn handle(shell: Shell) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    generate(shell, &mut command, name, &mut io::stdout());
}
