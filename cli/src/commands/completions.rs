//! `brightpath completions <shell>`: completion scripts for the `brightpath` binary.

use std::io::{self, Write};

use clap::CommandFactory as _;
use clap_complete::Shell;

use crate::cli::Cli;

/// Print the completion script for `shell` to stdout.
pub fn generate_completions(shell: Shell) {
    let mut stdout = io::stdout().lock();
    write_completions(shell, &mut stdout);
    stdout.flush().ok();
}

pub fn write_completions(shell: Shell, buf: &mut dyn Write) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "brightpath", buf);
}
