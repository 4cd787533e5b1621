use std::{env, process};

use budget_view::{cli, init};

fn main() {
    init();

    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(err) = cli::run_cli(args) {
        // Command failures were already reported by the shell.
        if !matches!(err, cli::CliError::Command(_)) {
            eprintln!("Error: {err}");
        }
        process::exit(1);
    }
}
