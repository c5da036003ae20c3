mod cli;
mod logging;
mod settings;
mod terminal;
mod window;

use clap::Parser;
use cli::{Backend, Cli};
use colored::*;
use snake_core::{Ending, GameSummary};
use std::process;

fn print_summary(summary: &GameSummary) {
    let ending = match summary.ending {
        Ending::Collided => "Game over".bright_red().bold(),
        Ending::BoardFull => "Board full, you win".bright_green().bold(),
        Ending::Quit => "Quit".bright_yellow().bold(),
    };
    println!("{ending}");
    println!("  {} {}", "Score: ".bright_cyan(), summary.score);
    println!("  {} {}", "Length:".bright_cyan(), summary.length);
    println!("  {} {}", "Ticks: ".bright_cyan(), summary.ticks);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_file.as_deref(), cli.backend)?;

    let mut config = match settings::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {e}", "Error".bright_red().bold());
            process::exit(1);
        }
    };
    if let Err(e) = cli.apply(&mut config) {
        eprintln!("{}: {e}", "Error".bright_red().bold());
        process::exit(2);
    }
    if let Err(e) = config.validate() {
        eprintln!("{}: {e}", "Error".bright_red().bold());
        process::exit(2);
    }

    let result = match cli.backend {
        Backend::Terminal => terminal::play(&config),
        Backend::Window => window::play(&config, cli.width, cli.height),
    };

    match result {
        Ok(summary) => {
            print_summary(&summary);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}: {e}", "Error".bright_red().bold());
            process::exit(1);
        }
    }
}
