use clap::Parser;
use encore::cli::{Cli, Commands};
use encore::cli_handlers::{CommandContext, from_cli};
use encore::config::{AppConfig, LOG_FILE, config_root, default_config_path};
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let data_dir = config_root()?;
    // The player owns the terminal, so its log goes to a file
    let log_to_file = matches!(cli.command, Commands::Play { .. });
    init_logging(cli.verbose, log_to_file.then_some(data_dir.as_path()));

    let config_path = match cli.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let config = AppConfig::load(&config_path)?;

    let ctx = CommandContext::new(config, data_dir);
    from_cli(cli.command).execute(&ctx)
}

/// RUST_LOG wins over `--verbose`.
fn init_logging(verbose: bool, file_dir: Option<&Path>) {
    let log_level = if verbose { "debug" } else { "info" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level));

    if let Some(dir) = file_dir {
        let file = fs::create_dir_all(dir).and_then(|_| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join(LOG_FILE))
        });
        match file {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            // Without a log file, stay quiet rather than draw over the screen
            Err(_) => {
                builder.filter_level(log::LevelFilter::Off);
            }
        }
    }

    builder.init();
}
