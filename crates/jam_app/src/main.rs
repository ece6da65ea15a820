mod cli;
mod headless;
mod platform;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let mut cli = Cli::parse();
    let level = jam_logging::level_from_str(&cli.log_level);
    let settings = cli.api_settings();

    match cli.command.take() {
        None => {
            platform::logging::initialize(
                platform::logging::LogDestination::File(cli.log_file.clone()),
                level,
            );
            let location = match cli.explicit_location()? {
                Some(location) => location,
                None => platform::restore_location(&cli.state_file),
            };
            platform::run_app(platform::AppConfig {
                settings,
                location,
                poll_interval: cli.poll_interval(),
                state_file: cli.state_file,
            })
        }
        Some(command) => {
            platform::logging::initialize(platform::logging::LogDestination::Terminal, level);
            match command {
                Command::Collections => headless::list_collections(&settings),
                Command::Companies { offset, limit } => {
                    headless::list_companies(&settings, offset, limit)
                }
                Command::Copy {
                    source,
                    target,
                    ids,
                } => headless::copy(&settings, source, target, ids),
            }
        }
    }
}
