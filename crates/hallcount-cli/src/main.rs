//! Interactive hall-effect encoder emulator.
//!
//! Binds the encoder driver to a mock sensor and reads commands from stdin.
//! Set `RUST_LOG` to control log output (default `info`).

mod command;
mod config;
mod emulator;

use anyhow::Result;
use command::Command;
use config::EmulatorConfig;
use emulator::{Emulator, Outcome};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = EmulatorConfig::from_env()?;
    let emulator = Emulator::start(config).await?;
    println!("hallcount {} - type 'help' for commands", hallcount_core::VERSION);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("error: {e}");
                continue;
            }
        };

        match emulator.execute(command).await {
            Ok(Outcome::Output(text)) => println!("{text}"),
            Ok(Outcome::Quit) => break,
            Err(e) => {
                warn!("command failed: {}", e);
                println!("error: {e} (errno {})", e.errno());
            }
        }
    }

    emulator.shutdown().await?;
    Ok(())
}
