use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use assistant::{build_app, config, constants, display, AppSettings};
use clap::Parser;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[clap(name = "deskmate")]
#[clap(about = "Keyword voice assistant: weather, time, Wikipedia and websites", long_about = None)]
struct Args {
    /// Print responses without speaking them
    #[clap(long)]
    no_speech: bool,

    /// Number of history entries shown by :history
    #[clap(long, default_value_t = constants::DEFAULT_HISTORY_SIZE)]
    history: usize,

    /// Run a single command and exit
    #[clap(long)]
    command: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    config::init_environment();
    let args = Args::parse();

    let mut settings = AppSettings::from_env().context("Configuration error")?;
    if args.no_speech {
        settings.speech_enabled = false;
    }
    settings.history_size = args.history;

    if settings.openweather_api_key.is_none() {
        eprintln!("Note: OPENWEATHER_API_KEY is not set; weather commands will fail.");
    }

    let app = build_app(&settings).await?;
    info!("configuration loaded, voice input {}", if app.voice_available() { "on" } else { "off" });

    let mut stdout = io::stdout();

    if let Some(command) = args.command {
        app.handle_line(&command, &mut stdout).await?;
        return Ok(());
    }

    display::print_banner(&mut stdout)?;
    let stdin = io::stdin();

    loop {
        print!("{}", constants::PROMPT);
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match app.handle_line(&line, &mut stdout).await {
            Ok(true) => break,
            Ok(false) => {}
            Err(e) => {
                error!("turn failed: {:#}", e);
                eprintln!("Error: {}", e);
            }
        }
    }

    Ok(())
}
