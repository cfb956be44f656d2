use clap::Parser;
use log::{error, info};

use quizdance::cli::Cli;
use quizdance::loader;
use quizdance::picker::ContentPicker;
use quizdance::session::SessionState;
use quizdance::tui;

fn main() {
    pretty_env_logger::init();

    if let Err(e) = run() {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();

    let loaded =
        loader::load(&cli.path_or_dir, cli.texts.as_deref()).map_err(|e| e.to_string())?;

    let picker = match cli.seed {
        Some(seed) => ContentPicker::from_seed(seed),
        None => ContentPicker::new(),
    };

    let session = SessionState::new(loaded.quiz, loaded.texts, picker);
    info!("starting session: {}", session.full_title());

    tui::run_tui(session, loaded.base_dir)?;

    Ok(())
}
