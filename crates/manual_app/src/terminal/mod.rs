//! Line-oriented front end: reads commands from stdin, feeds them through the
//! core `update` loop and prints the list after every change.

mod app;
pub mod config;
mod effects;
mod input;
mod render;

use std::io;
use std::sync::mpsc;

use anyhow::Context;
use log::LevelFilter;
use manual_engine::EngineHandle;
use manual_logging::{manual_info, LogDestination};

use crate::Args;
use app::TerminalApp;
use effects::EffectRunner;

pub fn run_app(args: Args) -> anyhow::Result<()> {
    let destination = if args.verbose {
        LogDestination::Both(args.log_file.clone())
    } else {
        LogDestination::File(args.log_file.clone())
    };
    manual_logging::initialize(destination, LevelFilter::Info);

    let settings = config::resolve_settings(config::load_file_config(&args.config), &args);
    manual_info!(
        "Starting with api_base={} output_dir={:?}",
        settings.catalog.api_base,
        settings.output_dir
    );

    let engine = EngineHandle::new(settings.catalog).context("failed to set up the catalog client")?;
    let runner = EffectRunner::new(engine, settings.output_dir, settings.open_in_browser);

    let (tx, rx) = mpsc::channel();
    app::spawn_stdin_reader(tx);

    let mut app = TerminalApp::new(runner, io::stdout());
    app.start(args.keyword.as_deref())?;
    app.run(rx)?;
    manual_info!("Exiting");
    Ok(())
}
