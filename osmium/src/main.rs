use std::io;

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use osmium::{render_with, Config, Shell};
use osmium_core::{Position, FEN_ROOK_VS_KING};

fn main() -> Result<()> {
    let config = Config::parse();

    let mut logger = env_logger::Builder::new();
    if config.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.parse_default_env().init();

    // Print some metadata about the program
    let name = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");
    let authors = env!("CARGO_PKG_AUTHORS").replace(':', ", "); // Split multiple authors by comma-space
    println!("{name} {version} by {authors}");

    println!("{}", render_with(&Position::startpos(), &config));

    let position = config.initial_position()?;
    if config.fen.is_some() {
        println!("{}", render_with(&position, &config));
    } else {
        let sample = Position::from_fen(FEN_ROOK_VS_KING)?;
        println!("{}", render_with(&sample, &config));
    }

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    Shell::new(position, config, stdin, stdout).run()
}
