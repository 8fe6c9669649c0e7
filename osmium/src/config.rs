use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use osmium_core::Position;

/// How pieces are drawn by the renderer.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, ValueEnum)]
pub enum PieceStyle {
    /// FEN letters, such as `K` and `p`.
    #[default]
    Ascii,
    /// Chess glyphs, such as `♚`.
    Unicode,
    /// Chess glyphs of the opposite color, for terminals with light backgrounds.
    UnicodeInverted,
}

/// How empty squares are drawn by the renderer.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, ValueEnum)]
pub enum BackgroundStyle {
    /// A dot on every empty square.
    Simple,
    /// `░░` for light squares and `▒▒` for dark squares.
    Shaded,
    /// `▒▒` for light squares and `░░` for dark squares.
    #[default]
    ShadedInverted,
}

/// Interactive chess position explorer.
#[derive(Parser, Clone, PartialEq, Eq, Debug, Default)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Start from this FEN string instead of the standard starting position.
    #[arg(short, long)]
    pub fen: Option<String>,

    /// Piece glyphs used when printing the board.
    #[arg(short, long, value_enum, default_value_t)]
    pub pieces: PieceStyle,

    /// Empty square style used when printing the board.
    #[arg(short, long, value_enum, default_value_t)]
    pub background: BackgroundStyle,

    /// Tint the board with ANSI colors.
    #[arg(short, long)]
    pub color: bool,

    /// Log at `debug` level unless `RUST_LOG` says otherwise.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// The position the shell starts from: the `--fen` position if one was given, else the
    /// starting position.
    pub fn initial_position(&self) -> Result<Position> {
        match &self.fen {
            Some(fen) => {
                Position::from_fen(fen).with_context(|| format!("Invalid --fen {fen:?}"))
            }
            None => Ok(Position::startpos()),
        }
    }
}
