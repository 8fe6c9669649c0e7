use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use log::{error, info, warn};
use osmium_core::{Move, Position, Square};

use crate::{render_with, Config};

/// A command understood by the [`Shell`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Command {
    /// `position startpos` or `position fen <FEN>`
    SetPosition(Box<Position>),
    /// `fen`
    Fen,
    /// `print` or `d`
    Print,
    /// `moves`
    Moves,
    /// `move <uci>`
    MakeMove(Move),
    /// `piece <square>`
    Piece(Square),
    /// `check`
    Check,
    /// `help`
    Help,
    /// `quit` or `exit`
    Quit,
}

impl Command {
    /// Parses a single, non-empty line of input.
    ///
    /// # Example
    /// ```
    /// # use osmium::Command;
    /// # use osmium_core::{Move, Square};
    /// let cmd = Command::parse("move e2e4").unwrap();
    /// assert_eq!(cmd, Command::MakeMove(Move::new(Square::E2, Square::E4)));
    /// assert!(Command::parse("dance").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let (cmd, rest) = input.split_once(' ').unwrap_or((input, ""));
        let rest = rest.trim();

        match cmd {
            "position" => Self::parse_position_command(rest),
            "fen" => Ok(Self::Fen),
            "print" | "d" => Ok(Self::Print),
            "moves" => Ok(Self::Moves),
            "move" => Self::parse_move_command(rest),
            "piece" => Self::parse_piece_command(rest),
            "check" => Ok(Self::Check),
            "help" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            _ => bail!("unknown command {input:?}, try \"help\""),
        }
    }

    fn parse_position_command(rest: &str) -> Result<Self> {
        let position = match rest.split_once(' ').unwrap_or((rest, "")) {
            ("startpos", "") => Position::startpos(),
            ("fen", fen) if !fen.is_empty() => Position::from_fen(fen)?,
            _ => bail!("usage: position startpos | position fen <FEN>"),
        };

        Ok(Self::SetPosition(Box::new(position)))
    }

    fn parse_move_command(rest: &str) -> Result<Self> {
        if rest.is_empty() {
            bail!("usage: move <from><to>, such as \"move e2e4\"");
        }

        Ok(Self::MakeMove(Move::from_uci(rest)?))
    }

    fn parse_piece_command(rest: &str) -> Result<Self> {
        if rest.is_empty() {
            bail!("usage: piece <square>, such as \"piece e1\"");
        }

        Ok(Self::Piece(Square::from_uci(rest)?))
    }
}

/// Line-oriented command loop over a [`Position`].
///
/// Reads one command per line from `input` and writes every response to `output`. Bad input is
/// reported on `output` and the loop carries on; only I/O failures end it early.
pub struct Shell<R, W> {
    position: Position,
    config: Config,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Creates a new [`Shell`] over `position`, drawing boards as described by `config`.
    pub fn new(position: Position, config: Config, input: R, output: W) -> Self {
        Self {
            position,
            config,
            input,
            output,
        }
    }

    /// The position the shell is currently exploring.
    pub const fn position(&self) -> &Position {
        &self.position
    }

    /// Consumes the shell, returning its output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs until `quit` is received or `input` is exhausted.
    pub fn run(&mut self) -> Result<()> {
        let mut buffer = String::with_capacity(2048);

        loop {
            buffer.clear();
            let bytes = self
                .input
                .read_line(&mut buffer)
                .context("Failed to read a line of input")?;

            // For ctrl + d
            if bytes == 0 {
                info!("Input closed, leaving the shell");
                return Ok(());
            }

            let line = buffer.trim();
            if line.is_empty() {
                continue;
            }

            let cmd = match Command::parse(line) {
                Ok(cmd) => cmd,
                Err(err) => {
                    warn!("Rejected input {line:?}: {err}");
                    writeln!(self.output, "{err}")?;
                    continue;
                }
            };

            if cmd == Command::Quit {
                info!("Leaving the shell");
                return Ok(());
            }

            if let Err(err) = self.execute(cmd) {
                error!("{err}");
                writeln!(self.output, "error: {err}")?;
            }
        }
    }

    /// Executes a single [`Command`] against the current position.
    pub fn execute(&mut self, cmd: Command) -> Result<()> {
        match cmd {
            Command::SetPosition(position) => self.set_position(*position),
            Command::Fen => writeln!(self.output, "{}", self.position.to_fen())?,
            Command::Print => self.print()?,
            Command::Moves => self.moves()?,
            Command::MakeMove(mv) => self.make_move(mv)?,
            Command::Piece(square) => self.piece(square)?,
            Command::Check => self.check()?,
            Command::Help => self.help()?,
            Command::Quit => {}
        }

        self.output.flush().context("Failed to flush output")
    }

    fn set_position(&mut self, position: Position) {
        info!("Position set to {}", position.to_fen());
        self.position = position;
    }

    fn print(&mut self) -> Result<()> {
        let board = render_with(&self.position, &self.config);
        writeln!(self.output, "{board}")?;
        Ok(())
    }

    fn moves(&mut self) -> Result<()> {
        let moves = self
            .position
            .legal_moves()?
            .into_iter()
            .map(|mv| mv.to_string())
            .collect::<Vec<_>>();

        writeln!(self.output, "{}", moves.join(" "))?;
        Ok(())
    }

    fn make_move(&mut self, mv: Move) -> Result<()> {
        if !self.position.is_legal(mv)? {
            bail!("{mv} is not a legal move in {}", self.position.to_fen());
        }

        self.position.make_move(mv);
        self.position.toggle_side_to_move();
        info!("Played {mv}, position is now {}", self.position.to_fen());

        Ok(())
    }

    fn piece(&mut self, square: Square) -> Result<()> {
        match self.position.piece_at(square) {
            Some(piece) => writeln!(self.output, "{piece}")?,
            None => writeln!(self.output, "-")?,
        }
        Ok(())
    }

    fn check(&mut self) -> Result<()> {
        let color = self.position.side_to_move();
        if self.position.is_king_in_check(color)? {
            writeln!(self.output, "{} is in check", color.name())?;
        } else {
            writeln!(self.output, "{} is not in check", color.name())?;
        }
        Ok(())
    }

    fn help(&mut self) -> Result<()> {
        writeln!(
            self.output,
            "available commands: position [startpos | fen <FEN>], fen, print, moves, move <uci>, piece <square>, check, help, quit"
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use osmium_core::FEN_STARTPOS;

    use super::*;

    // Runs `script` through a fresh shell on the starting position and returns what it printed
    fn run_script(script: &str) -> (Position, String) {
        let mut shell = Shell::new(
            Position::startpos(),
            Config::default(),
            Cursor::new(script.as_bytes()),
            Vec::new(),
        );
        shell.run().unwrap();

        let position = shell.position().clone();
        let output = String::from_utf8(shell.into_output()).unwrap();
        (position, output)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("fen").unwrap(), Command::Fen);
        assert_eq!(Command::parse("d").unwrap(), Command::Print);
        assert_eq!(Command::parse("exit").unwrap(), Command::Quit);
        assert_eq!(
            Command::parse("piece h8").unwrap(),
            Command::Piece(Square::H8)
        );
        assert_eq!(
            Command::parse("position startpos").unwrap(),
            Command::SetPosition(Box::new(Position::startpos()))
        );
        assert!(Command::parse("position").is_err());
        assert!(Command::parse("position fen").is_err());
        assert!(Command::parse("position fen 8/8 w - - 0 1").is_err());
        assert!(Command::parse("move").is_err());
        assert!(Command::parse("move e2").is_err());
        assert!(Command::parse("piece z9").is_err());
    }

    #[test]
    fn test_fen_and_blank_lines() {
        let (_, output) = run_script("\n   \nfen\n");
        assert_eq!(output, format!("{FEN_STARTPOS}\n"));
    }

    #[test]
    fn test_position_fen_then_moves() {
        let (_, output) = run_script("position fen k7/8/8/8/8/8/8/R6K b - - 0 1\nmoves\n");
        assert_eq!(output, "a8b8 a8b7\n");
    }

    #[test]
    fn test_bad_fen_keeps_previous_position() {
        let (position, output) = run_script("position fen not a fen at all\nfen\n");
        assert_eq!(position, Position::startpos());
        assert!(output.starts_with("parse error"));
        assert!(output.ends_with(&format!("{FEN_STARTPOS}\n")));
    }

    #[test]
    fn test_legal_move_passes_the_turn() {
        let (position, output) = run_script("move e2e4\nfen\n");
        assert_eq!(
            output,
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1\n"
        );
        assert_eq!(position.side_to_move(), osmium_core::Color::Black);
    }

    #[test]
    fn test_illegal_move_is_reported() {
        let (position, output) = run_script("move e2e5\n");
        assert_eq!(position, Position::startpos());
        assert!(output.starts_with("error: e2e5 is not a legal move"));
    }

    #[test]
    fn test_piece_and_check() {
        let script = "piece e1\npiece e4\n\
            position fen r1bqkb1r/pppQ1ppp/5n2/8/4P3/8/PPP2PPP/RNB1KB1R b KQkq - 0 6\ncheck\n";
        let (_, output) = run_script(script);
        assert_eq!(output, "K\n-\nblack is in check\n");
    }

    #[test]
    fn test_missing_king_is_reported_not_fatal() {
        let (_, output) = run_script("position fen 8/8/8/8/8/8/8/4K3 b - - 0 1\nmoves\nfen\n");
        assert!(output.starts_with("error: invariant violation"));
        assert!(output.ends_with("8/8/8/8/8/8/8/4K3 b - - 0 1\n"));
    }

    #[test]
    fn test_quit_stops_reading() {
        let (_, output) = run_script("quit\nfen\n");
        assert!(output.is_empty());
    }

    #[test]
    fn test_unknown_command() {
        let (_, output) = run_script("dance\n");
        assert!(output.starts_with("unknown command \"dance\""));
    }

    #[test]
    fn test_print_draws_board() {
        let (_, output) = run_script("print\n");
        assert!(output.starts_with("8 .r.n.b.q.k.b.n.r\n"));
        assert!(output.ends_with("  a b c d e f g h \n"));
    }
}
