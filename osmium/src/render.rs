use colored::Colorize;
use osmium_core::{Position, Square};

use crate::{BackgroundStyle, Config, PieceStyle};

/// Footer printed beneath every board.
pub const FILE_LABELS: &str = "  a b c d e f g h ";

/// Draws `position` as text, rank 8 at the top, with one two-column cell per square.
///
/// # Example
/// ```
/// # use osmium::{render, BackgroundStyle, PieceStyle};
/// # use osmium_core::Position;
/// let pos = Position::from_fen("k7/8/8/8/8/8/8/R6K w - - 0 1").unwrap();
/// let board = render(&pos, PieceStyle::Ascii, BackgroundStyle::Simple);
/// assert!(board.starts_with("8 .k. . . . . . . \n"));
/// assert!(board.ends_with("1 .R. . . . . . .K\n  a b c d e f g h "));
/// ```
pub fn render(position: &Position, pieces: PieceStyle, background: BackgroundStyle) -> String {
    draw(position, pieces, background, false)
}

/// Draws `position` with the styles chosen in `config`.
pub fn render_with(position: &Position, config: &Config) -> String {
    draw(position, config.pieces, config.background, config.color)
}

fn draw(
    position: &Position,
    pieces: PieceStyle,
    background: BackgroundStyle,
    tint: bool,
) -> String {
    let mut output = String::with_capacity(256);

    for rank in (0..8).rev() {
        output += &format!("{} ", rank + 1);

        for file in 0..8 {
            let square = Square::new(file, rank);
            let cell = square_cell(position, square, pieces, background);

            if tint {
                let cell = if square.is_light() {
                    cell.black().on_truecolor(240, 217, 181)
                } else {
                    cell.black().on_truecolor(181, 136, 99)
                };
                output += &cell.to_string();
            } else {
                output += &cell;
            }
        }

        output.push('\n');
    }
    output += FILE_LABELS;

    output
}

/// The two columns drawn for a single square.
fn square_cell(
    position: &Position,
    square: Square,
    pieces: PieceStyle,
    background: BackgroundStyle,
) -> String {
    let Some(piece) = position.piece_at(square) else {
        return match background {
            BackgroundStyle::Simple => String::from(". "),
            BackgroundStyle::Shaded => shade(square, false).to_string(),
            BackgroundStyle::ShadedInverted => shade(square, true).to_string(),
        };
    };

    let glyph = match pieces {
        PieceStyle::Ascii => piece.char(),
        PieceStyle::Unicode => piece.symbol(),
        PieceStyle::UnicodeInverted => piece.inverted().symbol(),
    };

    format!(".{glyph}")
}

fn shade(square: Square, invert: bool) -> &'static str {
    if square.is_light() ^ invert {
        "░░"
    } else {
        "▒▒"
    }
}

#[cfg(test)]
mod tests {
    use osmium_core::FEN_ROOK_VS_KING;

    use super::*;

    #[test]
    fn test_simple_ascii_board() {
        let pos = Position::from_fen(FEN_ROOK_VS_KING).unwrap();
        let expected = [
            "8 .k. . . . . . . ",
            "7 . . . . . . . . ",
            "6 . . . . . . . . ",
            "5 . . . . . . . . ",
            "4 . . . . . . . . ",
            "3 . . . . . . . . ",
            "2 . . . . . . . . ",
            "1 .R. . . . . . .K",
            FILE_LABELS,
        ]
        .join("\n");
        assert_eq!(render(&pos, PieceStyle::Ascii, BackgroundStyle::Simple), expected);
    }

    #[test]
    fn test_shaded_backgrounds() {
        let pos = Position::new();
        let shaded = render(&pos, PieceStyle::Ascii, BackgroundStyle::Shaded);
        let inverted = render(&pos, PieceStyle::Ascii, BackgroundStyle::ShadedInverted);

        // a8 is light, h8 is dark
        let top = shaded.lines().next().unwrap();
        assert!(top.starts_with("8 ░░▒▒"));
        assert!(top.ends_with("░░▒▒"));

        // a1 is dark
        let bottom = inverted.lines().nth(7).unwrap();
        assert!(bottom.starts_with("1 ░░▒▒"));

        assert_eq!(shaded.lines().count(), 9);
        assert_eq!(inverted.lines().last(), Some(FILE_LABELS));
    }

    #[test]
    fn test_unicode_piece_styles() {
        let pos = Position::from_fen("k7/8/8/8/8/8/8/7K w - - 0 1").unwrap();

        let unicode = render(&pos, PieceStyle::Unicode, BackgroundStyle::Simple);
        assert!(unicode.starts_with("8 .♔"));
        assert!(unicode.contains(".♚\n"));

        let inverted = render(&pos, PieceStyle::UnicodeInverted, BackgroundStyle::Simple);
        assert!(inverted.starts_with("8 .♚"));
        assert!(inverted.contains(".♔\n"));
    }

    #[test]
    fn test_render_with_config() {
        let pos = Position::startpos();
        let config = Config::default();
        assert_eq!(
            render_with(&pos, &config),
            render(&pos, PieceStyle::Ascii, BackgroundStyle::ShadedInverted)
        );
    }

    #[test]
    fn test_tinted_board_keeps_every_cell() {
        let pos = Position::from_fen(FEN_ROOK_VS_KING).unwrap();
        let config = Config {
            background: BackgroundStyle::Simple,
            color: true,
            ..Default::default()
        };

        // Escape codes may or may not be emitted, depending on the terminal
        let tinted = render_with(&pos, &config);
        assert!(tinted.starts_with("8 "));
        assert!(tinted.ends_with(FILE_LABELS));
        assert_eq!(tinted.lines().count(), 9);
        assert_eq!(tinted.matches(". ").count(), 61);
        assert!(tinted.contains(".k") && tinted.contains(".R") && tinted.contains(".K"));
    }
}
