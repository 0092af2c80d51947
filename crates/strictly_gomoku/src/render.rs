//! Plain-text rendering of a board.

use crate::geometry::Location;
use crate::types::Player;
use crate::Board;

/// Renders `board` as ASCII art.
///
/// ```text
/// player 0 with X
/// player 1 with O
///   012345
/// 0 X-----
/// 1 -O----
/// ```
///
/// Two header lines name each player's symbol, then a column index row,
/// then one line per row with `X`, `O` or `-` per cell. Pure function of
/// the board. A board whose geometry does not validate gets the header
/// lines only.
pub fn ascii_art(board: &Board) -> String {
    let mut rows: Vec<String> = Player::ALL
        .iter()
        .map(|player| format!("player {} with {}", player, player.symbol()))
        .collect();
    if board.config().validate().is_err() {
        return rows.join("\n");
    }
    rows.push(column_index_row(board.width()));
    rows.extend((0..board.height()).map(|y| row_as_ascii_art(board, y)));
    rows.join("\n")
}

fn column_index_row(width: usize) -> String {
    let mut row = String::from("  ");
    for x in 0..width {
        row.push_str(&x.to_string());
    }
    row
}

fn row_as_ascii_art(board: &Board, y: usize) -> String {
    let mut row = format!("{} ", y);
    for x in 0..board.width() {
        let symbol = board
            .occupant_at(Location::new(x, y))
            .map_or('-', Player::symbol);
        row.push(symbol);
    }
    row
}
