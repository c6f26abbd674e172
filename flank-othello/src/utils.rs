//! Shared formatting helpers.

use crate::EDGE_LENGTH;
use std::fmt::{self, Formatter};

/// Column labels in board notation, in scan order.
pub const COLUMN_LABELS: &str = "ABCDEFGH";

/// Visit every square coordinate in reading order: row 1 through row 8,
/// column A through H within each row.
pub fn scan_rows() -> impl Iterator<Item = (usize, usize)> {
    (0..EDGE_LENGTH * EDGE_LENGTH).map(|i| (i % EDGE_LENGTH, i / EDGE_LENGTH))
}

/// Render one character per square as a labeled grid.
/// `squares` must yield exactly one item per board square, in reading order.
pub fn format_grid<I>(mut squares: I, f: &mut Formatter<'_>) -> fmt::Result
where
    I: Iterator<Item = char>,
{
    f.write_str("  ")?;
    for label in COLUMN_LABELS.chars() {
        write!(f, " {}", label)?;
    }

    for row in 0..EDGE_LENGTH {
        write!(f, "\n{} ", row + 1)?;
        for _ in 0..EDGE_LENGTH {
            write!(f, " {}", squares.next().ok_or(fmt::Error)?)?;
        }
    }

    match squares.next() {
        None => writeln!(f),
        Some(_) => Err(fmt::Error),
    }
}
