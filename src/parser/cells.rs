use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

static CELL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"style(\d)">(.+?)</td>"#).unwrap());

/// One table cell: the one-digit marker from its style class, and its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub marker: String,
    pub text: String,
}

/// Run the cell pattern over the normalized page text, in document order.
///
/// The pattern expects a style class carrying a single digit, then a
/// non-greedy single-line cell body, then a closing `</td>`. Zero matches
/// means the page markup changed into something this extractor does not
/// understand, and that is an error rather than an empty result.
pub fn extract_cells(html: &str) -> Result<Vec<Cell>> {
    let cells: Vec<Cell> = CELL_RE
        .captures_iter(html)
        .map(|caps| Cell {
            marker: caps[1].to_string(),
            text: caps[2].to_string(),
        })
        .collect();

    if cells.is_empty() {
        return Err(Error::NoCells);
    }
    Ok(cells)
}

// ── Tests ──
