//! Positional parser for the bank code reference page: a pattern pass that
//! recovers the flat cell sequence, then a stateful walk that types each
//! cell into a record.

mod cells;
mod classify;

pub use cells::{extract_cells, Cell};
pub use classify::{classify, Bank, Category, LEGEND_CELLS};

use crate::error::Result;

/// Full text→records pass over the normalized page.
pub fn parse(html: &str) -> Result<Vec<Bank>> {
    let cells = extract_cells(html)?;
    Ok(classify(&cells))
}

// ── Tests ──
