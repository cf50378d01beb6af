use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::cells::Cell;

/// The source table opens with a fixed legend block (page title, category
/// headings, column captions) that occupies exactly this many matched cells
/// before the first data cell. Purely positional: any structural change to
/// the page invalidates this offset.
pub const LEGEND_CELLS: usize = 17;

/// Empty table slot, as it appears in the markup.
const NBSP: &str = "&nbsp;";

/// "Looks like a bank code": digits, optionally one trailing extra character.
/// Unanchored; institution names on this page never contain ASCII digits.
static CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+.?").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "商業銀行")]
    CommercialBank,
    #[serde(rename = "漁會信用部")]
    FishermensCreditUnion,
    #[serde(rename = "農會信用部")]
    FarmersCreditUnion,
    #[serde(rename = "信用合作社")]
    CreditCooperative,
    /// Marker digit outside the known mapping; never an empty field.
    #[serde(rename = "unknown")]
    Unknown,
}

impl Category {
    /// Map a cell's style marker digit to its institution category.
    pub fn from_marker(marker: &str) -> Self {
        match marker {
            "2" | "5" => Category::CommercialBank,
            "3" => Category::FishermensCreditUnion,
            "4" | "9" => Category::FarmersCreditUnion,
            "6" => Category::CreditCooperative,
            _ => Category::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::CommercialBank => "商業銀行",
            Category::FishermensCreditUnion => "漁會信用部",
            Category::FarmersCreditUnion => "農會信用部",
            Category::CreditCooperative => "信用合作社",
            Category::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One bank / credit-union code entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bank {
    pub code: String,
    pub name: String,
    pub category: Category,
}

/// Walk the cell sequence and emit bank records.
///
/// The legend block is skipped wholesale and placeholder cells are dropped.
/// The rest is a left-to-right fold carrying the current code: a code cell
/// updates the carried value and emits nothing, any other cell is an
/// institution name and emits a record under the carried code.
///
/// Output is ordered by code with plain string comparison: "100" sorts
/// before "99". Downstream artifacts rely on this ordering.
pub fn classify(cells: &[Cell]) -> Vec<Bank> {
    let (mut banks, _) = cells
        .iter()
        .skip(LEGEND_CELLS)
        .filter(|cell| cell.text != NBSP)
        .fold(
            (Vec::new(), String::new()),
            |(mut banks, code), cell| {
                if CODE_RE.is_match(&cell.text) {
                    (banks, trim_padding(&cell.text))
                } else {
                    banks.push(Bank {
                        code: code.clone(),
                        name: cell.text.clone(),
                        category: Category::from_marker(&cell.marker),
                    });
                    (banks, code)
                }
            },
        );

    banks.sort_by(|a, b| a.code.cmp(&b.code));
    banks
}

/// Strip `&nbsp;` padding from both ends of a code cell.
fn trim_padding(text: &str) -> String {
    text.trim_start_matches(NBSP)
        .trim_end_matches(NBSP)
        .to_string()
}

// ── Tests ──
