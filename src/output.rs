use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::parser::Bank;

/// Structured data artifact consumed downstream.
pub const JSON_PATH: &str = "banks.json";
/// Optional template for the script-embeddable artifact.
pub const TEMPLATE_PATH: &str = "banks.js.tpl";
/// Script artifact generated from the template.
pub const SCRIPT_PATH: &str = "banks.js";

const PLACEHOLDER: &str = "%CODE%";

/// Write the artifacts into the working directory.
pub fn write(banks: &[Bank]) -> Result<()> {
    write_to(
        banks,
        Path::new(JSON_PATH),
        Path::new(TEMPLATE_PATH),
        Path::new(SCRIPT_PATH),
    )
}

/// Serialize `banks` to `json_path` and, when a template exists at
/// `tpl_path`, substitute the compact payload into it and write `script_path`.
///
/// Plain overwrites, no atomicity: a failed write leaves whatever made it to
/// disk, and the freshness marker has already moved forward at this point.
pub fn write_to(banks: &[Bank], json_path: &Path, tpl_path: &Path, script_path: &Path) -> Result<()> {
    fs::write(json_path, serde_json::to_string_pretty(banks)?)?;
    info!("Wrote {} records to {}", banks.len(), json_path.display());

    if tpl_path.exists() {
        let template = fs::read_to_string(tpl_path)?;
        let payload = serde_json::to_string(banks)?;
        fs::write(script_path, render_template(&template, &payload))?;
        info!("Wrote {}", script_path.display());
    }

    Ok(())
}

/// Substitute `payload` for the first placeholder occurrence, verbatim.
fn render_template(template: &str, payload: &str) -> String {
    template.replacen(PLACEHOLDER, payload, 1)
}

/// Read the JSON artifact back.
pub fn read_json(path: &Path) -> Result<Vec<Bank>> {
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}

// ── Tests ──
