use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::{DateTime, FixedOffset};
use reqwest::header::LAST_MODIFIED;
use tracing::info;

use crate::error::{Error, Result};
use crate::fetch::SOURCE_URL;

/// Local marker holding the raw `Last-Modified` value seen at the last refresh.
pub const MARKER_PATH: &str = ".last-modified";

/// Probe the source page and report whether it is newer than the local marker.
///
/// When it is, the marker is overwritten with the new remote timestamp
/// before any refresh work happens. A crash mid-refresh leaves the marker
/// updated but the artifacts stale; the next run that sees a newer remote
/// timestamp repairs both.
pub async fn has_new_version() -> Result<bool> {
    let (remote, raw) = remote_last_modified().await?;
    check_marker(Path::new(MARKER_PATH), remote, &raw)
}

/// Probe without touching the marker: report staleness only. Lets a caller
/// ask "would `update` do anything?" and still leave the answer intact.
pub async fn peek_new_version() -> Result<bool> {
    let (remote, _) = remote_last_modified().await?;
    let local = read_marker(Path::new(MARKER_PATH))?;
    Ok(is_stale(remote, local))
}

/// HEAD the source URL and return its `Last-Modified` value, parsed and raw.
async fn remote_last_modified() -> Result<(DateTime<FixedOffset>, String)> {
    let client = reqwest::Client::new();
    let resp = client.head(SOURCE_URL).send().await?;

    let raw = resp
        .headers()
        .get(LAST_MODIFIED)
        .and_then(|v| v.to_str().ok())
        .ok_or(Error::MissingLastModified)?
        .to_string();

    info!("Remote Last-Modified: {}", raw);
    let remote = parse_http_date(&raw)?;
    Ok((remote, raw))
}

/// Parse an HTTP-date (RFC1123 form, e.g. `Wed, 18 Apr 2018 09:58:08 GMT`).
pub fn parse_http_date(s: &str) -> Result<DateTime<FixedOffset>> {
    Ok(DateTime::parse_from_rfc2822(s.trim())?)
}

/// Compare `remote` against the marker at `path`, updating the marker when
/// the remote side wins.
///
/// The marker is created (empty) strictly when absent, so a first run leaves
/// the same on-disk state behind as any later one; any other read failure
/// propagates. The stored value is the raw header string, so next run
/// compares against exactly what the server said.
pub fn check_marker(path: &Path, remote: DateTime<FixedOffset>, raw: &str) -> Result<bool> {
    let local = read_marker(path)?;
    if local.is_none() && !path.exists() {
        fs::File::create(path)?;
    }

    let stale = is_stale(remote, local);
    if stale {
        fs::write(path, raw)?;
    }
    Ok(stale)
}

/// Read the marker timestamp. An absent file or empty content is `None`
/// ("no timestamp recorded yet"); non-empty garbage is a parse error.
fn read_marker(path: &Path) -> Result<Option<DateTime<FixedOffset>>> {
    match fs::read_to_string(path) {
        Ok(s) if s.trim().is_empty() => Ok(None),
        Ok(s) => Ok(Some(parse_http_date(&s)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Strictly-newer comparison; no local timestamp means always stale.
pub fn is_stale(remote: DateTime<FixedOffset>, local: Option<DateTime<FixedOffset>>) -> bool {
    match local {
        Some(local) => remote > local,
        None => true,
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const OLD: &str = "Mon, 01 Jan 2018 00:00:00 GMT";
    const NEW: &str = "Wed, 18 Apr 2018 09:58:08 GMT";

    fn date(s: &str) -> DateTime<FixedOffset> {
        parse_http_date(s).unwrap()
    }

    fn temp_marker(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("bankcode-marker-{}-{}", name, std::process::id()));
        let _ = fs::remove_file(&p);
        p
    }

    #[test]
    fn parses_http_date() {
        let t = date(NEW);
        assert_eq!(t.to_rfc2822(), "Wed, 18 Apr 2018 09:58:08 +0000");
    }

    #[test]
    fn rejects_malformed_date() {
        assert!(matches!(
            parse_http_date("not a date"),
            Err(Error::MalformedDate(_))
        ));
    }

    #[test]
    fn stale_iff_remote_strictly_newer() {
        assert!(is_stale(date(NEW), Some(date(OLD))));
        assert!(!is_stale(date(OLD), Some(date(NEW))));
        assert!(!is_stale(date(NEW), Some(date(NEW))));
    }

    #[test]
    fn absent_marker_is_always_stale() {
        assert!(is_stale(date(OLD), None));
    }

    #[test]
    fn first_run_creates_marker_and_refreshes() {
        let path = temp_marker("first-run");
        let stale = check_marker(&path, date(NEW), NEW).unwrap();
        assert!(stale);
        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), NEW);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn marker_blocks_same_timestamp() {
        let path = temp_marker("same");
        assert!(check_marker(&path, date(NEW), NEW).unwrap());
        assert!(!check_marker(&path, date(NEW), NEW).unwrap());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn newer_remote_overwrites_marker() {
        let path = temp_marker("newer");
        fs::write(&path, OLD).unwrap();
        assert!(check_marker(&path, date(NEW), NEW).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), NEW);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn empty_marker_reads_as_first_run() {
        let path = temp_marker("empty");
        fs::write(&path, "").unwrap();
        assert!(check_marker(&path, date(OLD), OLD).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), OLD);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn garbage_marker_is_an_error() {
        let path = temp_marker("garbage");
        fs::write(&path, "last week sometime").unwrap();
        assert!(check_marker(&path, date(NEW), NEW).is_err());
        let _ = fs::remove_file(&path);
    }
}
