use encoding_rs::Encoding;
use tracing::warn;

use crate::error::{Error, Result};

/// Charset the source page is served in.
pub const SOURCE_CHARSET: &str = "big5";

/// Decode raw page bytes from `charset` into UTF-8.
///
/// Byte sequences that do not map cleanly are replaced with U+FFFD rather
/// than failing the conversion; the only hard failure is a charset label no
/// decoder exists for.
pub fn to_utf8(raw: &[u8], charset: &str) -> Result<String> {
    let encoding = Encoding::for_label(charset.as_bytes())
        .ok_or_else(|| Error::UnknownCharset(charset.to_string()))?;

    let (text, _, had_errors) = encoding.decode(raw);
    if had_errors {
        warn!("Some {} byte sequences did not decode cleanly", encoding.name());
    }

    Ok(text.into_owned())
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_big5() {
        // 中文 in Big5
        let raw = [0xA4, 0xA4, 0xA4, 0xE5];
        assert_eq!(to_utf8(&raw, SOURCE_CHARSET).unwrap(), "中文");
    }

    #[test]
    fn invalid_bytes_are_replaced_not_fatal() {
        let raw = [0xA4, 0xA4, 0xFF, 0xFF];
        let text = to_utf8(&raw, SOURCE_CHARSET).unwrap();
        assert!(text.starts_with('中'));
        assert!(text.contains('\u{FFFD}'));
    }

    #[test]
    fn ascii_passes_through() {
        let raw = b"<td class=\"style2\">004</td>";
        assert_eq!(to_utf8(raw, SOURCE_CHARSET).unwrap(), "<td class=\"style2\">004</td>");
    }

    #[test]
    fn unknown_charset_errors() {
        assert!(matches!(
            to_utf8(b"abc", "no-such-charset"),
            Err(Error::UnknownCharset(_))
        ));
    }
}
