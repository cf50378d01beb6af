use tracing::info;

use crate::error::Result;

/// Reference page listing bank and credit-union codes.
pub const SOURCE_URL: &str = "http://www.esunbank.com.tw/event/announce/BankCode.htm";

/// Fetch the bank code page and return its raw (Big5-encoded) bytes.
///
/// One blocking-in-sequence GET, no timeout, no retry. Transport errors
/// surface as-is; rescheduling is the caller's concern.
pub async fn fetch_page() -> Result<Vec<u8>> {
    let client = reqwest::Client::new();

    info!("Fetching bank code page: {}", SOURCE_URL);
    let body = client.get(SOURCE_URL).send().await?.bytes().await?;
    info!("Fetched {} bytes", body.len());

    Ok(body.to_vec())
}
