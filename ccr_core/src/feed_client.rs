//! This client fetches the published calendar feed and decodes it to text.

use std::io::Read;

use anyhow::{bail, Context, Result};
use flate2::read::GzDecoder;
use reqwest::header::{ACCEPT_ENCODING, CONTENT_ENCODING, USER_AGENT};

static USER_AGENT_VALUE: &str = "Mozilla/5.0";
static ACCEPT_ENCODING_VALUE: &str = "gzip, deflate";

/// Fetch the feed at `url` and return its UTF-8 text.
///
/// The request advertises gzip support with a browser-like user agent. The
/// client is built without automatic decompression, so a response marked
/// `Content-Encoding: gzip` is decompressed here before decoding. The whole
/// body is held in memory; there are no retries.
pub async fn get(url: &str) -> Result<String> {
    let client = reqwest::Client::new();
    let response = client
        .get(url)
        .header(USER_AGENT, USER_AGENT_VALUE)
        .header(ACCEPT_ENCODING, ACCEPT_ENCODING_VALUE)
        .send()
        .await
        .context("feed request failed")?;
    let status = response.status();
    if !status.is_success() {
        bail!("feed request failed with status {status}");
    }
    let gzipped = response
        .headers()
        .get(CONTENT_ENCODING)
        .and_then(|value| value.to_str().ok())
        == Some("gzip");
    let body = response.bytes().await.context("failed to read feed body")?;
    log::debug!("fetched {} bytes (gzipped: {gzipped})", body.len());
    if gzipped {
        let mut text = String::new();
        GzDecoder::new(body.as_ref())
            .read_to_string(&mut text)
            .context("failed to decompress feed body")?;
        Ok(text)
    } else {
        String::from_utf8(body.to_vec()).context("feed body is not valid UTF-8")
    }
}
