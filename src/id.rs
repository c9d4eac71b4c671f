//! Shareable account IDs and payments-network resource URLs.
//!
//! A shareable ID lets a user hand out a reference to one of their linked
//! accounts (e.g. to receive a transfer) without exposing the aggregator's
//! account ID verbatim. It is an obfuscation, not encryption.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::Error;

/// Encode an account ID as a shareable ID.
pub fn encrypt_id(id: &str) -> String {
    tracing::debug!("encoding shareable ID");
    STANDARD.encode(id)
}

/// Decode a shareable ID back into the account ID.
///
/// # Errors
///
/// Returns [Error::InvalidShareableId] if `shareable_id` is not padded base64
/// or does not decode to UTF-8.
pub fn decrypt_id(shareable_id: &str) -> Result<String, Error> {
    tracing::debug!("decoding shareable ID");
    let invalid = || Error::InvalidShareableId(shareable_id.to_owned());

    let bytes = STANDARD.decode(shareable_id).map_err(|_| invalid())?;
    String::from_utf8(bytes).map_err(|_| invalid())
}

/// Get the resource ID from a payments-network resource URL, i.e. its last
/// path segment.
///
/// ```
/// use bankview::extract_customer_id_from_url;
///
/// let url = "https://api-sandbox.example.com/customers/5b29279d-6359";
/// assert_eq!(extract_customer_id_from_url(url), "5b29279d-6359");
/// ```
pub fn extract_customer_id_from_url(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}
