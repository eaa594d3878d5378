//! Base64 transport encoding for source, stdin and result fields.
//!
//! The remote API exchanges every text field base64-encoded so arbitrary
//! bytes survive JSON transport. `decode` must stay the exact inverse of
//! `encode`.

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};

pub fn encode(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Decode a base64 field returned by the remote API.
///
/// The server wraps long payloads with embedded newlines, so all ASCII
/// whitespace is stripped before decoding.
pub fn decode(encoded: &str) -> Result<String> {
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .context("invalid base64 payload")?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_ascii() {
        let text = "print(\"hello, world\")\n";
        assert_eq!(decode(&encode(text)).unwrap(), text);
    }

    #[test]
    fn round_trips_unicode() {
        let text = "println!(\"héllo → 世界\");";
        assert_eq!(decode(&encode(text)).unwrap(), text);
    }

    #[test]
    fn round_trips_empty() {
        assert_eq!(decode(&encode("")).unwrap(), "");
    }

    #[test]
    fn decodes_newline_wrapped_payloads() {
        let encoded = encode("a longer payload that a server might wrap");
        let wrapped = format!("{}\n{}\n", &encoded[..8], &encoded[8..]);
        assert_eq!(
            decode(&wrapped).unwrap(),
            "a longer payload that a server might wrap"
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(decode("not base64!!").is_err());
    }
}
