//! The stateless callback address codec.
//!
//! Interactive buttons carry their routing identity inside the callback data
//! itself, so pressing a button needs no server-side session: the outgoing
//! data is rewritten to `\x0C<unique>` (no payload) or
//! `\x0C<unique>|<payload>`, and the router decodes it on the way back in.
//!
//! The unique token is restricted to `[-\w]+`. The payload is everything
//! after the first `|` — an embedded `|` is preserved verbatim and never
//! re-split.

use std::sync::LazyLock;

use regex::Regex;

use crate::endpoint::CALLBACK_SENTINEL;

static CALLBACK_RX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\x0C([-\w]+)(\|(.+))?$").expect("callback address pattern"));

/// Encodes a button's unique token and payload into callback data.
pub fn encode(unique: &str, data: &str) -> String {
    if data.is_empty() {
        format!("{CALLBACK_SENTINEL}{unique}")
    } else {
        format!("{CALLBACK_SENTINEL}{unique}|{data}")
    }
}

/// Splits encoded callback data into `(unique, payload)`.
///
/// Returns `None` when the data does not carry a well-formed callback
/// address; such data is routed generically instead.
pub fn decode(data: &str) -> Option<(String, String)> {
    let caps = CALLBACK_RX.captures(data)?;
    let unique = caps.get(1)?.as_str().to_owned();
    let payload = caps.get(3).map_or("", |m| m.as_str()).to_owned();
    Some((unique, payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_with_payload() {
        let data = encode("buy", "42");
        assert_eq!(data, "\u{C}buy|42");
        assert_eq!(decode(&data), Some(("buy".into(), "42".into())));
    }

    #[test]
    fn round_trip_without_payload() {
        let data = encode("buy", "");
        assert_eq!(data, "\u{C}buy");
        assert_eq!(decode(&data), Some(("buy".into(), String::new())));
    }

    #[test]
    fn payload_keeps_embedded_delimiters() {
        let data = encode("pick", "a|b|c");
        assert_eq!(decode(&data), Some(("pick".into(), "a|b|c".into())));
    }

    #[test]
    fn hyphenated_unique_tokens() {
        assert_eq!(
            decode("\u{C}page-next|7"),
            Some(("page-next".into(), "7".into()))
        );
    }

    #[test]
    fn rejects_data_without_sentinel() {
        assert_eq!(decode("buy|42"), None);
        assert_eq!(decode(""), None);
    }

    #[test]
    fn rejects_malformed_addresses() {
        // Missing unique token.
        assert_eq!(decode("\u{C}"), None);
        assert_eq!(decode("\u{C}|payload"), None);
        // Token with characters outside [-\w].
        assert_eq!(decode("\u{C}a b|x"), None);
    }
}
