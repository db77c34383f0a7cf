//! Flat parameter map <-> wire string (`k1=v1&k2=v2`).

use indexmap::IndexMap;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters escaped in keys and values. Matches the browser's component encoding, which
/// leaves `A-Z a-z 0-9 - _ . ! ~ * ' ( )` untouched.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Ordered key/value pairs. Repeated keys keep their first position and last value.
pub type Params = IndexMap<String, String>;

/// Strip one leading `#`, then a leading `?` left over from older share links.
pub fn strip_fragment(raw: &str) -> &str {
    let rest = raw.strip_prefix('#').unwrap_or(raw);
    rest.strip_prefix('?').unwrap_or(rest)
}

/// Parse a fragment into params. Pairs missing a key or a value, or whose escapes do not
/// decode to UTF-8, are dropped.
pub fn parse_params(raw: &str) -> Params {
    let mut params = Params::new();
    let body = strip_fragment(raw);
    if body.is_empty() {
        return params;
    }

    for pair in body.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            tracing::debug!(pair, "Dropping hash pair without '='");
            continue;
        };
        if key.is_empty() || value.is_empty() {
            tracing::debug!(pair, "Dropping hash pair with an empty half");
            continue;
        }
        match (decode_component(key), decode_component(value)) {
            (Some(k), Some(v)) => {
                params.insert(k, v);
            }
            _ => tracing::warn!(pair, "Dropping hash pair that is not valid UTF-8 once decoded"),
        }
    }
    params
}

pub fn format_params(params: &Params) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
        .collect::<Vec<_>>()
        .join("&")
}

pub fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}

fn decode_component(s: &str) -> Option<String> {
    percent_decode_str(s)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.into_owned())
}
