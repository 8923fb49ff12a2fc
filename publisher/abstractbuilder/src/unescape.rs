//! URL query unescaping.
//!
//! `+` decodes to a space and every `%` must be followed by two hex digits.
//! Anything else is rejected rather than passed through.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnescapeError {
    #[error("invalid URL escape {0:?}")]
    InvalidEscape(String),
    #[error("unescaped value of {0:?} is not valid UTF-8")]
    InvalidUtf8(String),
}

pub fn query_unescape(input: &str) -> Result<String, UnescapeError> {
    if !input.contains(|c: char| c == '%' || c == '+') {
        return Ok(input.to_string());
    }

    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let decoded = bytes
                    .get(i + 1..i + 3)
                    .and_then(|pair| Some((hex_value(pair[0])? << 4) | hex_value(pair[1])?));
                match decoded {
                    Some(byte) => out.push(byte),
                    None => {
                        let end = (i + 3).min(bytes.len());
                        let escape = String::from_utf8_lossy(&bytes[i..end]).into_owned();
                        return Err(UnescapeError::InvalidEscape(escape));
                    }
                }
                i += 3;
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            other => {
                out.push(other);
                i += 1;
            }
        }
    }

    String::from_utf8(out).map_err(|_| UnescapeError::InvalidUtf8(input.to_string()))
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
