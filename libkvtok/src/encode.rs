//! Encode parsed pairs to output formats.
//!
//! The canonical `kv` form re-parses to the same pairs. JSON keeps the
//! pairs in their parsed order.

use crate::error::EncodeError;
use crate::Parsed;

/// Output format for encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Canonical key-value text
    Kv,
    /// JSON object
    Json,
    /// YAML
    Yaml,
    /// TOML
    Toml,
    /// CBOR (binary)
    Cbor,
    /// CBOR diagnostic notation (RFC 8949 §8)
    CborDiag,
}

impl Format {
    /// Conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Kv => "kv",
            Format::Json => "json",
            Format::Yaml => "yaml",
            Format::Toml => "toml",
            Format::Cbor => "cbor",
            Format::CborDiag => "diag",
        }
    }
}

/// Encode parsed pairs in the specified format.
///
/// YAML, TOML, and CBOR are handled by the CLI tool (binkvtok) using
/// dedicated libraries and are rejected here.
pub fn encode(parsed: &Parsed, format: Format) -> Result<String, EncodeError> {
    match format {
        Format::Kv => encode_kv(parsed),
        Format::Json => Ok(encode_json(parsed)),
        Format::Yaml => Err(EncodeError::ExternalFormat("yaml")),
        Format::Toml => Err(EncodeError::ExternalFormat("toml")),
        Format::Cbor => Err(EncodeError::ExternalFormat("cbor")),
        Format::CborDiag => Err(EncodeError::ExternalFormat("diag")),
    }
}

// =============================================================================
// Canonical Encoder
// =============================================================================

fn encode_kv(parsed: &Parsed) -> Result<String, EncodeError> {
    let mut items = Vec::with_capacity(parsed.len());
    for (key, value) in parsed.iter() {
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(EncodeError::InvalidKey(key.to_string()));
        }
        items.push(format!("{}={}", key, encode_kv_value(key, value)?));
    }
    Ok(items.join(" "))
}

/// Quote values that would not survive as bare values.
fn encode_kv_value(key: &str, value: &str) -> Result<String, EncodeError> {
    let needs_quotes =
        value.is_empty() || value.starts_with('"') || value.chars().any(char::is_whitespace);
    if !needs_quotes {
        return Ok(value.to_string());
    }
    if value.contains('"') {
        return Err(EncodeError::UnrepresentableValue(key.to_string()));
    }
    Ok(format!("\"{}\"", value))
}

// =============================================================================
// JSON Encoder
// =============================================================================

fn encode_json(parsed: &Parsed) -> String {
    if parsed.is_empty() {
        return "{}".to_string();
    }
    let items: Vec<String> = parsed
        .iter()
        .map(|(k, v)| format!("  {}: {}", encode_json_string(k), encode_json_string(v)))
        .collect();
    format!("{{\n{}\n}}", items.join(",\n"))
}

fn encode_json_string(s: &str) -> String {
    let mut result = String::from("\"");
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            '\x08' => result.push_str("\\b"),
            '\x0c' => result.push_str("\\f"),
            c if c.is_control() => {
                result.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => result.push(c),
        }
    }
    result.push('"');
    result
}
