//! CBOR transcoding: render parsed pairs as a CBOR map.
//!
//! Pairs become a determinate-length map of text strings, in parsed order.
//! Diagnostic notation (RFC 8949 §8) is rendered from the encoded bytes.

use ciborium::value::Value as CborValue;
use libkvtok::Parsed;
use std::fmt::Write as FmtWrite;

/// Encode pairs as CBOR bytes.
pub fn encode(parsed: &Parsed) -> Result<Vec<u8>, String> {
    let map = CborValue::Map(
        parsed
            .iter()
            .map(|(k, v)| (CborValue::Text(k.to_string()), CborValue::Text(v.to_string())))
            .collect(),
    );
    let mut buf = Vec::new();
    ciborium::ser::into_writer(&map, &mut buf).map_err(|e| format!("CBOR encode error: {}", e))?;
    Ok(buf)
}

/// Render CBOR bytes holding a flat text map as diagnostic notation.
pub fn diagnostic(input: &[u8]) -> Result<String, String> {
    let cbor_value: CborValue =
        ciborium::de::from_reader(input).map_err(|e| format!("CBOR decode error: {}", e))?;
    let entries = match cbor_value {
        CborValue::Map(entries) => entries,
        other => return Err(format!("expected a CBOR map, got: {:?}", other)),
    };
    if entries.is_empty() {
        return Ok("{}\n".to_string());
    }
    let mut out = String::from("{\n");
    for (i, (k, v)) in entries.iter().enumerate() {
        out.push_str("  ");
        diag_text(&mut out, k)?;
        out.push_str(": ");
        diag_text(&mut out, v)?;
        if i + 1 < entries.len() {
            out.push(',');
        }
        out.push('\n');
    }
    out.push_str("}\n");
    Ok(out)
}

fn diag_text(out: &mut String, val: &CborValue) -> Result<(), String> {
    let s = match val {
        CborValue::Text(s) => s,
        other => return Err(format!("expected a CBOR text string, got: {:?}", other)),
    };
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    Ok(())
}
