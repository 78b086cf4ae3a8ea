//! TOML transcoding: render parsed pairs as a flat TOML table.
//!
//! Every pair becomes a `key = "value"` string entry, in parsed order.
//! Every key the tokenizer accepts is a valid TOML bare key.

use libkvtok::Parsed;
use toml_edit::DocumentMut;

/// Encode pairs as a TOML document.
pub fn encode(parsed: &Parsed) -> Result<String, String> {
    let mut doc = DocumentMut::new();
    for (key, value) in parsed.iter() {
        if key.is_empty() {
            return Err("TOML keys must not be empty".to_string());
        }
        doc[key] = toml_edit::value(value);
    }
    Ok(doc.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        let parsed = libkvtok::parse("name=\"john doe\" age=23").unwrap();
        assert_eq!(encode(&parsed).unwrap(), "name = \"john doe\"\nage = \"23\"\n");
    }

    #[test]
    fn test_encode_reads_back_as_strings() {
        let parsed = libkvtok::parse("b=2 a=\"x y\" c=\"\"").unwrap();
        let doc: DocumentMut = encode(&parsed).unwrap().parse().unwrap();
        let entries: Vec<(&str, &str)> = doc
            .iter()
            .map(|(k, item)| (k, item.as_str().unwrap()))
            .collect();
        assert_eq!(entries, [("b", "2"), ("a", "x y"), ("c", "")]);
    }
}
