//! YAML transcoding: render parsed pairs as a flat YAML mapping.
//!
//! Every pair becomes a string entry, in parsed order. Values that YAML
//! would read as numbers, booleans or null are quoted by the emitter.

use libkvtok::Parsed;

/// Encode pairs as a YAML mapping.
pub fn encode(parsed: &Parsed) -> Result<String, String> {
    let mut map = serde_yaml::Mapping::new();
    for (k, v) in parsed.iter() {
        map.insert(
            serde_yaml::Value::String(k.to_string()),
            serde_yaml::Value::String(v.to_string()),
        );
    }
    serde_yaml::to_string(&serde_yaml::Value::Mapping(map))
        .map_err(|e| format!("YAML encode error: {}", e))
}
