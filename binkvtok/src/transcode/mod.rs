//! Transcoders for formats that need third-party libraries.

pub mod cbor;
pub mod toml;
pub mod yaml;
