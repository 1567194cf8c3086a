//! JSON parsing helpers for upstream responses.

use anyhow::Result;

/// Parse JSON, attaching the serde path on failure so malformed upstream
/// payloads are diagnosable from logs alone.
pub fn parse_json_with_path<T: serde::de::DeserializeOwned>(body: &str) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_str(body);
    serde_path_to_error::deserialize(de).map_err(|err| {
        let path = err.path().to_string();
        let inner = err.into_inner();
        if path.is_empty() || path == "." {
            anyhow::Error::new(inner)
        } else {
            anyhow::anyhow!("at path '{path}': {inner}")
        }
    })
}
