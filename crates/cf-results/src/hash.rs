//! Content-based configuration hashing.

use sha2::{Digest, Sha256};

/// SHA-256 hex digest of a configuration's JSON form.
///
/// Gives every persisted result a stable identity tied to the exact
/// configuration that produced it.
pub fn config_hash(config_json: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(config_json.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_stability() {
        let json = r#"{"air_mass_flow_kg_s":1.388}"#;
        assert_eq!(config_hash(json), config_hash(json));
    }

    #[test]
    fn hash_differs_for_different_inputs() {
        assert_ne!(
            config_hash(r#"{"equivalence_ratio":0.3}"#),
            config_hash(r#"{"equivalence_ratio":1.0}"#)
        );
    }

    #[test]
    fn hash_is_hex_sha256() {
        let digest = config_hash("{}");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
