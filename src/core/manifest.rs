//! Plaintext Secret manifest for sops.

use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use zeroize::Zeroizing;

use crate::error::Result;

/// Single-key `v1/Secret`.
///
/// ```yaml
/// apiVersion: v1
/// kind: Secret
/// metadata:
///   name: <name>
/// data:
///   <name>: <base64 value>
/// ```
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretManifest {
    api_version: &'static str,
    kind: &'static str,
    metadata: Metadata,
    data: BTreeMap<String, String>,
}

#[derive(Serialize)]
struct Metadata {
    name: String,
}

impl SecretManifest {
    /// Build the manifest, base64-encoding `value` under the key `name`.
    pub fn new(name: &str, value: &str) -> Self {
        let mut data = BTreeMap::new();
        data.insert(name.to_string(), STANDARD.encode(value.as_bytes()));

        Self {
            api_version: "v1",
            kind: "Secret",
            metadata: Metadata {
                name: name.to_string(),
            },
            data,
        }
    }

    /// Render as YAML.
    pub fn to_yaml(&self) -> Result<Zeroizing<String>> {
        Ok(Zeroizing::new(serde_yaml::to_string(self)?))
    }
}
