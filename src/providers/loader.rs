//! Provider discovery
//!
//! Every sub-directory of the providers directory is one provider, named after
//! the directory:
//!
//! ```text
//! providers/
//!   petstore/
//!     openapi.yaml      # or openapi.yml / openapi.json
//!     config.json       # optional: { "headers": {..}, "baseUrl": ".." }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::core::{BridgeError, BridgeResult};
use crate::openapi::OpenApiDocument;

use super::bundle::{ProviderBundle, ProviderConfig};

/// Spec file names, in lookup order
const SPEC_FILE_NAMES: &[&str] = &["openapi.yaml", "openapi.yml", "openapi.json"];

/// Optional per-provider settings file
const CONFIG_FILE_NAME: &str = "config.json";

/// Load every provider under `dir`
///
/// A provider that fails to load is logged and skipped. Only a missing or
/// unreadable root directory is an error.
pub fn load_providers(dir: &Path) -> BridgeResult<BTreeMap<String, ProviderBundle>> {
    if !dir.is_dir() {
        return Err(BridgeError::InvalidConfig(format!(
            "Providers directory not found: {}",
            dir.display()
        )));
    }

    let mut providers = BTreeMap::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }

        let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_string()) else {
            continue;
        };

        match load_provider(&name, &path) {
            Ok(bundle) => {
                tracing::info!(
                    "[ProviderLoader] Loaded provider '{}' ({} paths)",
                    name,
                    bundle.document.paths.len()
                );
                providers.insert(name, bundle);
            }
            Err(e) => {
                tracing::warn!("[ProviderLoader] Skipping provider '{}': {}", name, e);
            }
        }
    }

    Ok(providers)
}

/// Load a single provider directory
pub fn load_provider(name: &str, dir: &Path) -> BridgeResult<ProviderBundle> {
    let spec_path = SPEC_FILE_NAMES
        .iter()
        .map(|file| dir.join(file))
        .find(|path| path.is_file())
        .ok_or_else(|| {
            BridgeError::invalid_document(name, "no openapi.yaml, openapi.yml or openapi.json")
        })?;

    let document = parse_document(&spec_path)
        .map_err(|e| BridgeError::invalid_document(name, e.to_string()))?;

    let config_path = dir.join(CONFIG_FILE_NAME);
    let config: ProviderConfig = if config_path.is_file() {
        serde_json::from_str(&fs::read_to_string(&config_path)?)?
    } else {
        ProviderConfig::default()
    };

    Ok(ProviderBundle::with_config(document, config))
}

/// Parse a spec file; `.json` files as JSON, anything else as YAML
pub fn parse_document(path: &Path) -> BridgeResult<OpenApiDocument> {
    let content = fs::read_to_string(path)?;
    let is_json = path.extension().is_some_and(|ext| ext == "json");

    let document = if is_json {
        serde_json::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };

    Ok(document)
}
