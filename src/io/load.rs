//! Policy loading functionality

use super::format::PolicyFormat;
use crate::error::{Error, Result};
use crate::policy::Policy;
use std::path::Path;

/// Load a policy artifact
///
/// The format is detected from the file extension. Every failure maps to
/// [`Error::ModelUnavailable`]: a missing file, an unknown extension, a
/// corrupt body and a structurally invalid forest are all the same thing to
/// a caller that only needs a usable policy.
///
/// # Example
///
/// ```no_run
/// use irrigate::io::load_policy;
///
/// let policy = load_policy("policy.json").expect("failed to load policy");
/// println!("Loaded {} trees", policy.forest.n_trees());
/// ```
pub fn load_policy(path: impl AsRef<Path>) -> Result<Policy> {
    let path = path.as_ref();

    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::ModelUnavailable(format!("{} has no extension", path.display())))?;

    let format = PolicyFormat::from_extension(ext)
        .ok_or_else(|| Error::ModelUnavailable(format!("Unsupported file extension: {ext}")))?;

    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::ModelUnavailable(format!("Failed to read {}: {e}", path.display()))
    })?;

    policy_from_str(&content, format)
}

/// Parse and validate a policy from text
pub fn policy_from_str(content: &str, format: PolicyFormat) -> Result<Policy> {
    let policy: Policy = match format {
        PolicyFormat::Json => serde_json::from_str(content)
            .map_err(|e| Error::ModelUnavailable(format!("JSON deserialization failed: {e}")))?,
        PolicyFormat::Yaml => serde_yaml::from_str(content)
            .map_err(|e| Error::ModelUnavailable(format!("YAML deserialization failed: {e}")))?,
    };
    policy.check()?;
    Ok(policy)
}
