//! Policy saving functionality

use super::format::{PolicyFormat, SaveConfig};
use super::load::policy_from_str;
use crate::error::{Error, Result};
use crate::policy::Policy;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Serialize a policy to a string in the configured format
pub fn policy_to_string(policy: &Policy, config: &SaveConfig) -> Result<String> {
    match config.format {
        PolicyFormat::Json if config.pretty => serde_json::to_string_pretty(policy)
            .map_err(|e| Error::Serialization(format!("JSON serialization failed: {e}"))),
        PolicyFormat::Json => serde_json::to_string(policy)
            .map_err(|e| Error::Serialization(format!("JSON serialization failed: {e}"))),
        PolicyFormat::Yaml => serde_yaml::to_string(policy)
            .map_err(|e| Error::Serialization(format!("YAML serialization failed: {e}"))),
    }
}

/// Save a policy to a file, replacing any previous artifact
///
/// The serialized text must load back before anything is written, and the
/// target is replaced by renaming a sibling temp file, so a failed save
/// leaves the previous artifact intact.
///
/// # Arguments
///
/// * `policy` - The trained policy
/// * `path` - Output file path
/// * `config` - Save configuration (format, options)
///
/// # Example
///
/// ```no_run
/// use irrigate::io::{load_policy, save_policy, PolicyFormat, SaveConfig};
///
/// let policy = load_policy("policy.json").unwrap();
/// save_policy(&policy, "policy.yaml", &SaveConfig::new(PolicyFormat::Yaml)).unwrap();
/// ```
pub fn save_policy(policy: &Policy, path: impl AsRef<Path>, config: &SaveConfig) -> Result<()> {
    let path = path.as_ref();
    let data = policy_to_string(policy, config)?;
    policy_from_str(&data, config.format)
        .map_err(|e| Error::Serialization(format!("policy does not reload: {e}")))?;

    let file_name = path
        .file_name()
        .ok_or_else(|| Error::Serialization(format!("{} is not a file path", path.display())))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let staging = path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));
    let written = File::create(&staging)
        .and_then(|mut file| {
            file.write_all(data.as_bytes())?;
            file.sync_all()
        })
        .and_then(|()| std::fs::rename(&staging, path));
    if let Err(e) = written {
        let _ = std::fs::remove_file(&staging);
        return Err(e.into());
    }

    Ok(())
}
