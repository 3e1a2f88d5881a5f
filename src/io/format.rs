//! Policy artifact formats

/// Serialization format of a policy artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolicyFormat {
    #[default]
    Json,
    Yaml,
}

impl PolicyFormat {
    /// Detect the format from a file extension (case-insensitive)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

/// Options for saving a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveConfig {
    pub format: PolicyFormat,
    /// Pretty-print JSON output
    pub pretty: bool,
}

impl SaveConfig {
    pub fn new(format: PolicyFormat) -> Self {
        Self {
            format,
            pretty: false,
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(PolicyFormat::from_extension("json"), Some(PolicyFormat::Json));
        assert_eq!(PolicyFormat::from_extension("YML"), Some(PolicyFormat::Yaml));
        assert_eq!(PolicyFormat::from_extension("pkl"), None);
    }

    #[test]
    fn test_save_config_builder() {
        let config = SaveConfig::new(PolicyFormat::Yaml).with_pretty(true);
        assert_eq!(config.format.extension(), "yaml");
        assert!(config.pretty);
    }
}
