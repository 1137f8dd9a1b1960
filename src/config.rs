use serde::{Deserialize, Serialize};

/// Highest ordinal a sweep will try when the OS never reports the end of the
/// device list.
pub const DEFAULT_MAX_DISPLAYS: u32 = 64;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotatorConfig {
    /// Ceiling on attempted ordinals for sweeps and listings.
    pub max_displays: u32,
    /// Ask the OS to validate modes without applying them.
    pub dry_run: bool,
}

impl Default for RotatorConfig {
    fn default() -> Self {
        RotatorConfig {
            max_displays: DEFAULT_MAX_DISPLAYS,
            dry_run: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;

    #[test]
    fn missing_fields_take_defaults() -> Result<()> {
        let config: RotatorConfig = serde_json::from_str(r#"{"dry_run": true}"#)?;
        assert_eq!(config.max_displays, 64);
        assert!(config.dry_run);

        let config: RotatorConfig = serde_json::from_str("{}")?;
        assert_eq!(config, RotatorConfig::default());
        Ok(())
    }
}
