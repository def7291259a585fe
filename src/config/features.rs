//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Let askers withdraw an accepted answer
    #[serde(default)]
    pub allow_answer_withdrawal: bool,

    /// Show vote changes before the backend confirms them
    #[serde(default = "default_optimistic_updates")]
    pub optimistic_updates: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            allow_answer_withdrawal: false,
            optimistic_updates: default_optimistic_updates(),
        }
    }
}

fn default_optimistic_updates() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_flags_defaults() {
        let flags = FeatureFlags::default();
        assert!(!flags.allow_answer_withdrawal);
        assert!(flags.optimistic_updates);
    }

    #[test]
    fn test_feature_flags_deserialization() {
        let json = r#"{
            "allow_answer_withdrawal": true,
            "optimistic_updates": false
        }"#;

        let flags: FeatureFlags = serde_json::from_str(json).unwrap();
        assert!(flags.allow_answer_withdrawal);
        assert!(!flags.optimistic_updates);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let flags: FeatureFlags = serde_json::from_str("{}").unwrap();
        assert!(!flags.allow_answer_withdrawal);
        assert!(flags.optimistic_updates);
    }
}
