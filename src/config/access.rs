//! `[access]` section configuration.

use super::defaults;
use crate::access::MatchPolicy;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[access]` section in docgate.toml - how rules are interpreted.
///
/// # Example
/// ```toml
/// [access]
/// client_root = "clients"
/// default_match = "all"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct AccessConfig {
    /// Path segment whose child names a client (`clients/acme` → `acme`).
    /// Used by client rules that list no clients.
    #[serde(default = "defaults::access::client_root")]
    #[educe(Default = defaults::access::client_root())]
    pub client_root: String,

    /// Match policy for client rules that do not declare one.
    #[serde(default = "defaults::access::default_match")]
    #[educe(Default = defaults::access::default_match())]
    pub default_match: MatchPolicy,
}

#[cfg(test)]
mod tests {
    use super::super::DocsConfig;
    use crate::access::MatchPolicy;

    #[test]
    fn test_access_config_defaults() {
        let config: DocsConfig = toml::from_str("").unwrap();

        assert_eq!(config.access.client_root, "clients");
        assert_eq!(config.access.default_match, MatchPolicy::Any);
    }

    #[test]
    fn test_access_config_custom() {
        let config = r#"
            [access]
            client_root = "tenants"
            default_match = "all"
        "#;
        let config: DocsConfig = toml::from_str(config).unwrap();

        assert_eq!(config.access.client_root, "tenants");
        assert_eq!(config.access.default_match, MatchPolicy::All);
    }

    #[test]
    fn test_invalid_match_policy() {
        let config = r#"
            [access]
            default_match = "most"
        "#;
        let result: Result<DocsConfig, _> = toml::from_str(config);
        assert!(result.is_err());
    }
}
