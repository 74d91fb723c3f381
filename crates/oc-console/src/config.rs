//! Console configuration, loadable from TOML with an environment override.

use std::time::Duration;

use serde::Deserialize;

use oc_engine::EngineConfig;

/// Environment variable that forces the evidence panel on or off.
pub const REVEAL_EVIDENCE_ENV: &str = "OMNICHAIN_REVEAL_EVIDENCE";

/// Top-level configuration for the console shell.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConsoleConfig {
    /// Delay between submitting a query and showing its answer.
    #[serde(default = "default_thinking_delay_ms")]
    pub thinking_delay_ms: u64,
    /// Print the evidence JSON under every answer.
    #[serde(default)]
    pub reveal_evidence: bool,
    /// Engine tunables.
    #[serde(default)]
    pub engine: EngineConfig,
}

fn default_thinking_delay_ms() -> u64 {
    600
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            thinking_delay_ms: default_thinking_delay_ms(),
            reveal_evidence: false,
            engine: EngineConfig::default(),
        }
    }
}

impl ConsoleConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// File config when a path is given, defaults otherwise, then env overrides.
    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    pub fn apply_env(&mut self) {
        self.apply_reveal_override(std::env::var(REVEAL_EVIDENCE_ENV).ok().as_deref());
    }

    fn apply_reveal_override(&mut self, value: Option<&str>) {
        if let Some(v) = value {
            self.reveal_evidence = v.eq_ignore_ascii_case("true") || v == "1";
        }
    }

    pub fn thinking_delay(&self) -> Duration {
        Duration::from_millis(self.thinking_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_minimal_config() {
        let config: ConsoleConfig = toml::from_str("").unwrap();
        assert_eq!(config.thinking_delay_ms, 600); // default
        assert!(!config.reveal_evidence);
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    fn deserialize_full_config() {
        let toml = r#"
thinking_delay_ms = 250
reveal_evidence = true

[engine]
revenue_multiplier = 12.0
low_inventory_threshold = 2000
extra_blocked_terms = ["lottery"]
"#;
        let config: ConsoleConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.thinking_delay(), Duration::from_millis(250));
        assert!(config.reveal_evidence);
        assert_eq!(config.engine.revenue_multiplier, 12.0);
        assert_eq!(config.engine.low_inventory_threshold, 2000);
        assert_eq!(config.engine.extra_blocked_terms, vec!["lottery"]);
    }

    #[test]
    fn reveal_override_values() {
        let mut config = ConsoleConfig::default();
        config.apply_reveal_override(Some("TRUE"));
        assert!(config.reveal_evidence);
        config.apply_reveal_override(Some("0"));
        assert!(!config.reveal_evidence);
        config.apply_reveal_override(Some("1"));
        assert!(config.reveal_evidence);
        config.apply_reveal_override(None);
        assert!(config.reveal_evidence); // unset leaves it alone
    }

    #[test]
    fn load_without_path_uses_defaults() {
        let config = ConsoleConfig::load(None).unwrap();
        assert_eq!(config.thinking_delay_ms, 600);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(ConsoleConfig::from_file("/nonexistent/omnichain.toml").is_err());
    }

    #[test]
    fn load_from_file() {
        let path = std::env::temp_dir().join(format!("oc-console-{}.toml", std::process::id()));
        std::fs::write(&path, "thinking_delay_ms = 5\n").unwrap();
        let config = ConsoleConfig::load(path.to_str()).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.thinking_delay_ms, 5);
    }
}
