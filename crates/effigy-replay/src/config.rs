use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct ReplayConfig {
    pub grid: GridSection,
    pub logging: LoggingSection,
    pub replay: ReplaySection,
    #[serde(default)]
    pub catalog: CatalogSection,
    #[serde(default)]
    pub session: SessionSection,
}

#[derive(Debug, Deserialize)]
pub struct GridSection {
    pub width: u16,
    pub height: u16,
}

#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct ReplaySection {
    /// Script path, relative to the config file.
    pub script: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CatalogSection {
    /// Shape catalog JSON, relative to the config file. Builtin shapes when absent.
    #[serde(default)]
    pub path: Option<String>,
}

/// What the host does when the drag session rejects a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidStatePolicy {
    /// Stop the replay with an error.
    Abort,
    /// Log the rejection and carry on.
    Log,
}

#[derive(Debug, Deserialize)]
pub struct SessionSection {
    #[serde(default = "default_on_invalid_state")]
    pub on_invalid_state: InvalidStatePolicy,
}

fn default_on_invalid_state() -> InvalidStatePolicy {
    if cfg!(debug_assertions) {
        InvalidStatePolicy::Abort
    } else {
        InvalidStatePolicy::Log
    }
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            on_invalid_state: default_on_invalid_state(),
        }
    }
}

impl ReplayConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }
}
