//! Runtime configuration: default artifact locations and visualization limits.

use std::path::PathBuf;

pub const DATA_DIR_ENV: &str = "VALUES_COMPASS_DATA_DIR";
pub const VIZ_MAX_NODES_ENV: &str = "VALUES_COMPASS_VIZ_MAX_NODES";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompassConfig {
    /// Directory holding the default input and output artifacts.
    pub data_dir: PathBuf,
    /// Node cap for DOT exports before sampling kicks in.
    pub viz_max_nodes: usize,
}

impl Default for CompassConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            viz_max_nodes: 20,
        }
    }
}

impl CompassConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|d| !d.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup(VIZ_MAX_NODES_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => config.viz_max_nodes = n,
                _ => tracing::warn!(
                    value = %raw,
                    default = config.viz_max_nodes,
                    "ignoring invalid {VIZ_MAX_NODES_ENV}"
                ),
            }
        }
        config
    }

    pub fn values_csv(&self) -> PathBuf {
        self.data_dir.join("expanded_values.csv")
    }

    pub fn formal_taxonomy(&self) -> PathBuf {
        self.data_dir.join("formal_taxonomy.json")
    }

    pub fn lattice_taxonomy(&self) -> PathBuf {
        self.data_dir.join("lattice_taxonomy.json")
    }

    pub fn validation_report(&self) -> PathBuf {
        self.data_dir.join("validation_report.json")
    }
}
