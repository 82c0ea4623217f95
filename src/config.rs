use crate::alloc::Bounded;
use crate::circular_buffer::CircularBuffer;
use crate::error::Error;
use crate::policy::FullPolicy;
use log::{error, info, warn};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub buffer: BufferSection,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct BufferSection {
    #[serde(default)]
    pub capacity: usize,
    #[serde(default)]
    pub policy: Option<String>,
    #[serde(default)]
    pub max_elements: Option<usize>,
}

/// Validated buffer settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferConfig {
    pub capacity: usize,
    pub policy: FullPolicy,
    pub max_elements: Option<usize>,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            capacity: 0,
            policy: FullPolicy::Overwrite,
            max_elements: None,
        }
    }
}

impl BufferConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, Error> {
        let cfg: Config = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse TOML config: {}", e)))?;
        Self::from_section(cfg.buffer)
    }

    fn from_section(section: BufferSection) -> Result<Self, Error> {
        let policy = match section.policy.as_deref() {
            None => FullPolicy::Overwrite,
            Some(name) => name.parse().map_err(|e| {
                error!("Invalid policy '{}' in buffer config", name);
                e
            })?,
        };

        if let Some(limit) = section.max_elements {
            if section.capacity > limit {
                error!(
                    "Buffer capacity {} exceeds max_elements {}",
                    section.capacity, limit
                );
                return Err(Error::Config(format!(
                    "capacity {} exceeds max_elements {}",
                    section.capacity, limit
                )));
            }
        }

        if section.capacity == 0 && policy == FullPolicy::Overwrite {
            warn!("Buffer capacity is 0 with overwrite policy - every push will be ignored");
        }

        Ok(Self {
            capacity: section.capacity,
            policy,
            max_elements: section.max_elements,
        })
    }

    /// Allocation strategy enforcing `max_elements`, unbounded when unset.
    pub fn strategy(&self) -> Bounded {
        self.max_elements.map(Bounded::new).unwrap_or_default()
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<BufferConfig, Error> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(Error::Config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    let content = fs::read_to_string(path).map_err(|e| {
        Error::Config(format!(
            "Failed to read config file {}: {}",
            path.display(),
            e
        ))
    })?;

    let cfg = BufferConfig::from_toml_str(&content)?;
    info!("Config loaded from: {}", path.display());
    info!(
        "Buffer capacity {}, policy {}, max_elements {:?}",
        cfg.capacity, cfg.policy, cfg.max_elements
    );
    Ok(cfg)
}

impl<T> CircularBuffer<T, Bounded> {
    /// Builds an empty buffer from validated settings.
    pub fn from_config(cfg: &BufferConfig) -> Result<Self, Error> {
        let mut buffer = Self::with_capacity_in(cfg.capacity, cfg.strategy())?;
        buffer.set_policy(cfg.policy);
        Ok(buffer)
    }
}
