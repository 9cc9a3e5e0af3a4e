use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    pub data_dir: PathBuf,
    pub tags: PathBuf,
    pub audience_groups: PathBuf,
    pub holidays: PathBuf,
    pub compatibility: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            tags: PathBuf::from("TagsAudienceWeights.json"),
            audience_groups: PathBuf::from("AudienceGroups.json"),
            holidays: PathBuf::from("Holidays.json"),
            compatibility: PathBuf::from("TagCompatibilityData.json"),
        }
    }
}

impl DataPaths {
    pub fn tags_path(&self) -> PathBuf {
        self.resolve(&self.tags)
    }

    pub fn audience_groups_path(&self) -> PathBuf {
        self.resolve(&self.audience_groups)
    }

    pub fn holidays_path(&self) -> PathBuf {
        self.resolve(&self.holidays)
    }

    pub fn compatibility_path(&self) -> PathBuf {
        self.resolve(&self.compatibility)
    }

    fn resolve(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.data_dir.join(file)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub holiday_limit: usize,
    pub holiday_match_limit: usize,
    pub candidate_limit: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            holiday_limit: 3,
            holiday_match_limit: 2,
            candidate_limit: 20,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    pub data: DataPaths,
    pub display: DisplayConfig,
}

impl AdvisorConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        let config_path = path.or_else(default_config_path);
        let mut config = match config_path.as_ref() {
            Some(path) if path.exists() => {
                let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })?;
                toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                    path: path.clone(),
                    source,
                })?
            }
            _ => AdvisorConfig::default(),
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    pub fn write(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let payload = toml::to_string_pretty(self)?;
        std::fs::write(path, payload).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(data_dir) = env::var("STORY_ADVISOR_DATA_DIR") {
            if !data_dir.trim().is_empty() {
                self.data.data_dir = PathBuf::from(data_dir);
            }
        }
        if let Ok(limit) = env::var("STORY_ADVISOR_HOLIDAY_LIMIT") {
            if let Ok(value) = limit.parse::<usize>() {
                self.display.holiday_limit = value;
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("STORY_ADVISOR_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/story-advisor.toml")))
}
