use crate::error::{PlannerError, Result};
use class_planner_common::{LayoutStrategy, DEFAULT_TOTAL_WEEKS};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const SELECTION_FILE_NAME: &str = "selected_classes.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 表示する週数
    pub total_weeks: u32,
    /// CSV列の解決方法
    pub layout: LayoutStrategy,
    /// 選択状態の保存先（省略時は設定ディレクトリ）
    pub store_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            total_weeks: DEFAULT_TOTAL_WEEKS,
            layout: LayoutStrategy::Auto,
            store_path: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PlannerError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("class-planner"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// 選択状態の保存先。`--store` > 設定ファイル > 既定の順
    pub fn selection_path(&self, override_path: Option<PathBuf>) -> Result<PathBuf> {
        match override_path.or_else(|| self.store_path.clone()) {
            Some(path) => Ok(path),
            None => Ok(Self::config_dir()?.join(SELECTION_FILE_NAME)),
        }
    }

    pub fn set_total_weeks(&mut self, weeks: u32) -> Result<()> {
        if weeks == 0 {
            return Err(PlannerError::Config("週数は1以上を指定してください".into()));
        }
        self.total_weeks = weeks;
        self.save()
    }

    pub fn set_layout(&mut self, layout: LayoutStrategy) -> Result<()> {
        self.layout = layout;
        self.save()
    }
}
