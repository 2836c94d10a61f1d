// ==========================================
// 履约失败分析 - 分析配置
// ==========================================
// 存储: JSON 文件（可选）, 缺失字段使用默认值
// 查找顺序: 显式路径 → 环境变量 → 用户配置目录 → 内置默认值
// ==========================================

use crate::importer::row_classifier::NO_STOCK_AVAILABLE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "ORDER_FAILURE_ANALYZER_CONFIG";

/// 用户配置目录下的子目录与文件名
pub const CONFIG_DIR_NAME: &str = "order-failure-analyzer";
pub const CONFIG_FILE_NAME: &str = "config.json";

/// 默认本土国家代码
pub const DEFAULT_DOMESTIC_COUNTRY: &str = "US";

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("配置值无效 (key: {key}): {message}")]
    InvalidValue { key: String, message: String },
}

// ==========================================
// AnalyzerConfig - 分析配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// 目标失败代码（TRIM 后精确匹配）
    pub failure_code: String,
    /// 本土国家代码（地域分桶）
    pub domestic_country_code: String,
    /// 导出目录
    pub output_dir: PathBuf,
    /// 界面语言（zh-CN / en）
    pub locale: String,
    /// 命令行预览行数
    pub preview_rows: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            failure_code: NO_STOCK_AVAILABLE.to_string(),
            domestic_country_code: DEFAULT_DOMESTIC_COUNTRY.to_string(),
            output_dir: PathBuf::from("."),
            locale: "zh-CN".to_string(),
            preview_rows: 10,
        }
    }
}

impl AnalyzerConfig {
    /// 从 JSON 文件加载
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: AnalyzerConfig =
            serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        config.validate()?;
        debug!(path = %path.display(), "配置文件已加载");
        Ok(config)
    }

    /// 按查找顺序加载配置
    ///
    /// # 参数
    /// - explicit: 命令行显式指定的配置路径
    ///
    /// # 返回
    /// - 找到的第一个配置; 均不存在时返回默认配置
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        // 允许通过环境变量显式指定配置路径（便于调试/测试/CI）
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Self::from_file(trimmed);
            }
        }

        if let Some(path) = default_config_path().filter(|p| p.exists()) {
            return Self::from_file(path);
        }

        info!("未找到配置文件, 使用默认配置");
        Ok(Self::default())
    }

    /// 校验配置值
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.failure_code.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "failure_code".to_string(),
                message: "不能为空".to_string(),
            });
        }
        if self.domestic_country_code.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "domestic_country_code".to_string(),
                message: "不能为空".to_string(),
            });
        }
        Ok(())
    }
}

/// 用户配置目录下的默认配置文件路径
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
