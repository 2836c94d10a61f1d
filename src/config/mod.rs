// ==========================================
// 履约失败分析 - 配置层
// ==========================================
// 职责: 分析配置加载（JSON 文件 + 默认值）
// ==========================================

pub mod analyzer_config;

// 重导出核心配置
pub use analyzer_config::{default_config_path, AnalyzerConfig, ConfigError, CONFIG_PATH_ENV};
