// ==========================================
// 履约失败分析 - API层错误类型
// ==========================================
// 职责: 汇总导入/配置/导出错误, 转换为面向调用方的错误消息
// ==========================================

use crate::config::ConfigError;
use crate::importer::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    // ==========================================
    // 导入错误
    // ==========================================
    /// 表结构不符（在处理任何行之前失败）
    #[error("文件结构不符: {0}")]
    SchemaError(String),

    #[error("文件导入失败: {0}")]
    ImportError(String),

    // ==========================================
    // 配置与导出错误
    // ==========================================
    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("导出失败: {0}")]
    ExportError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        if err.is_schema_error() {
            ApiError::SchemaError(err.to_string())
        } else {
            ApiError::ImportError(err.to_string())
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<csv::Error> for ApiError {
    fn from(err: csv::Error) -> Self {
        ApiError::ExportError(err.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::ExportError(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InternalError(format!("JSON 序列化失败: {}", err))
    }
}

/// API层 Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
