// ==========================================
// 履约失败分析 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 结构性错误（表结构不符 / 数量无法解析）中止整次运行
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .csv/.xlsx/.xls）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 表结构错误 =====
    #[error("表结构不符: 期望 {expected} 列，实际 {actual} 列")]
    SchemaMismatch { expected: usize, actual: usize },

    #[error("文件无表头行")]
    MissingHeader,

    // ===== 数据转换错误 =====
    #[error("数量无法解析为非负整数 (行 {line}, 订单 {order_number}, SKU {sku}): {value}")]
    InvalidQuantity {
        line: usize,
        order_number: String,
        sku: String,
        value: String,
    },

    /// 缺货数量合计超出 u64 范围
    #[error("缺货数量合计溢出 (订单 {order_number}, SKU {sku})")]
    QuantityOverflow { order_number: String, sku: String },
}

impl ImportError {
    /// 是否为表结构类错误（在处理任何行之前即失败）
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            ImportError::SchemaMismatch { .. } | ImportError::MissingHeader
        )
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
