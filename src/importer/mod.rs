// ==========================================
// 履约失败分析 - 导入层
// ==========================================
// 职责: 外部文件 → 订单簿（OrderBook）
// 支持: CSV, Excel
// ==========================================

// 模块声明
pub mod error;
pub mod failure_detail_parser;
pub mod file_parser;
pub mod order_aggregator;
pub mod order_import_trait;
pub mod order_importer;
pub mod row_classifier;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use failure_detail_parser::{extract_unavailable_skus, BracketDetailParser};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use order_aggregator::OrderAggregator;
pub use order_importer::{ImportOutcome, ImportStats, OrderImporter};
pub use row_classifier::{NoStockRowClassifier, NO_STOCK_AVAILABLE};

// 重导出 Trait 接口
pub use order_import_trait::{FailureDetailParser, FileParser, ParsedTable, RowClassifier};
