// ==========================================
// 履约失败分析 - API 层
// ==========================================
// 职责: 面向界面/命令行的分析入口, 视图渲染与 CSV 导出
// ==========================================

pub mod analysis_api;
pub mod error;
pub mod output_table;

pub use analysis_api::{AnalysisApi, AnalysisReport, AnalysisSession};
pub use error::{ApiError, ApiResult};
pub use output_table::OutputTable;
