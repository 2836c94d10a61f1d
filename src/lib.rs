// ==========================================
// 履约失败分析 - 核心库
// ==========================================
// 输入: 履约失败导出（16 列定位表）
// 输出: 按订单的可用性映射 + 三类分类查询
// 系统定位: 单文件、同步、无持久化
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 源行与订单聚合
pub mod domain;

// 导入层 - 解析 / 分类 / 聚合
pub mod importer;

// 引擎层 - 分类查询
pub mod engine;

// 配置层
pub mod config;

// API 层 - 渲染与导出
pub mod api;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{ItemStatus, OrderBook, OrderRecord, OutputView, RawRow, Region};
pub use engine::{ClassificationEngine, GeoFailureTotals, SkuTotal};
pub use importer::{extract_unavailable_skus, ImportError, OrderImporter};
pub use api::{AnalysisApi, AnalysisSession, ApiError, OutputTable};
pub use config::AnalyzerConfig;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "履约失败分析";
