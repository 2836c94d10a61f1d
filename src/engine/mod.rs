// ==========================================
// 履约失败分析 - 引擎层
// ==========================================
// 职责: 订单簿上的分类查询（只读）
// ==========================================

pub mod classification;

pub use classification::{
    ClassificationEngine, ClassificationSummary, GeoFailureTotals, SkuTotal,
};
