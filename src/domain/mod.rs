// ==========================================
// 履约失败分析 - 领域层
// ==========================================
// 职责: 源行 / 订单聚合 / 枚举类型
// ==========================================

pub mod order;
pub mod types;

// 重导出核心类型
pub use order::{
    FailureRow, ItemLine, ItemStatus, OrderBook, OrderRecord, RawRow, RAW_COLUMN_COUNT,
    RAW_COLUMN_NAMES,
};
pub use types::{OutputView, Region};
