// ==========================================
// 履约失败分析 - 领域类型定义
// ==========================================
// 职责: 地域分桶 / 输出视图等枚举
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 地域分桶 (Region)
// ==========================================
// 仅用于缺货数量汇总: 国家代码等于本土代码 → Domestic, 其余 → RestOfWorld
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Region {
    Domestic,    // 本土（默认 US）
    RestOfWorld, // 其他国家/地区
}

impl Region {
    /// 按国家代码判定地域（国家字段先 TRIM，大小写敏感）
    pub fn classify(country: &str, domestic_code: &str) -> Self {
        if country.trim() == domestic_code {
            Region::Domestic
        } else {
            Region::RestOfWorld
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Domestic => write!(f, "DOMESTIC"),
            Region::RestOfWorld => write!(f, "REST_OF_WORLD"),
        }
    }
}

// ==========================================
// 输出视图 (Output View)
// ==========================================
// 四种可渲染/可下载的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutputView {
    AllAvailable,      // 全部可用订单
    FailedOrders,      // 存在缺货的订单
    SkuFailsUs,        // 本土 SKU 缺货汇总
    SkuFailsNonUs,     // 非本土 SKU 缺货汇总
}

impl OutputView {
    /// 全部视图（导出顺序）
    pub const ALL: [OutputView; 4] = [
        OutputView::AllAvailable,
        OutputView::FailedOrders,
        OutputView::SkuFailsUs,
        OutputView::SkuFailsNonUs,
    ];

    /// 下载文件名
    pub fn file_name(&self) -> &'static str {
        match self {
            OutputView::AllAvailable => "orders_all_available.csv",
            OutputView::FailedOrders => "failed_orders.csv",
            OutputView::SkuFailsUs => "sku_fails_us.csv",
            OutputView::SkuFailsNonUs => "sku_fails_non_us.csv",
        }
    }

    /// i18n 标题键
    pub fn title_key(&self) -> &'static str {
        match self {
            OutputView::AllAvailable => "view.all_available",
            OutputView::FailedOrders => "view.failed_orders",
            OutputView::SkuFailsUs => "view.sku_fails_us",
            OutputView::SkuFailsNonUs => "view.sku_fails_non_us",
        }
    }

    /// 视图短名（日志与命令行）
    pub fn cli_name(&self) -> &'static str {
        match self {
            OutputView::AllAvailable => "all-available",
            OutputView::FailedOrders => "failed",
            OutputView::SkuFailsUs => "sku-us",
            OutputView::SkuFailsNonUs => "sku-non-us",
        }
    }
}

impl fmt::Display for OutputView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cli_name())
    }
}
