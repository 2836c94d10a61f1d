// ==========================================
// 履约失败分析 - 分类查询引擎
// ==========================================
// 输入: OrderBook（只读）
// 输出: 全部可用订单 / 缺货订单 / 按地域的 SKU 缺货数量汇总
// 红线: 查询不修改订单簿, 只生成新的派生结构
// ==========================================

use crate::config::AnalyzerConfig;
use crate::domain::order::{OrderBook, OrderRecord};
use crate::domain::types::Region;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

// ==========================================
// SkuTotal - 单个 SKU 的缺货数量合计
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkuTotal {
    pub sku: String,
    pub total_quantity: u64,
}

// ==========================================
// GeoFailureTotals - 按地域的缺货汇总
// ==========================================
// 每张表按数量降序; 数量相同按首次出现顺序
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeoFailureTotals {
    pub domestic: Vec<SkuTotal>,
    pub rest_of_world: Vec<SkuTotal>,
}

impl GeoFailureTotals {
    pub fn region(&self, region: Region) -> &[SkuTotal] {
        match region {
            Region::Domestic => &self.domestic,
            Region::RestOfWorld => &self.rest_of_world,
        }
    }
}

// ==========================================
// ClassificationSummary - 汇总统计
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassificationSummary {
    pub total_orders: usize,
    pub all_available_orders: usize,
    pub failed_orders: usize,
    pub failed_lines: usize,
    pub failed_units: u64,
}

/// 保持插入顺序的累加器
///
/// 订单簿只能由聚合器构建, 聚合器已保证全部缺货数量之和不溢出 u64,
/// 因此这里及 summarize 中的累加不会溢出
#[derive(Default)]
struct OrderedTotals {
    totals: Vec<SkuTotal>,
    index: HashMap<String, usize>,
}

impl OrderedTotals {
    fn add(&mut self, sku: &str, quantity: u64) {
        match self.index.get(sku) {
            Some(&pos) => self.totals[pos].total_quantity += quantity,
            None => {
                self.index.insert(sku.to_string(), self.totals.len());
                self.totals.push(SkuTotal {
                    sku: sku.to_string(),
                    total_quantity: quantity,
                });
            }
        }
    }

    /// 数量降序（稳定排序, 相同数量保持首次出现顺序）
    fn into_sorted(self) -> Vec<SkuTotal> {
        let mut totals = self.totals;
        totals.sort_by(|a, b| b.total_quantity.cmp(&a.total_quantity));
        totals
    }
}

// ==========================================
// ClassificationEngine - 分类查询引擎
// ==========================================
pub struct ClassificationEngine {
    domestic_country_code: String,
}

impl ClassificationEngine {
    pub fn new(domestic_country_code: impl Into<String>) -> Self {
        Self {
            domestic_country_code: domestic_country_code.into(),
        }
    }

    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self::new(config.domestic_country_code.clone())
    }

    /// 全部 SKU 可用的订单（保持订单簿顺序）
    pub fn all_available<'a>(&self, book: &'a OrderBook) -> Vec<&'a OrderRecord> {
        book.iter().filter(|order| order.is_all_available()).collect()
    }

    /// 至少一个 SKU 缺货的订单（与 all_available 互补）
    pub fn failed_orders<'a>(&self, book: &'a OrderBook) -> Vec<&'a OrderRecord> {
        book.iter().filter(|order| order.has_failure()).collect()
    }

    /// 缺货数量按 SKU 汇总, 分本土 / 非本土两张表
    pub fn geographic_failure_totals(&self, book: &OrderBook) -> GeoFailureTotals {
        let mut domestic = OrderedTotals::default();
        let mut rest_of_world = OrderedTotals::default();

        for order in book {
            let bucket = match Region::classify(order.country(), &self.domestic_country_code) {
                Region::Domestic => &mut domestic,
                Region::RestOfWorld => &mut rest_of_world,
            };
            for line in order.unavailable_items() {
                bucket.add(&line.sku, line.status.quantity);
            }
        }

        let totals = GeoFailureTotals {
            domestic: domestic.into_sorted(),
            rest_of_world: rest_of_world.into_sorted(),
        };
        debug!(
            domestic_skus = totals.domestic.len(),
            rest_of_world_skus = totals.rest_of_world.len(),
            "地域缺货汇总完成"
        );
        totals
    }

    /// 汇总统计
    pub fn summarize(&self, book: &OrderBook) -> ClassificationSummary {
        book.iter().fold(
            ClassificationSummary {
                total_orders: book.len(),
                ..Default::default()
            },
            |mut summary, order| {
                if order.has_failure() {
                    summary.failed_orders += 1;
                } else {
                    summary.all_available_orders += 1;
                }
                for line in order.unavailable_items() {
                    summary.failed_lines += 1;
                    summary.failed_units += line.status.quantity;
                }
                summary
            },
        )
    }
}

impl Default for ClassificationEngine {
    fn default() -> Self {
        Self::from_config(&AnalyzerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// (订单号, 国家, [(SKU, 数量, 可用)])
    fn book(orders: &[(&str, &str, &[(&str, u64, bool)])]) -> OrderBook {
        let mut book = OrderBook::new();
        for (order_id, country, items) in orders {
            let order = book.entry(order_id, country);
            for (sku, qty, available) in items.iter() {
                order.upsert_item(sku, *qty);
                if !available {
                    order.mark_unavailable(sku);
                }
            }
        }
        book
    }

    fn ids(orders: &[&OrderRecord]) -> Vec<String> {
        orders.iter().map(|o| o.order_id().to_string()).collect()
    }

    fn totals(pairs: &[(&str, u64)]) -> Vec<SkuTotal> {
        pairs
            .iter()
            .map(|(sku, q)| SkuTotal {
                sku: sku.to_string(),
                total_quantity: *q,
            })
            .collect()
    }

    #[test]
    fn test_all_available_and_failed_partition() {
        let book = book(&[
            ("A", "US", &[("S1", 1, true), ("S2", 1, true)]),
            ("B", "US", &[("S1", 1, true), ("S3", 2, false)]),
            ("C", "DE", &[("S4", 1, false)]),
            ("D", "DE", &[("S5", 1, true)]),
        ]);
        let engine = ClassificationEngine::default();

        let available = ids(&engine.all_available(&book));
        let failed = ids(&engine.failed_orders(&book));
        assert_eq!(available, vec!["A", "D"]);
        assert_eq!(failed, vec!["B", "C"]);
        assert_eq!(available.len() + failed.len(), book.len());
        assert!(available.iter().all(|id| !failed.contains(id)));
    }

    #[test]
    fn test_geographic_totals_split_by_country() {
        let book = book(&[
            ("A", "US", &[("SKU", 5, false)]),
            ("B", "DE", &[("SKU", 3, false)]),
        ]);

        let totals_by_region = ClassificationEngine::default().geographic_failure_totals(&book);
        assert_eq!(totals_by_region.domestic, totals(&[("SKU", 5)]));
        assert_eq!(totals_by_region.rest_of_world, totals(&[("SKU", 3)]));
        assert_eq!(totals_by_region.region(Region::Domestic).len(), 1);
    }

    #[test]
    fn test_geographic_totals_accumulate_and_sort_descending() {
        let book = book(&[
            ("A", "US", &[("X", 2, false), ("Y", 1, false), ("Z", 9, true)]),
            ("B", " US ", &[("Y", 4, false)]),
            ("C", "US", &[("X", 1, false), ("W", 7, false)]),
        ]);

        let result = ClassificationEngine::default().geographic_failure_totals(&book);
        assert_eq!(result.domestic, totals(&[("W", 7), ("Y", 5), ("X", 3)]));
        assert!(result.rest_of_world.is_empty());
    }

    #[test]
    fn test_geographic_totals_ties_keep_first_seen_order() {
        let book = book(&[
            ("A", "FR", &[("B", 2, false), ("A", 2, false)]),
            ("B", "FR", &[("C", 2, false), ("D", 5, false)]),
        ]);

        let result = ClassificationEngine::default().geographic_failure_totals(&book);
        assert_eq!(
            result.rest_of_world,
            totals(&[("D", 5), ("B", 2), ("A", 2), ("C", 2)])
        );
    }

    #[test]
    fn test_available_items_never_counted() {
        let book = book(&[("A", "US", &[("S1", 10, true)])]);
        let result = ClassificationEngine::default().geographic_failure_totals(&book);
        assert_eq!(result, GeoFailureTotals::default());
    }

    #[test]
    fn test_custom_domestic_code() {
        let book = book(&[
            ("A", "US", &[("S", 1, false)]),
            ("B", "CA", &[("S", 2, false)]),
        ]);
        let result = ClassificationEngine::new("CA").geographic_failure_totals(&book);
        assert_eq!(result.domestic, totals(&[("S", 2)]));
        assert_eq!(result.rest_of_world, totals(&[("S", 1)]));
    }

    #[test]
    fn test_summary() {
        let book = book(&[
            ("A", "US", &[("S1", 1, true)]),
            ("B", "US", &[("S1", 3, false), ("S2", 4, false), ("S3", 1, true)]),
        ]);

        let summary = ClassificationEngine::default().summarize(&book);
        assert_eq!(
            summary,
            ClassificationSummary {
                total_orders: 2,
                all_available_orders: 1,
                failed_orders: 1,
                failed_lines: 2,
                failed_units: 7,
            }
        );
    }

    #[test]
    fn test_empty_book() {
        let book = OrderBook::new();
        let engine = ClassificationEngine::default();
        assert!(engine.all_available(&book).is_empty());
        assert!(engine.failed_orders(&book).is_empty());
        assert_eq!(engine.geographic_failure_totals(&book), GeoFailureTotals::default());
        assert_eq!(engine.summarize(&book).total_orders, 0);
    }
}
