// ==========================================
// 履约失败分析 - 订单聚合器
// ==========================================
// 阶段 3: 按订单号合并全部分类后的行
// 规则（逐行, 按源顺序）:
//   1. 查找/创建订单; 仅创建时写入国家
//   2. 写入/覆盖本行 SKU: {quantity, available: true}（last-write-wins）
//   3. 解析本行失败详情, 订单内已存在的 SKU 标记为缺货; 未知 SKU 忽略
// 数量无法解析 → 整次运行失败
// 缺货数量总和超出 u64 → 整次运行失败（查询层的各项合计均不超过该总和）
// ==========================================

use crate::domain::order::{FailureRow, OrderBook};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::failure_detail_parser::BracketDetailParser;
use crate::importer::order_import_trait::FailureDetailParser;
use tracing::{debug, trace};

pub struct OrderAggregator {
    detail_parser: Box<dyn FailureDetailParser>,
}

impl OrderAggregator {
    pub fn new(detail_parser: Box<dyn FailureDetailParser>) -> Self {
        Self { detail_parser }
    }

    /// 解析数量（十进制非负整数, 允许首尾空白）
    pub fn parse_quantity(row: &FailureRow) -> ImportResult<u64> {
        row.quantity
            .trim()
            .parse::<u64>()
            .map_err(|_| ImportError::InvalidQuantity {
                line: row.line_number,
                order_number: row.order_number.clone(),
                sku: row.sku.trim().to_string(),
                value: row.quantity.clone(),
            })
    }

    /// 一次遍历构建订单簿
    pub fn aggregate(&self, rows: &[FailureRow]) -> ImportResult<OrderBook> {
        let mut book = OrderBook::new();

        for row in rows {
            let sku = row.sku.trim();
            let quantity = Self::parse_quantity(row)?;

            let order = book.entry(&row.order_number, &row.country);
            order.upsert_item(sku, quantity);

            for unavailable in self.detail_parser.unavailable_skus(&row.fail_detail) {
                if order.mark_unavailable(&unavailable) {
                    trace!(
                        order = %row.order_number,
                        sku = %unavailable,
                        line = row.line_number,
                        "标记缺货"
                    );
                }
            }
        }

        let failed_units = Self::checked_failed_units(&book)?;
        debug!(rows = rows.len(), orders = book.len(), failed_units, "订单聚合完成");
        Ok(book)
    }

    /// 全部缺货数量之和; 溢出时返回出错的订单与 SKU
    fn checked_failed_units(book: &OrderBook) -> ImportResult<u64> {
        let mut total: u64 = 0;
        for order in book {
            for line in order.unavailable_items() {
                total = total.checked_add(line.status.quantity).ok_or_else(|| {
                    ImportError::QuantityOverflow {
                        order_number: order.order_id().to_string(),
                        sku: line.sku.clone(),
                    }
                })?;
            }
        }
        Ok(total)
    }
}

impl Default for OrderAggregator {
    fn default() -> Self {
        Self::new(Box::new(BracketDetailParser))
    }
}
