// ==========================================
// 履约失败分析 - 输出表
// ==========================================
// 订单视图: OrderID, Country, Skus（SKU 以逗号拼接, 按插入顺序）
// 汇总视图: Sku, TotalQuantity
// 空结果只输出表头
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::order::OrderRecord;
use crate::engine::SkuTotal;
use serde::Serialize;
use std::path::Path;

pub const ORDER_HEADERS: [&str; 3] = ["OrderID", "Country", "Skus"];
pub const SKU_TOTAL_HEADERS: [&str; 2] = ["Sku", "TotalQuantity"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl OutputTable {
    pub fn from_orders(orders: &[&OrderRecord]) -> Self {
        Self {
            headers: ORDER_HEADERS.iter().map(|h| h.to_string()).collect(),
            rows: orders
                .iter()
                .map(|order| {
                    vec![
                        order.order_id().to_string(),
                        order.country().to_string(),
                        order.skus().collect::<Vec<_>>().join(","),
                    ]
                })
                .collect(),
        }
    }

    pub fn from_sku_totals(totals: &[SkuTotal]) -> Self {
        Self {
            headers: SKU_TOTAL_HEADERS.iter().map(|h| h.to_string()).collect(),
            rows: totals
                .iter()
                .map(|total| vec![total.sku.clone(), total.total_quantity.to_string()])
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 渲染为 CSV 文本（含表头）
    pub fn to_csv(&self) -> ApiResult<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| ApiError::ExportError(e.to_string()))?;
        String::from_utf8(bytes)
            .map_err(|e| ApiError::ExportError(e.to_string()))
    }

    /// 写出 CSV 文件
    pub fn write_csv(&self, path: &Path) -> ApiResult<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// 文本预览（列宽对齐, 最多 limit 行）
    pub fn preview(&self, limit: usize) -> String {
        let shown = &self.rows[..self.rows.len().min(limit)];
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in shown {
            for (idx, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(idx) {
                    *width = (*width).max(cell.chars().count());
                }
            }
        }

        let format_row = |cells: &[String]| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut lines = vec![format_row(self.headers.as_slice())];
        lines.extend(shown.iter().map(|row| format_row(row.as_slice())));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::OrderBook;

    #[test]
    fn test_order_table_joins_skus() {
        let mut book = OrderBook::new();
        let order = book.entry("1001", "US");
        order.upsert_item("SKU1", 1);
        order.upsert_item("SKU2", 2);

        let orders: Vec<&OrderRecord> = book.iter().collect();
        let table = OutputTable::from_orders(&orders);
        assert_eq!(table.headers, vec!["OrderID", "Country", "Skus"]);
        assert_eq!(table.rows, vec![vec!["1001", "US", "SKU1,SKU2"]]);

        let csv = table.to_csv().unwrap();
        assert_eq!(csv, "OrderID,Country,Skus\n1001,US,\"SKU1,SKU2\"\n");
    }

    #[test]
    fn test_sku_total_table() {
        let table = OutputTable::from_sku_totals(&[
            SkuTotal {
                sku: "A".to_string(),
                total_quantity: 5,
            },
            SkuTotal {
                sku: "B".to_string(),
                total_quantity: 3,
            },
        ]);
        assert_eq!(table.to_csv().unwrap(), "Sku,TotalQuantity\nA,5\nB,3\n");
    }

    #[test]
    fn test_empty_table_renders_header_only() {
        let table = OutputTable::from_sku_totals(&[]);
        assert!(table.is_empty());
        assert_eq!(table.to_csv().unwrap(), "Sku,TotalQuantity\n");
    }

    #[test]
    fn test_preview_limits_rows() {
        let totals: Vec<SkuTotal> = (0..5)
            .map(|i| SkuTotal {
                sku: format!("SKU{}", i),
                total_quantity: 10 - i,
            })
            .collect();
        let preview = OutputTable::from_sku_totals(&totals).preview(2);
        let lines: Vec<&str> = preview.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Sku   TotalQuantity");
        assert_eq!(lines[1], "SKU0  10");
    }
}
