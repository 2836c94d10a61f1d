// ==========================================
// 履约失败分析 - 行分类器实现
// ==========================================
// 阶段 1: 按失败代码过滤 + 列选择
// 规则: TRIM 后与目标代码完全相等（大小写敏感）才保留; 其余行静默丢弃
// ==========================================

use crate::domain::order::{FailureRow, RawRow};
use crate::importer::order_import_trait::RowClassifier;
use tracing::debug;

/// 默认目标失败代码
pub const NO_STOCK_AVAILABLE: &str = "NO_STOCK_AVAILABLE";

pub struct NoStockRowClassifier {
    failure_code: String,
}

impl NoStockRowClassifier {
    pub fn new(failure_code: impl Into<String>) -> Self {
        Self {
            failure_code: failure_code.into(),
        }
    }

    pub fn failure_code(&self) -> &str {
        &self.failure_code
    }

    pub fn matches(&self, fail_code: &str) -> bool {
        fail_code.trim() == self.failure_code
    }
}

impl Default for NoStockRowClassifier {
    fn default() -> Self {
        Self::new(NO_STOCK_AVAILABLE)
    }
}

impl RowClassifier for NoStockRowClassifier {
    fn classify(&self, rows: Vec<RawRow>) -> Vec<FailureRow> {
        let total = rows.len();
        let retained: Vec<FailureRow> = rows
            .into_iter()
            .filter(|row| self.matches(&row.fail_code))
            .map(RawRow::into_failure_row)
            .collect();

        debug!(
            total,
            retained = retained.len(),
            failure_code = %self.failure_code,
            "行分类完成"
        );
        retained
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(order: &str, code: &str, line: usize) -> RawRow {
        let mut fields = vec![String::new(); 16];
        fields[1] = order.to_string();
        fields[13] = code.to_string();
        RawRow::from_fields(fields, line)
    }

    #[test]
    fn test_exact_match_after_trim() {
        let classifier = NoStockRowClassifier::default();
        assert!(classifier.matches("NO_STOCK_AVAILABLE"));
        assert!(classifier.matches("  NO_STOCK_AVAILABLE \t"));
        assert!(!classifier.matches("no_stock_available"));
        assert!(!classifier.matches(""));
        assert!(!classifier.matches("NO_STOCK_AVAILABLE_X"));
        assert!(!classifier.matches("ADDRESS_INVALID"));
    }

    #[test]
    fn test_classify_preserves_order() {
        let classifier = NoStockRowClassifier::default();
        let rows = vec![
            row("A", "NO_STOCK_AVAILABLE", 2),
            row("B", "ADDRESS_INVALID", 3),
            row("C", " NO_STOCK_AVAILABLE", 4),
            row("D", "", 5),
            row("E", "No_Stock_Available", 6),
        ];

        let retained = classifier.classify(rows);
        let orders: Vec<&str> = retained.iter().map(|r| r.order_number.as_str()).collect();
        assert_eq!(orders, vec!["A", "C"]);
        assert_eq!(retained[1].line_number, 4);
    }

    #[test]
    fn test_custom_failure_code() {
        let classifier = NoStockRowClassifier::new("SHORT_PICK");
        let retained = classifier.classify(vec![
            row("A", "NO_STOCK_AVAILABLE", 2),
            row("B", "SHORT_PICK", 3),
        ]);
        assert_eq!(retained.len(), 1);
        assert_eq!(retained[0].order_number, "B");
    }

    #[test]
    fn test_empty_input() {
        assert!(NoStockRowClassifier::default().classify(Vec::new()).is_empty());
    }
}
