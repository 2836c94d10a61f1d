// ==========================================
// 履约失败分析 - 导入管道实现
// ==========================================
// 职责: 整合导入流程, 从文件到订单簿
// 流程: 解析 → 分类 → 聚合（同步, 单文件, 一次性计算）
// 失败时不暴露任何部分结果
// ==========================================

use crate::config::AnalyzerConfig;
use crate::domain::order::OrderBook;
use crate::importer::error::ImportResult;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::order_aggregator::OrderAggregator;
use crate::importer::order_import_trait::{FileParser, RowClassifier};
use crate::importer::row_classifier::NoStockRowClassifier;
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument};

// ==========================================
// ImportStats - 导入统计
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    pub data_rows: usize,      // 解析出的数据行（不含表头与被跳过的行）
    pub skipped_lines: usize,  // 列数超出而被跳过的行
    pub matched_rows: usize,   // 失败代码匹配的行
    pub orders: usize,         // 聚合出的订单数
    pub elapsed_ms: u64,       // 耗时（毫秒）
}

#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub book: OrderBook,
    pub stats: ImportStats,
}

// ==========================================
// OrderImporter - 导入管道
// ==========================================
pub struct OrderImporter {
    file_parser: Box<dyn FileParser>,
    row_classifier: Box<dyn RowClassifier>,
    aggregator: OrderAggregator,
}

impl OrderImporter {
    /// 创建导入管道
    ///
    /// # 参数
    /// - file_parser: 文件解析器
    /// - row_classifier: 行分类器
    /// - aggregator: 订单聚合器
    pub fn new(
        file_parser: Box<dyn FileParser>,
        row_classifier: Box<dyn RowClassifier>,
        aggregator: OrderAggregator,
    ) -> Self {
        Self {
            file_parser,
            row_classifier,
            aggregator,
        }
    }

    /// 按配置装配默认组件（按扩展名选择解析器）
    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self::new(
            Box::new(UniversalFileParser),
            Box::new(NoStockRowClassifier::new(config.failure_code.clone())),
            OrderAggregator::default(),
        )
    }

    /// 从文件导入并构建订单簿
    ///
    /// # 返回
    /// - Ok(ImportOutcome): 完整订单簿 + 统计
    /// - Err: 文件错误、表结构不符、数量无法解析
    #[instrument(skip(self, file_path), fields(file = %file_path.as_ref().display()))]
    pub fn import_file<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<ImportOutcome> {
        let start_time = Instant::now();

        debug!("步骤 1: 解析文件");
        let table = self.file_parser.parse_to_raw_rows(file_path.as_ref())?;
        let data_rows = table.rows.len();
        let skipped_lines = table.skipped_lines.len();
        info!(data_rows, skipped_lines, "文件解析完成");

        debug!("步骤 2: 行分类");
        let failure_rows = self.row_classifier.classify(table.rows);
        let matched_rows = failure_rows.len();
        info!(matched_rows, "行分类完成");

        debug!("步骤 3: 订单聚合");
        let book = self.aggregator.aggregate(&failure_rows)?;

        let stats = ImportStats {
            data_rows,
            skipped_lines,
            matched_rows,
            orders: book.len(),
            elapsed_ms: start_time.elapsed().as_millis() as u64,
        };
        info!(orders = stats.orders, elapsed_ms = stats.elapsed_ms, "导入完成");

        Ok(ImportOutcome { book, stats })
    }
}

impl Default for OrderImporter {
    fn default() -> Self {
        Self::from_config(&AnalyzerConfig::default())
    }
}
