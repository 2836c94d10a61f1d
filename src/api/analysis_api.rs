// ==========================================
// 履约失败分析 - 分析API
// ==========================================
// 职责: 一次分析 = 一个文件 → 一个不可变订单簿; 按视图渲染与导出
// 不做跨请求缓存, 每次 analyze_file 都重新构建
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::api::output_table::OutputTable;
use crate::config::AnalyzerConfig;
use crate::domain::order::OrderBook;
use crate::domain::types::OutputView;
use crate::engine::{ClassificationEngine, ClassificationSummary};
use crate::importer::{ImportStats, OrderImporter};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

/// 分析报告（可序列化的元信息）
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// 运行 ID
    pub run_id: String,
    /// 源文件路径
    pub source_file: String,
    /// 生成时间
    pub generated_at: DateTime<Utc>,
    /// 导入统计
    pub stats: ImportStats,
    /// 分类汇总
    pub summary: ClassificationSummary,
}

// ==========================================
// AnalysisSession - 单次分析结果
// ==========================================
pub struct AnalysisSession {
    report: AnalysisReport,
    book: OrderBook,
    engine: ClassificationEngine,
}

impl AnalysisSession {
    pub fn report(&self) -> &AnalysisReport {
        &self.report
    }

    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    /// 渲染指定视图
    pub fn render(&self, view: OutputView) -> OutputTable {
        match view {
            OutputView::AllAvailable => {
                OutputTable::from_orders(&self.engine.all_available(&self.book))
            }
            OutputView::FailedOrders => {
                OutputTable::from_orders(&self.engine.failed_orders(&self.book))
            }
            OutputView::SkuFailsUs => OutputTable::from_sku_totals(
                &self.engine.geographic_failure_totals(&self.book).domestic,
            ),
            OutputView::SkuFailsNonUs => OutputTable::from_sku_totals(
                &self.engine.geographic_failure_totals(&self.book).rest_of_world,
            ),
        }
    }

    /// 渲染为 CSV 文本
    pub fn render_csv(&self, view: OutputView) -> ApiResult<String> {
        self.render(view).to_csv()
    }

    /// 导出单个视图到目录, 返回文件路径
    pub fn export(&self, view: OutputView, output_dir: &Path) -> ApiResult<PathBuf> {
        std::fs::create_dir_all(output_dir)?;
        let path = output_dir.join(view.file_name());
        let table = self.render(view);
        table.write_csv(&path)?;
        info!(
            run_id = %self.report.run_id,
            view = %view,
            rows = table.len(),
            path = %path.display(),
            "视图已导出"
        );
        Ok(path)
    }

    /// 导出全部视图
    pub fn export_all(&self, output_dir: &Path) -> ApiResult<Vec<PathBuf>> {
        OutputView::ALL
            .iter()
            .map(|view| self.export(*view, output_dir))
            .collect()
    }

    /// 报告 JSON
    pub fn report_json(&self) -> ApiResult<String> {
        Ok(serde_json::to_string_pretty(&self.report)?)
    }
}

// ==========================================
// AnalysisApi - 分析API
// ==========================================
pub struct AnalysisApi {
    config: AnalyzerConfig,
}

impl AnalysisApi {
    /// 创建新的 AnalysisApi 实例
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// 分析文件
    ///
    /// # 参数
    /// - file_path: 源文件路径（.csv / .xlsx / .xls）
    ///
    /// # 返回
    /// - Ok(AnalysisSession): 完整分析结果
    /// - Err(ApiError): 表结构不符、数量无法解析、文件错误
    pub fn analyze_file<P: AsRef<Path>>(&self, file_path: P) -> ApiResult<AnalysisSession> {
        let path = file_path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(ApiError::InvalidInput("文件路径为空".to_string()));
        }

        let run_id = Uuid::new_v4().to_string();
        info!(run_id = %run_id, file = %path.display(), "开始分析");

        let importer = OrderImporter::from_config(&self.config);
        let outcome = importer.import_file(path)?;

        let engine = ClassificationEngine::from_config(&self.config);
        let summary = engine.summarize(&outcome.book);
        info!(
            run_id = %run_id,
            orders = summary.total_orders,
            all_available = summary.all_available_orders,
            failed = summary.failed_orders,
            "分析完成"
        );

        Ok(AnalysisSession {
            report: AnalysisReport {
                run_id,
                source_file: path.display().to_string(),
                generated_at: Utc::now(),
                stats: outcome.stats,
                summary,
            },
            book: outcome.book,
            engine,
        })
    }
}

impl Default for AnalysisApi {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}
