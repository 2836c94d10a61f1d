// ==========================================
// 履约失败分析 - 导入管道 Trait
// ==========================================
// 职责: 定义导入各阶段接口（不包含实现）
// 流程: 文件解析 → 行分类 → 失败详情解析 → 订单聚合
// ==========================================

use crate::domain::order::{FailureRow, RawRow};
use crate::importer::error::ImportResult;
use serde::Serialize;
use std::path::Path;

// ==========================================
// ParsedTable - 文件解析结果
// ==========================================
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParsedTable {
    /// 按位置映射后的数据行（保持源顺序）
    pub rows: Vec<RawRow>,
    /// 因列数超出表头而被跳过的行号
    pub skipped_lines: Vec<usize>,
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为按位置映射的原始行
    ///
    /// # 参数
    /// - file_path: 文件路径
    ///
    /// # 返回
    /// - Ok(ParsedTable): 数据行 + 被跳过的畸形行
    /// - Err: 文件读取错误、表结构不符（表头列数 ≠ 16）
    fn parse_to_raw_rows(&self, file_path: &Path) -> ImportResult<ParsedTable>;
}

// ==========================================
// RowClassifier Trait
// ==========================================
// 用途: 按失败代码过滤并完成列选择（阶段 1）
// 实现者: NoStockRowClassifier
pub trait RowClassifier: Send + Sync {
    /// 过滤出目标失败代码的行, 保持源顺序
    fn classify(&self, rows: Vec<RawRow>) -> Vec<FailureRow>;
}

// ==========================================
// FailureDetailParser Trait
// ==========================================
// 用途: 从失败详情文本中提取缺货 SKU（阶段 2, 逐行）
// 实现者: BracketDetailParser
pub trait FailureDetailParser: Send + Sync {
    /// 返回声明为缺货的 SKU 列表（可能为空, 不校验 SKU 是否真实存在）
    fn unavailable_skus(&self, detail: &str) -> Vec<String>;
}
