// ==========================================
// 履约失败分析 - 文件解析器实现
// ==========================================
// 阶段 0: 文件读取与按位置映射
// 支持: CSV (.csv) / Excel (.xlsx/.xls, 第一个工作表)
// 规则: 表头仅用于校验列数（必须 16 列）, 随后被丢弃
//       数据行列数超过表头 → 跳过并记录行号; 不足 → 补空
// ==========================================

use crate::domain::order::{RawRow, RAW_COLUMN_COUNT};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::order_import_trait::{FileParser, ParsedTable};
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;
use tracing::{debug, warn};

/// 校验表头列数
fn check_header_width(actual: usize) -> ImportResult<()> {
    if actual != RAW_COLUMN_COUNT {
        return Err(ImportError::SchemaMismatch {
            expected: RAW_COLUMN_COUNT,
            actual,
        });
    }
    Ok(())
}

fn check_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_rows(&self, file_path: &Path) -> ImportResult<ParsedTable> {
        let path = file_path;

        // 检查文件存在
        check_exists(path)?;

        // 检查扩展名
        if let Some(ext) = path.extension() {
            if !ext.eq_ignore_ascii_case("csv") {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        // 打开 CSV 文件（表头手动处理, 允许行长度不一致）
        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut records = reader.records();

        // 读取表头
        let header = records.next().ok_or(ImportError::MissingHeader)??;
        check_header_width(header.len())?;

        // 读取所有行
        let mut table = ParsedTable::default();
        for (row_idx, result) in records.enumerate() {
            let record = result?;
            let line_number = record
                .position()
                .map(|pos| pos.line() as usize)
                .unwrap_or(row_idx + 2); // +2: 行号从1开始且跳过表头

            if record.len() > RAW_COLUMN_COUNT {
                warn!(line = line_number, fields = record.len(), "列数超出表头, 跳过该行");
                table.skipped_lines.push(line_number);
                continue;
            }

            // 跳过完全空白的行
            if record.iter().all(|v| v.trim().is_empty()) {
                continue;
            }

            table.rows.push(RawRow::from_fields(record.iter(), line_number));
        }

        debug!(
            rows = table.rows.len(),
            skipped = table.skipped_lines.len(),
            "CSV 解析完成"
        );
        Ok(table)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    /// 单元格转文本（空单元格 → 空串）
    fn cell_text(cell: &Data) -> String {
        match cell {
            Data::Empty => String::new(),
            other => other.to_string(),
        }
    }

    /// 行的有效宽度（最后一个非空单元格之后截断）
    fn used_width(row: &[Data]) -> usize {
        row.iter()
            .rposition(|cell| !Self::cell_text(cell).trim().is_empty())
            .map(|idx| idx + 1)
            .unwrap_or(0)
    }

    /// 表头宽度: 取工作表区域宽度（末列表头为空时仍计入）;
    /// 区域只因超长数据行而超出 16 列时, 表头按 16 列计
    fn header_width(row: &[Data]) -> usize {
        let used = Self::used_width(row);
        if used > RAW_COLUMN_COUNT {
            used
        } else {
            row.len().min(RAW_COLUMN_COUNT).max(used)
        }
    }
}

impl FileParser for ExcelParser {
    fn parse_to_raw_rows(&self, file_path: &Path) -> ImportResult<ParsedTable> {
        let path = file_path;

        // 检查文件存在
        check_exists(path)?;

        // 检查扩展名
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(path)?;

        // 读取第一个 sheet
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;
        let range = workbook.worksheet_range(&sheet_name)?;

        // 区域从第一个非空单元格所在行开始
        let first_line = range.start().map_or(1, |(row, _)| row as usize + 1);

        // 校验表头（第一行）
        let mut rows = range.rows();
        let header_row = rows.next().ok_or(ImportError::MissingHeader)?;
        check_header_width(Self::header_width(header_row))?;

        // 读取数据行
        let mut table = ParsedTable::default();
        for (row_idx, data_row) in rows.enumerate() {
            let line_number = first_line + row_idx + 1;
            let width = Self::used_width(data_row);

            if width > RAW_COLUMN_COUNT {
                warn!(line = line_number, fields = width, "列数超出表头, 跳过该行");
                table.skipped_lines.push(line_number);
                continue;
            }

            // 跳过完全空白的行
            if width == 0 {
                continue;
            }

            table.rows.push(RawRow::from_fields(
                data_row.iter().map(Self::cell_text),
                line_number,
            ));
        }

        debug!(
            sheet = %sheet_name,
            rows = table.rows.len(),
            skipped = table.skipped_lines.len(),
            "Excel 解析完成"
        );
        Ok(table)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_to_raw_rows(&self, file_path: &Path) -> ImportResult<ParsedTable> {
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_to_raw_rows(file_path),
            "xlsx" | "xls" => ExcelParser.parse_to_raw_rows(file_path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
