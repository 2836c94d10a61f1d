// ==========================================
// 履约失败分析 - 失败详情解析器
// ==========================================
// 阶段 2: 从失败详情自由文本中提取缺货 SKU 列表
// 规则:
//   1. 只取第一个 '.' 之前的文本（第一句）
//   2. 优先查找 [[ ... ]], 不存在时退回 [ ... ]; 只取第一个匹配
//   3. 括号内容按空白切分, 每个 token 即一个 SKU
// 括号内容至少一个字符且不跨行; 无括号 → 空结果（不是错误）
// ==========================================

use crate::importer::order_import_trait::FailureDetailParser;

/// 第一句: 第一个 '.' 之前的文本（无 '.' 时为全文）
pub fn first_sentence(detail: &str) -> &str {
    detail.split('.').next().unwrap_or_default()
}

/// 查找第一个 open ... close 包围的非空片段
///
/// 闭合符取开符之后最近的一个（内容至少 1 个字符）;
/// 某个开符找不到合法闭合时继续尝试下一个开符
pub fn find_delimited<'a>(text: &'a str, open: &str, close: &str) -> Option<&'a str> {
    let mut search_from = 0;

    while let Some(rel) = text[search_from..].find(open) {
        let start = search_from + rel;
        let content_start = start + open.len();

        // 内容至少 1 个字符: 闭合符从 content_start 之后的下一个字符起查找
        if let Some(first_char) = text[content_start..].chars().next() {
            let close_from = content_start + first_char.len_utf8();
            if let Some(close_rel) = text[close_from..].find(close) {
                let content = &text[content_start..close_from + close_rel];
                if !content.contains('\n') {
                    return Some(content);
                }
            }
        }

        // 下一个字符位置继续
        search_from = start + text[start..].chars().next().map_or(1, char::len_utf8);
    }

    None
}

/// 从失败详情中提取缺货 SKU
pub fn extract_unavailable_skus(detail: &str) -> Vec<String> {
    let sentence = first_sentence(detail);

    let group = find_delimited(sentence, "[[", "]]").or_else(|| find_delimited(sentence, "[", "]"));

    match group {
        Some(content) => content
            .split_whitespace()
            .map(|token| token.trim().to_string())
            .collect(),
        None => Vec::new(),
    }
}

// ==========================================
// BracketDetailParser - 括号格式详情解析器
// ==========================================
pub struct BracketDetailParser;

impl FailureDetailParser for BracketDetailParser {
    fn unavailable_skus(&self, detail: &str) -> Vec<String> {
        extract_unavailable_skus(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_bracket_list() {
        assert_eq!(
            extract_unavailable_skus("Item unavailable [[SKU1 SKU2]]. Contact support."),
            vec!["SKU1", "SKU2"]
        );
    }

    #[test]
    fn test_single_bracket_fallback() {
        assert_eq!(extract_unavailable_skus("Short pick [SKU9]."), vec!["SKU9"]);
    }

    #[test]
    fn test_no_brackets_yields_nothing() {
        assert!(extract_unavailable_skus("No bracket info here.").is_empty());
        assert!(extract_unavailable_skus("").is_empty());
    }

    #[test]
    fn test_only_first_sentence_is_searched() {
        assert!(extract_unavailable_skus("Nothing here. Later [SKU1]").is_empty());
        assert_eq!(
            extract_unavailable_skus("First [A]. Second [[B]]"),
            vec!["A"]
        );
    }

    #[test]
    fn test_double_bracket_takes_priority_over_earlier_single() {
        assert_eq!(extract_unavailable_skus("[A] and [[B C]]"), vec!["B", "C"]);
    }

    #[test]
    fn test_only_first_match_is_used() {
        assert_eq!(extract_unavailable_skus("[A] then [B]"), vec!["A"]);
        assert_eq!(extract_unavailable_skus("[[A]] then [[B]]"), vec!["A"]);
    }

    #[test]
    fn test_tokens_split_on_any_whitespace() {
        assert_eq!(
            extract_unavailable_skus("Missing [[  SKU1\tSKU2   SKU3 ]]"),
            vec!["SKU1", "SKU2", "SKU3"]
        );
    }

    #[test]
    fn test_empty_brackets() {
        assert!(extract_unavailable_skus("Nothing []").is_empty());
        // 内容必须非空: "[ ]" 匹配到空白内容, 切分后无 token
        assert!(extract_unavailable_skus("Nothing [ ]").is_empty());
    }

    #[test]
    fn test_unclosed_bracket() {
        assert!(extract_unavailable_skus("Missing [SKU1").is_empty());
        assert_eq!(extract_unavailable_skus("Missing [[SKU1] ok"), vec!["[SKU1"]);
    }

    #[test]
    fn test_period_inside_brackets_cuts_sentence() {
        // '.' 先切句, 括号在第一句内不闭合
        assert!(extract_unavailable_skus("Missing [SKU.1]").is_empty());
    }

    #[test]
    fn test_find_delimited_skips_open_without_close() {
        assert_eq!(find_delimited("[[x [[y]]", "[[", "]]"), Some("x [[y"));
        assert_eq!(find_delimited("no open here", "[", "]"), None);
        assert_eq!(find_delimited("[a\nb] [c]", "[", "]"), Some("c"));
    }

    #[test]
    fn test_non_ascii_text() {
        assert_eq!(extract_unavailable_skus("缺货 [[货号1 货号2]]"), vec!["货号1", "货号2"]);
    }
}
