// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库, 支持中文（默认）和英文
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

use crate::domain::types::OutputView;

/// 支持的语言
pub const SUPPORTED_LOCALES: [&str; 2] = ["zh-CN", "en"];

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言; 不支持的语言返回 false 且保持当前语言
pub fn set_locale(locale: &str) -> bool {
    if SUPPORTED_LOCALES.contains(&locale) {
        rust_i18n::set_locale(locale);
        true
    } else {
        false
    }
}

/// 翻译消息（无参数）
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数, 占位符格式 %{name}）
///
/// # 示例
/// ```no_run
/// use order_failure_analyzer::i18n::t_with_args;
/// let msg = t_with_args("export.written", &[("path", "/tmp/failed_orders.csv")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = t(key);
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

/// 视图标题
pub fn view_title(view: OutputView) -> String {
    t(view.title_key())
}
