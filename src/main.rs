// ==========================================
// 履约失败分析 - 命令行入口
// ==========================================
// 用法:
//   order-failure-analyzer <文件> [视图] [--out 目录] [--config 配置] [--lang 语言] [--json]
// 视图: all-available | failed | sku-us | sku-non-us | all（默认）
// ==========================================

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use order_failure_analyzer::api::{AnalysisApi, AnalysisSession};
use order_failure_analyzer::config::{AnalyzerConfig, CONFIG_PATH_ENV};
use order_failure_analyzer::domain::OutputView;
use order_failure_analyzer::i18n::{self, t, t_with_args};
use order_failure_analyzer::logging;
use std::path::PathBuf;

/// 命令行视图参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ViewArg {
    /// 全部 SKU 可用的订单
    AllAvailable,
    /// 存在缺货 SKU 的订单
    Failed,
    /// 本土 SKU 缺货汇总
    SkuUs,
    /// 非本土 SKU 缺货汇总
    SkuNonUs,
    /// 全部四个视图
    All,
}

impl ViewArg {
    fn views(self) -> &'static [OutputView] {
        match self {
            ViewArg::AllAvailable => &[OutputView::AllAvailable],
            ViewArg::Failed => &[OutputView::FailedOrders],
            ViewArg::SkuUs => &[OutputView::SkuFailsUs],
            ViewArg::SkuNonUs => &[OutputView::SkuFailsNonUs],
            ViewArg::All => &OutputView::ALL,
        }
    }
}

/// 履约失败导出分析: 按真实缺货重新分类订单
#[derive(Parser, Debug)]
#[command(name = "order-failure-analyzer", version)]
#[command(about = "履约失败导出分析 - 缺货订单重分类", long_about = None)]
struct CliArgs {
    /// 履约失败导出文件（.csv / .xlsx / .xls）
    file: PathBuf,

    /// 输出视图（可多个, 默认 all）
    #[arg(value_enum)]
    views: Vec<ViewArg>,

    /// 导出目录（覆盖配置中的 output_dir）
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,

    /// 配置文件路径
    #[arg(long, value_name = "PATH", env = CONFIG_PATH_ENV)]
    config: Option<PathBuf>,

    /// 界面语言（zh-CN / en）
    #[arg(long, value_name = "LOCALE")]
    lang: Option<String>,

    /// 以 JSON 输出分析报告（日志同样为 JSON）
    #[arg(long)]
    json: bool,
}

impl CliArgs {
    /// 去重后的视图列表（保持首次出现顺序, 未指定时为全部视图）
    fn selected_views(&self) -> Vec<OutputView> {
        if self.views.is_empty() {
            return OutputView::ALL.to_vec();
        }
        let mut selected = Vec::new();
        for view in self.views.iter().flat_map(|arg| arg.views()) {
            if !selected.contains(view) {
                selected.push(*view);
            }
        }
        selected
    }
}

fn print_summary(session: &AnalysisSession) {
    let report = session.report();
    println!("== {} ==", t("summary.title"));
    println!("{}", t_with_args("summary.run_id", &[("run_id", report.run_id.as_str())]));
    println!(
        "{}",
        t_with_args(
            "summary.rows",
            &[
                ("data_rows", report.stats.data_rows.to_string().as_str()),
                ("skipped", report.stats.skipped_lines.to_string().as_str()),
                ("matched", report.stats.matched_rows.to_string().as_str()),
            ],
        )
    );
    println!(
        "{}",
        t_with_args(
            "summary.orders",
            &[
                ("total", report.summary.total_orders.to_string().as_str()),
                ("available", report.summary.all_available_orders.to_string().as_str()),
                ("failed", report.summary.failed_orders.to_string().as_str()),
            ],
        )
    );
    println!(
        "{}",
        t_with_args(
            "summary.units",
            &[
                ("lines", report.summary.failed_lines.to_string().as_str()),
                ("units", report.summary.failed_units.to_string().as_str()),
            ],
        )
    );
}

fn run(cli: CliArgs) -> Result<()> {
    let views = cli.selected_views();
    let mut config = AnalyzerConfig::load(cli.config.as_deref())?;
    if let Some(lang) = cli.lang {
        config.locale = lang;
    }
    if let Some(out) = cli.out {
        config.output_dir = out;
    }
    if !i18n::set_locale(&config.locale) {
        tracing::warn!(locale = %config.locale, "不支持的语言, 使用默认语言");
    }

    let output_dir = config.output_dir.clone();
    let preview_rows = config.preview_rows;
    let api = AnalysisApi::new(config);
    let session = api
        .analyze_file(&cli.file)
        .with_context(|| format!("分析失败: {}", cli.file.display()))?;

    if cli.json {
        println!("{}", session.report_json()?);
    } else {
        print_summary(&session);
    }

    for view in views {
        let table = session.render(view);
        if !cli.json {
            println!();
            println!("== {} ==", i18n::view_title(view));
            if table.is_empty() {
                println!("{}", t("cli.empty"));
            } else {
                println!("{}", table.preview(preview_rows));
                if table.len() > preview_rows {
                    println!(
                        "{}",
                        t_with_args(
                            "cli.rows_shown",
                            &[
                                ("shown", preview_rows.to_string().as_str()),
                                ("total", table.len().to_string().as_str()),
                            ],
                        )
                    );
                }
            }
        }

        let path = session.export(view, &output_dir)?;
        if !cli.json {
            println!(
                "{}",
                t_with_args("export.written", &[("path", path.display().to_string().as_str())])
            );
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = CliArgs::parse();

    // 初始化日志系统（--json 时日志同样输出为 JSON）
    if cli.json {
        logging::init_json();
    } else {
        logging::init();
    }

    tracing::info!("{} v{}", order_failure_analyzer::APP_NAME, order_failure_analyzer::VERSION);
    run(cli)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_to_all_views() {
        let cli = CliArgs::try_parse_from(["order-failure-analyzer", "export.csv"]).unwrap();
        assert_eq!(cli.file, PathBuf::from("export.csv"));
        assert_eq!(cli.selected_views(), OutputView::ALL.to_vec());
        assert!(!cli.json);
    }

    #[test]
    fn test_cli_views_and_flags() {
        let cli = CliArgs::try_parse_from([
            "order-failure-analyzer",
            "export.csv",
            "failed",
            "sku-us",
            "failed",
            "--out",
            "/tmp/out",
            "--lang",
            "en",
            "--json",
        ])
        .unwrap();
        assert_eq!(
            cli.selected_views(),
            vec![OutputView::FailedOrders, OutputView::SkuFailsUs]
        );
        assert_eq!(cli.out, Some(PathBuf::from("/tmp/out")));
        assert_eq!(cli.lang.as_deref(), Some("en"));
        assert!(cli.json);
    }

    #[test]
    fn test_cli_all_merges_with_explicit_views() {
        let cli =
            CliArgs::try_parse_from(["order-failure-analyzer", "export.xlsx", "sku-non-us", "all"])
                .unwrap();
        assert_eq!(
            cli.selected_views(),
            vec![
                OutputView::SkuFailsNonUs,
                OutputView::AllAvailable,
                OutputView::FailedOrders,
                OutputView::SkuFailsUs,
            ]
        );
    }

    #[test]
    fn test_cli_rejects_bad_input() {
        assert!(CliArgs::try_parse_from(["order-failure-analyzer"]).is_err());
        assert!(CliArgs::try_parse_from(["order-failure-analyzer", "export.csv", "bogus"]).is_err());
        assert!(CliArgs::try_parse_from(["order-failure-analyzer", "export.csv", "--out"]).is_err());
        assert!(
            CliArgs::try_parse_from(["order-failure-analyzer", "export.csv", "--verbose"]).is_err()
        );
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }
}
