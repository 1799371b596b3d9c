// ==========================================
// 印刷拼版 UPS 优化 - 命令行入口
// ==========================================
// 用法: ups-optimizer <需求文件> [每版出数] [印版数] [导出.csv]
// 输出: 优化结果 (JSON) 写入 stdout, 日志写入 stderr
// ==========================================

use anyhow::{bail, Context};
use ups_optimizer::config::ConfigManager;
use ups_optimizer::domain::OptimizationRequest;
use ups_optimizer::export::export_csv;
use ups_optimizer::importer::DemandImporter;
use ups_optimizer::{logging, OptimizeApi};

const USAGE: &str = "用法: ups-optimizer <需求文件.csv|.xlsx> [每版出数] [印版数] [导出.csv]";

fn parse_arg<T: std::str::FromStr>(value: Option<&String>, name: &str, default: T) -> anyhow::Result<T> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| anyhow::anyhow!("{} 无效: {}", name, raw)),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(input) = args.first() else {
        bail!("{}", USAGE);
    };

    tracing::info!("==================================================");
    tracing::info!("{} v{}", ups_optimizer::APP_NAME, ups_optimizer::VERSION);
    tracing::info!("==================================================");

    // 加载配置
    let manager = ConfigManager::load().context("加载配置失败")?;
    if let Some(source) = manager.source() {
        tracing::info!(config = %source.display(), "使用配置文件");
    }
    let config = manager.into_config();

    let slots_per_plate = parse_arg(args.get(1), "每版出数", config.defaults.slots_per_plate)?;
    let plate_count = parse_arg(args.get(2), "印版数", config.defaults.plate_count)?;
    let output = args.get(3);

    // 导入需求
    let import = DemandImporter::new()
        .import_file(input)
        .with_context(|| format!("导入需求文件失败: {}", input))?;
    if !import.rejected.is_empty() {
        tracing::warn!(rejected = import.rejected.len(), "部分数据行被拒绝");
    }

    // 优化
    let api = OptimizeApi::from_config(config)?;
    if api.config().delegation.enabled {
        if api.delegation_available().await {
            tracing::info!("外部求解服务可用");
        } else {
            tracing::warn!(
                base_url = %api.config().delegation.base_url,
                "外部求解服务不可用, 大规模请求将按回退策略处理"
            );
        }
    }
    let request = OptimizationRequest::new(import.items, slots_per_plate, plate_count);
    let outcome = api.optimize(request).await?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);

    // 可选导出
    if let Some(path) = output {
        export_csv(&outcome.response, path)
            .with_context(|| format!("导出结果失败: {}", path))?;
    }

    Ok(())
}
