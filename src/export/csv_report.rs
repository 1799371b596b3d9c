// ==========================================
// 印刷拼版 UPS 优化 - CSV 结果导出
// ==========================================
// 列: COLOR,SIZE,QTY,PLATE,OPTIMAL_UPS,SHEETS_NEEDED,QTY_PRODUCED,EXCESS
//     + 附加字段列（按首次出现顺序合并）
// ==========================================

use crate::domain::result::{OptimizationResponse, OptimizationResult};
use csv::Writer;
use std::io::Write;
use std::path::Path;
use thiserror::Error;
use tracing::info;

pub const REPORT_COLUMNS: [&str; 8] = [
    "COLOR",
    "SIZE",
    "QTY",
    "PLATE",
    "OPTIMAL_UPS",
    "SHEETS_NEEDED",
    "QTY_PRODUCED",
    "EXCESS",
];

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("导出文件写入失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV 写入失败: {0}")]
    Csv(#[from] csv::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;

/// 附加字段列（排除与固定列同名的键）
fn attachment_columns(results: &[OptimizationResult]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for attachment in results.iter().flat_map(|r| r.attachments.iter()) {
        if REPORT_COLUMNS.contains(&attachment.key.as_str()) || columns.contains(&attachment.key) {
            continue;
        }
        columns.push(attachment.key.clone());
    }
    columns
}

/// 写入任意 Writer
pub fn write_report<W: Write>(response: &OptimizationResponse, writer: W) -> ExportResult<()> {
    let extra = attachment_columns(&response.results);
    let mut wtr = Writer::from_writer(writer);

    let mut header: Vec<&str> = REPORT_COLUMNS.to_vec();
    header.extend(extra.iter().map(String::as_str));
    wtr.write_record(&header)?;

    for r in &response.results {
        let mut record = vec![
            r.color.clone(),
            r.size.clone(),
            r.quantity.to_string(),
            r.plate_label.to_string(),
            r.allocated_slots.to_string(),
            r.runs_needed.to_string(),
            r.produced.to_string(),
            r.excess.to_string(),
        ];
        record.extend(
            extra
                .iter()
                .map(|key| r.attachments.get(key).unwrap_or_default().to_string()),
        );
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// 导出到文件
pub fn export_csv<P: AsRef<Path>>(response: &OptimizationResponse, path: P) -> ExportResult<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    write_report(response, file)?;
    info!(
        path = %path.display(),
        rows = response.results.len(),
        "优化结果已导出"
    );
    Ok(())
}
