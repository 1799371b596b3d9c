// ==========================================
// 印刷拼版 UPS 优化 - 导出层
// ==========================================

pub mod csv_report;

pub use csv_report::{export_csv, write_report, ExportError, ExportResult, REPORT_COLUMNS};
