// ==========================================
// 印刷拼版 UPS 优化 - 导入层
// ==========================================
// 职责: 外部需求文件导入, 生成 DemandItem 列表
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod demand_importer;
pub mod error;
pub mod field_mapper;
pub mod file_parser;

// 重导出核心类型
pub use demand_importer::{DemandImport, DemandImporter};
pub use error::{ImportError, ImportResult};
pub use field_mapper::{FieldMapper, RejectedRow};
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawRow, RawTable, UniversalFileParser};
