// ==========================================
// 印刷拼版 UPS 优化 - 需求数据导入器
// ==========================================
// 职责: 整合导入流程, 从文件到 DemandItem 列表
// 流程: 解析 → 表头定位 → 行映射 → 拒绝行汇总
// ==========================================

use crate::domain::demand::DemandItem;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::{FieldMapper, RejectedRow};
use crate::importer::file_parser::{FileParser, UniversalFileParser};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// DemandImport - 导入结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandImport {
    pub batch_id: String,
    pub source_file: String,
    pub items: Vec<DemandItem>,
    pub rejected: Vec<RejectedRow>,
    pub imported_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}

impl DemandImport {
    pub fn total_rows(&self) -> usize {
        self.items.len() + self.rejected.len()
    }
}

// ==========================================
// DemandImporter - 需求数据导入器
// ==========================================
pub struct DemandImporter {
    file_parser: Box<dyn FileParser + Send + Sync>,
    field_mapper: FieldMapper,
}

impl Default for DemandImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DemandImporter {
    /// 按扩展名自动选择 CSV / Excel 解析器
    pub fn new() -> Self {
        Self::with_parser(Box::new(UniversalFileParser))
    }

    pub fn with_parser(file_parser: Box<dyn FileParser + Send + Sync>) -> Self {
        Self {
            file_parser,
            field_mapper: FieldMapper,
        }
    }

    /// 从文件导入需求数据
    ///
    /// # 返回
    /// - Ok(DemandImport): 有效条目 + 被拒绝行（行号与原因）
    /// - Err: 文件不可读 / 格式不支持 / 缺少必需列 / 无数据行
    #[instrument(skip(self, file_path), fields(batch_id))]
    pub fn import_file<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<DemandImport> {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());

        let path = file_path.as_ref();
        info!(file_path = %path.display(), "开始导入需求数据");

        // === 步骤 1: 解析文件 ===
        let table = self.file_parser.parse_to_raw_table(path)?;
        debug!(total_rows = table.rows.len(), "文件解析完成");

        // === 步骤 2: 表头定位 ===
        let layout = self.field_mapper.resolve_columns(&table.headers)?;
        if table.rows.is_empty() {
            return Err(ImportError::NoDataRows);
        }

        // === 步骤 3: 行映射 ===
        let mut items = Vec::with_capacity(table.rows.len());
        let mut rejected = Vec::new();
        for row in &table.rows {
            match self.field_mapper.map_row(&layout, row) {
                Ok(item) => items.push(item),
                Err(rejection) => {
                    warn!(
                        row = rejection.row_number,
                        reason = %rejection.reason,
                        "数据行被拒绝"
                    );
                    rejected.push(rejection);
                }
            }
        }

        let elapsed_ms = start_time.elapsed().as_millis() as u64;
        info!(
            accepted = items.len(),
            rejected = rejected.len(),
            elapsed_ms,
            "需求数据导入完成"
        );

        Ok(DemandImport {
            batch_id,
            source_file: path.display().to_string(),
            items,
            rejected,
            imported_at: Utc::now(),
            elapsed_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_import_csv_with_rejections() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "COLOR,SIZE,QTY,EP_NO").unwrap();
        writeln!(file, "Red,M,10,EP-1").unwrap();
        writeln!(file, "Blue,L,oops,EP-2").unwrap();
        writeln!(file, "Green,S,5,").unwrap();

        let import = DemandImporter::new().import_file(file.path()).unwrap();

        assert_eq!(import.items.len(), 2);
        assert_eq!(import.rejected.len(), 1);
        assert_eq!(import.rejected[0].row_number, 3);
        assert_eq!(import.total_rows(), 3);
        assert_eq!(import.items[0].attachments.get("EP_NO"), Some("EP-1"));
        assert!(import.items[1].attachments.is_empty());
    }

    #[test]
    fn test_import_header_only() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "COLOR,SIZE,QTY").unwrap();

        let result = DemandImporter::new().import_file(file.path());
        assert!(matches!(result, Err(ImportError::NoDataRows)));
    }

    #[test]
    fn test_import_missing_columns() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "COLOR,QTY").unwrap();
        writeln!(file, "Red,10").unwrap();

        let result = DemandImporter::new().import_file(file.path());
        assert!(matches!(result, Err(ImportError::MissingColumns(_))));
    }
}
