// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use std::io::Write;
use tempfile::NamedTempFile;
use ups_optimizer::domain::{Attachments, DemandItem, OptimizationRequest};

// ==========================================
// DemandItem 构建器
// ==========================================

pub struct DemandItemBuilder {
    color: String,
    size: String,
    quantity: u64,
    attachments: Attachments,
}

impl DemandItemBuilder {
    pub fn new(color: &str, size: &str) -> Self {
        Self {
            color: color.to_string(),
            size: size.to_string(),
            quantity: 1,
            attachments: Attachments::new(),
        }
    }

    pub fn quantity(mut self, quantity: u64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn attachment(mut self, key: &str, value: &str) -> Self {
        self.attachments.push(key, value);
        self
    }

    pub fn build(self) -> DemandItem {
        DemandItem::new(self.color, self.size, self.quantity).with_attachments(self.attachments)
    }
}

// ==========================================
// 样例数据
// ==========================================

/// 红/蓝/绿 三条基础样例
pub fn basic_sample() -> Vec<DemandItem> {
    vec![
        DemandItemBuilder::new("Red", "M").quantity(10).build(),
        DemandItemBuilder::new("Blue", "L").quantity(15).build(),
        DemandItemBuilder::new("Green", "S").quantity(5).build(),
    ]
}

/// 18 条服装订单 (3 色 × 6 码)
pub fn garment_order() -> Vec<DemandItem> {
    [
        ("812 GREY VIGO", "XXS", 60),
        ("800 BLACK", "XXS", 72),
        ("676 ROSA EMPO", "XXS", 96),
        ("812 GREY VIGO", "XL", 121),
        ("800 BLACK", "XL", 145),
        ("676 ROSA EMPO", "XL", 193),
        ("812 GREY VIGO", "XS", 337),
        ("812 GREY VIGO", "L", 366),
        ("800 BLACK", "XS", 407),
        ("800 BLACK", "L", 439),
        ("676 ROSA EMPO", "XS", 540),
        ("676 ROSA EMPO", "L", 586),
        ("812 GREY VIGO", "M", 833),
        ("812 GREY VIGO", "S", 883),
        ("800 BLACK", "M", 999),
        ("800 BLACK", "S", 1059),
        ("676 ROSA EMPO", "M", 1333),
        ("676 ROSA EMPO", "S", 1412),
    ]
    .iter()
    .map(|(c, s, q)| DemandItemBuilder::new(c, s).quantity(*q).build())
    .collect()
}

/// n 条数量不同的需求
pub fn numbered_items(n: usize) -> Vec<DemandItem> {
    (0..n)
        .map(|i| {
            DemandItemBuilder::new(&format!("C{}", i), "M")
                .quantity(10 + (i as u64 * 7) % 23)
                .build()
        })
        .collect()
}

pub fn request(items: Vec<DemandItem>, slots_per_plate: u32, plate_count: u32) -> OptimizationRequest {
    OptimizationRequest::new(items, slots_per_plate, plate_count)
}

// ==========================================
// 文件辅助
// ==========================================

/// 写入临时 CSV（文件需保持存活）
pub fn write_temp_csv(lines: &[&str]) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("create temp csv");
    for line in lines {
        writeln!(file, "{}", line).expect("write temp csv");
    }
    file
}
