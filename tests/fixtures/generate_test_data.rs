// ==========================================
// 测试数据生成器
// ==========================================
// 用途: 生成需求 CSV 样例文件
// 输出: tests/fixtures/datasets/*.csv
// ==========================================

use csv::Writer;
use std::error::Error;
use std::fs::{self, File};

const OUTPUT_DIR: &str = "tests/fixtures/datasets";

// 18 条服装印花需求 (3 色 × 6 码), 对应 20 出 3 版场景
const GARMENT_ORDER: &[(&str, &str, u64)] = &[
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
];

fn main() -> Result<(), Box<dyn Error>> {
    println!("开始生成测试数据集...");
    fs::create_dir_all(OUTPUT_DIR)?;

    // 1. 基础样例 (3 条)
    generate_basic_sample()?;

    // 2. 服装订单 (18 条)
    generate_garment_order()?;

    // 3. 带附加字段
    generate_with_attachments()?;

    // 4. 含非法数量的数据
    generate_invalid_quantities()?;

    println!("✓ 所有测试数据集生成完成！");
    Ok(())
}

fn generate_basic_sample() -> Result<(), Box<dyn Error>> {
    let path = format!("{}/01_basic_sample.csv", OUTPUT_DIR);
    let mut wtr = Writer::from_writer(File::create(&path)?);

    wtr.write_record(["COLOR", "SIZE", "QTY"])?;
    wtr.write_record(["Red", "M", "10"])?;
    wtr.write_record(["Blue", "L", "15"])?;
    wtr.write_record(["Green", "S", "5"])?;
    wtr.flush()?;

    println!("✓ 生成: {} (3条)", path);
    Ok(())
}

fn generate_garment_order() -> Result<(), Box<dyn Error>> {
    let path = format!("{}/02_garment_order.csv", OUTPUT_DIR);
    let mut wtr = Writer::from_writer(File::create(&path)?);

    wtr.write_record(["COLOR", "SIZE", "QTY"])?;
    for (color, size, qty) in GARMENT_ORDER {
        wtr.write_record([*color, *size, qty.to_string().as_str()])?;
    }
    wtr.flush()?;

    println!("✓ 生成: {} ({}条)", path, GARMENT_ORDER.len());
    Ok(())
}

fn generate_with_attachments() -> Result<(), Box<dyn Error>> {
    let path = format!("{}/03_with_attachments.csv", OUTPUT_DIR);
    let mut wtr = Writer::from_writer(File::create(&path)?);

    wtr.write_record(["ITEM_CODE", "COLOR", "SIZE", "QTY", "ITEM_DESCRIPTION", "PRICE", "EP_NO"])?;
    for (i, (color, size, qty)) in GARMENT_ORDER.iter().take(6).enumerate() {
        wtr.write_record([
            format!("IC-{:03}", i + 1),
            color.to_string(),
            size.to_string(),
            qty.to_string(),
            format!("{} {} tee", color, size),
            format!("{:.2}", 4.5 + i as f64 * 0.25),
            format!("EP{}", 7000 + i),
        ])?;
    }
    wtr.flush()?;

    println!("✓ 生成: {} (6条)", path);
    Ok(())
}

fn generate_invalid_quantities() -> Result<(), Box<dyn Error>> {
    let path = format!("{}/04_invalid_quantities.csv", OUTPUT_DIR);
    let mut wtr = Writer::from_writer(File::create(&path)?);

    wtr.write_record(["color", "size", "qty"])?;
    wtr.write_record(["Red", "M", "10"])?;
    wtr.write_record(["Blue", "L", "abc"])?; // 无法解析
    wtr.write_record(["Green", "S", "0"])?; // 非正数
    wtr.write_record(["Black", "XL", "-4"])?; // 负数
    wtr.write_record(["White", "XS", "12.0"])?; // 整数型浮点, 接受
    wtr.flush()?;

    println!("✓ 生成: {} (5条, 3条非法)", path);
    Ok(())
}
