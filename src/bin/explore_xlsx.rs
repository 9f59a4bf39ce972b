//! Utility to explore XLSX structure and stream a sheet for development
//!
//! Usage: explore_xlsx <file.xlsx> [sheet] [selectors]
//!
//! Selectors are comma separated (`A,C:F`); `*` selects every cell.
use unsheet::{ColumnSelectors, Workbook};

fn main() {
    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .unwrap_or("test-files/file_example_XLSX_5000.xlsx".to_string());
    let workbook = Workbook::open(&path).expect("Failed to open workbook");

    println!("=== Relationships ===");
    let mut rels: Vec<_> = workbook.relationships().iter().collect();
    rels.sort();
    for (id, target) in rels {
        println!("  {} -> {}", id, target);
    }

    println!("\n=== Sheets ===");
    for name in workbook.sheet_names() {
        match workbook.worksheet_part(name) {
            Ok(part) => println!("  {} ({})", name, part),
            Err(e) => println!("  {} (unresolved: {})", name, e),
        }
    }

    println!("\n=== Shared strings: {} ===", workbook.shared_string_count());

    let sheet_name = match args.next() {
        Some(name) => name,
        None => match workbook.sheet_names().first() {
            Some(name) => name.to_string(),
            None => return,
        },
    };
    let selectors: ColumnSelectors = args
        .next()
        .unwrap_or("*".to_string())
        .parse()
        .expect("Invalid column selectors");

    println!("\n=== {} (first 50 events) ===", sheet_name);
    let mut sheet = workbook
        .worksheet(&sheet_name)
        .expect("Failed to open worksheet");
    for event in sheet
        .cells(&selectors)
        .expect("Failed to stream worksheet")
        .take(50)
    {
        match event {
            Ok(event) => println!("{}", serde_json::to_string(&event).unwrap_or_default()),
            Err(e) => {
                println!("ERROR: {}", e);
                break;
            }
        }
    }
}
