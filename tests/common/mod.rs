//! Synthetic workbook builder shared by the integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
</Types>"#;

/// A worksheet to place in the fixture.
pub struct SheetFixture {
    pub name: String,
    pub rel_id: String,
    pub target: String,
    pub xml: String,
}

/// Builder for minimal XLSX packages.
#[derive(Default)]
pub struct XlsxFixture {
    sheets: Vec<SheetFixture>,
    shared_strings: Option<Vec<String>>,
    extra_parts: Vec<(String, String)>,
    skip_parts: Vec<String>,
}

impl XlsxFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sheet whose part lives at `xl/worksheets/sheetN.xml`.
    pub fn sheet(mut self, name: &str, rows: &str) -> Self {
        let n = self.sheets.len() + 1;
        self.sheets.push(SheetFixture {
            name: name.to_string(),
            rel_id: format!("rId{}", n),
            target: format!("worksheets/sheet{}.xml", n),
            xml: worksheet_xml(rows),
        });
        self
    }

    /// Add a sheet with full control over id, target and markup.
    pub fn raw_sheet(mut self, sheet: SheetFixture) -> Self {
        self.sheets.push(sheet);
        self
    }

    pub fn shared_strings(mut self, items: &[&str]) -> Self {
        self.shared_strings = Some(items.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Add a part, replacing a generated one with the same name.
    pub fn part(mut self, name: &str, content: &str) -> Self {
        self.extra_parts.push((name.to_string(), content.to_string()));
        self
    }

    pub fn without(mut self, name: &str) -> Self {
        self.skip_parts.push(name.to_string());
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut parts: Vec<(String, String)> = vec![
            ("[Content_Types].xml".to_string(), CONTENT_TYPES.to_string()),
            ("xl/workbook.xml".to_string(), self.workbook_xml()),
            ("xl/_rels/workbook.xml.rels".to_string(), self.rels_xml()),
        ];
        if let Some(items) = &self.shared_strings {
            parts.push(("xl/sharedStrings.xml".to_string(), shared_strings_xml(items)));
        }
        for sheet in &self.sheets {
            let path = if let Some(abs) = sheet.target.strip_prefix('/') {
                abs.to_string()
            } else {
                format!("xl/{}", sheet.target)
            };
            parts.push((path, sheet.xml.clone()));
        }
        for (name, content) in &self.extra_parts {
            match parts.iter_mut().find(|(n, _)| n == name) {
                Some(existing) => existing.1 = content.clone(),
                None => parts.push((name.clone(), content.clone())),
            }
        }

        let mut buffer = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
            let options = SimpleFileOptions::default();
            for (name, content) in parts {
                if self.skip_parts.contains(&name) {
                    continue;
                }
                zip.start_file(name, options).unwrap();
                zip.write_all(content.as_bytes()).unwrap();
            }
            zip.finish().unwrap();
        }
        buffer
    }

    /// Write the package to a temporary `.xlsx` file.
    pub fn write_temp(&self) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        file.write_all(&self.build()).unwrap();
        file.flush().unwrap();
        file
    }

    fn workbook_xml(&self) -> String {
        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets>"#,
        );
        for (i, sheet) in self.sheets.iter().enumerate() {
            xml.push_str(&format!(
                r#"<sheet name="{}" sheetId="{}" r:id="{}"/>"#,
                sheet.name,
                i + 1,
                sheet.rel_id
            ));
        }
        xml.push_str("</sheets></workbook>");
        xml
    }

    fn rels_xml(&self) -> String {
        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );
        for sheet in &self.sheets {
            xml.push_str(&format!(
                r#"<Relationship Id="{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="{}"/>"#,
                sheet.rel_id, sheet.target
            ));
        }
        xml.push_str(
            r#"<Relationship Id="rIdStyles" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
        );
        xml.push_str("</Relationships>");
        xml
    }
}

pub fn worksheet_xml(rows: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{}</sheetData></worksheet>"#,
        rows
    )
}

fn shared_strings_xml(items: &[String]) -> String {
    let mut xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{0}" uniqueCount="{0}">"#,
        items.len()
    );
    for item in items {
        xml.push_str(&format!("<si><t>{}</t></si>", item));
    }
    xml.push_str("</sst>");
    xml
}
