//! Integration tests for sheetstream

use std::io::{Cursor, Read};

use chrono::{NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;
use sheetstream::{
    CellDef, CellValue, ExcelError, MemoryArchive, Style, StylesContext, StylesPart, ValueType,
    WorkbookDocument, WorkbookOptions,
};
use tempfile::NamedTempFile;

fn fixed_options() -> WorkbookOptions {
    WorkbookOptions::default()
        .creator("tests")
        .created(Utc.with_ymd_and_hms(2019, 4, 1, 12, 30, 0).unwrap())
}

fn part(archive: &MemoryArchive, name: &str) -> String {
    let bytes = archive
        .part(name)
        .unwrap_or_else(|| panic!("missing part {}", name));
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn read_zip_part(bytes: Vec<u8>, name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut content = String::new();
    file.read_to_string(&mut content).unwrap();
    content
}

#[test]
fn test_header_and_data_row() {
    let mut workbook = WorkbookDocument::with_sink(MemoryArchive::new(), fixed_options()).unwrap();
    {
        let mut sheet = workbook.sheet("Sheet1").unwrap();
        sheet.write_row(["#", "Date"]).unwrap();
        sheet.add_cell_value(1).unwrap();
        sheet
            .add_cell_value(NaiveDate::from_ymd_opt(2019, 4, 1).unwrap())
            .unwrap();
        sheet.end().unwrap();
    }
    let archive = workbook.end().unwrap();

    let xml = part(&archive, "xl/worksheets/sheet1.xml");
    assert!(xml.contains(concat!(
        r#"<row r="1">"#,
        r#"<c r="A1" t="inlineStr"><is><t>#</t></is></c>"#,
        r#"<c r="B1" t="inlineStr"><is><t>Date</t></is></c>"#,
        r#"</row>"#
    )));
    assert!(xml.contains(concat!(
        r#"<row r="2">"#,
        r#"<c r="A2" t="n"><v>1</v></c>"#,
        r#"<c r="B2" t="d"><v>2019-04-01T00:00:00.000Z</v></c>"#,
        r#"</row>"#
    )));

    let sst = part(&archive, "xl/sharedStrings.xml");
    assert!(sst.contains(r#"count="0" uniqueCount="0""#));

    let core = part(&archive, "docProps/core.xml");
    assert!(core.contains("<dc:creator>tests</dc:creator>"));
    assert!(core.contains(">2019-04-01T12:30:00Z</dcterms:created>"));
}

#[test]
fn test_zip_roundtrip_on_disk() {
    let temp = NamedTempFile::new().unwrap();
    let path = temp.path().to_path_buf();

    {
        let mut workbook = WorkbookDocument::create_with_options(&path, fixed_options()).unwrap();
        for name in ["Orders", "Customers"] {
            let mut sheet = workbook.sheet(name).unwrap();
            sheet.write_row(["id", "name"]).unwrap();
            for i in 0..100 {
                sheet.add_cell_value(i).unwrap();
                sheet.add_cell_value(format!("{} {}", name, i)).unwrap();
                sheet.next_row().unwrap();
            }
            sheet.end().unwrap();
        }
        let mut writer = workbook.end().unwrap();
        std::io::Write::flush(&mut writer).unwrap();
    }

    let bytes = std::fs::read(&path).unwrap();
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes.clone())).unwrap();
    assert_eq!(archive.len(), 10);
    let mut names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/app.xml",
            "docProps/core.xml",
            "xl/_rels/workbook.xml.rels",
            "xl/sharedStrings.xml",
            "xl/styles.xml",
            "xl/workbook.xml",
            "xl/worksheets/sheet1.xml",
            "xl/worksheets/sheet2.xml",
        ]
    );

    let workbook_xml = read_zip_part(bytes.clone(), "xl/workbook.xml");
    assert!(workbook_xml.contains(r#"<sheet name="Orders" sheetId="1" r:id="rSheet1"/>"#));
    assert!(workbook_xml.contains(r#"<sheet name="Customers" sheetId="2" r:id="rSheet2"/>"#));

    let rels = read_zip_part(bytes.clone(), "xl/_rels/workbook.xml.rels");
    assert!(rels.contains(r#"Id="rSheet2""#));
    assert!(rels.contains(r#"Target="worksheets/sheet2.xml""#));

    let types = read_zip_part(bytes.clone(), "[Content_Types].xml");
    assert!(types.contains(r#"PartName="/xl/worksheets/sheet2.xml""#));

    let sheet2 = read_zip_part(bytes, "xl/worksheets/sheet2.xml");
    assert!(sheet2.contains(r#"<c r="B101" t="inlineStr"><is><t>Customers 99</t></is></c>"#));
}

#[test]
fn test_in_memory_writer() {
    let mut workbook = WorkbookDocument::new(Vec::new()).unwrap();
    let mut sheet = workbook.sheet("Only").unwrap();
    sheet.add_cell_value(3.25).unwrap();
    sheet.end().unwrap();
    let bytes = workbook.end().unwrap();

    assert_eq!(&bytes[..4], &[0x50, 0x4b, 0x03, 0x04]);
    let xml = read_zip_part(bytes, "xl/worksheets/sheet1.xml");
    assert!(xml.contains(r#"<c r="A1" t="n"><v>3.25</v></c>"#));
}

#[test]
fn test_escaping() {
    let mut workbook = WorkbookDocument::with_sink(MemoryArchive::new(), fixed_options()).unwrap();
    let mut sheet = workbook.sheet("R&D <\"draft\">").unwrap();
    sheet.add_cell_value("a < b & c > \"d\"").unwrap();
    sheet
        .add_cell(CellDef::formula(ValueType::Boolean, "=A1<>\"x\""))
        .unwrap();
    sheet.end().unwrap();
    let archive = workbook.end().unwrap();

    let xml = part(&archive, "xl/worksheets/sheet1.xml");
    assert!(xml.contains("<t>a &lt; b &amp; c &gt; &quot;d&quot;</t>"));
    assert!(xml.contains(r#"<c r="B1" t="b"><f>=A1&lt;&gt;&quot;x&quot;</f></c>"#));

    let workbook_xml = part(&archive, "xl/workbook.xml");
    assert!(workbook_xml.contains(r#"name="R&amp;D &lt;&quot;draft&quot;&gt;""#));
}

#[test]
fn test_sheet_lifecycle_errors() {
    let mut workbook = WorkbookDocument::with_sink(MemoryArchive::new(), fixed_options()).unwrap();

    let mut sheet = workbook.sheet("First").unwrap();
    sheet.add_cell_value("x").unwrap();
    sheet.end().unwrap();
    assert!(matches!(
        sheet.add_cell_value("late"),
        Err(ExcelError::SheetClosed(_))
    ));
    assert!(matches!(sheet.end(), Err(ExcelError::SheetClosed(_))));

    drop(workbook.sheet("Abandoned").unwrap());
    assert!(matches!(
        workbook.sheet("Third"),
        Err(ExcelError::SheetAlreadyOpen { .. })
    ));
    assert!(matches!(workbook.end(), Err(ExcelError::SheetOpen(_))));
}

#[test]
fn test_converter_registry_customization() {
    let mut workbook = WorkbookDocument::with_sink(MemoryArchive::new(), fixed_options()).unwrap();
    workbook
        .converters_mut()
        .insert(0, sheetstream::value::BooleanConverter);

    let mut sheet = workbook.sheet("Flags").unwrap();
    sheet.write_row([CellValue::Bool(true), CellValue::Bool(false)]).unwrap();
    sheet.write_row([CellValue::Empty, CellValue::Float(f64::NAN)]).unwrap();
    sheet.end().unwrap();
    let archive = workbook.end().unwrap();

    let xml = part(&archive, "xl/worksheets/sheet1.xml");
    assert!(xml.contains(r#"<c r="A1" t="b"><v>1</v></c><c r="B1" t="b"><v>0</v></c>"#));
    assert!(xml.contains(r#"<c r="A2"></c><c r="B2" t="inlineStr"><is><t>NaN</t></is></c>"#));
}

/// Writes one `cellXfs` entry per style signature, bold when any of its
/// styles is bold
struct SignatureStyles;

impl StylesPart for SignatureStyles {
    fn render(&self, ctx: &StylesContext<'_>) -> String {
        let mut xfs = String::new();
        let mut count = 0;
        for (_, names) in ctx.signatures() {
            let bold = names.iter().any(|name| {
                ctx.style(name)
                    .and_then(|s| s.font.as_ref())
                    .and_then(|f| f.bold)
                    .unwrap_or(false)
            });
            xfs.push_str(&format!(
                r#"<xf numFmtId="0" fontId="{}" fillId="0" borderId="0" xfId="0"/>"#,
                if bold { 1 } else { 0 }
            ));
            count += 1;
        }
        format!(
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
                r#"<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
                r#"<fonts count="2"><font/><font><b/></font></fonts>"#,
                r#"<cellXfs count="{}">{}</cellXfs></styleSheet>"#
            ),
            count, xfs
        )
    }

    fn cell_style_refs(&self) -> bool {
        true
    }
}

#[test]
fn test_custom_styles_part() {
    let mut workbook = WorkbookDocument::with_sink(MemoryArchive::new(), fixed_options()).unwrap();
    workbook.set_styles_part(SignatureStyles);
    workbook.add_style("header", Style::new().bold()).unwrap();

    let mut sheet = workbook.sheet("Styled").unwrap();
    sheet.add_style_rule("header", |row, _| row == 0).unwrap();
    sheet.write_row(["a", "b"]).unwrap();
    sheet.write_row([1, 2]).unwrap();
    sheet.end().unwrap();
    let archive = workbook.end().unwrap();

    let xml = part(&archive, "xl/worksheets/sheet1.xml");
    assert!(xml.contains(r#"<c r="A1" s="0" t="inlineStr">"#));
    assert!(xml.contains(r#"<c r="B2" s="1" t="n"><v>2</v></c>"#));

    let styles = part(&archive, "xl/styles.xml");
    assert!(styles.contains(concat!(
        r#"<cellXfs count="2">"#,
        r#"<xf numFmtId="0" fontId="1" fillId="0" borderId="0" xfId="0"/>"#,
        r#"<xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>"#,
        r#"</cellXfs>"#
    )));
}

#[test]
fn test_rules_persist_across_sheets() {
    let mut workbook = WorkbookDocument::with_sink(MemoryArchive::new(), fixed_options()).unwrap();
    workbook.add_style("first-col", Style::new().italic()).unwrap();

    let mut sheet = workbook.sheet("One").unwrap();
    sheet.add_style_rule("first-col", |_, col| col == 0).unwrap();
    sheet.write_row(["x"]).unwrap();
    sheet.end().unwrap();

    let mut sheet = workbook.sheet("Two").unwrap();
    sheet.write_row(["y"]).unwrap();
    assert_eq!(sheet.rows()[0].cells[0].style_index, 0);
    sheet.reset_style_rules().unwrap();
    sheet.write_row(["z"]).unwrap();
    assert_eq!(sheet.rows()[1].cells[0].style_index, 1);
    sheet.end().unwrap();

    assert_eq!(workbook.style_engine().signatures().len(), 2);
}

#[test]
fn test_locale_formats() {
    let options = fixed_options().locale("ja_JP");
    let mut workbook = WorkbookDocument::with_sink(MemoryArchive::new(), options).unwrap();
    workbook
        .add_style("wareki", Style::new().format_code("[$-411]ge.m.d"))
        .unwrap();
    workbook
        .add_style("precise", Style::new().format_code("0.0000"))
        .unwrap();

    assert_eq!(workbook.number_format_id("[$-411]ge.m.d"), 27);
    assert_eq!(workbook.number_format_id("0.0000"), 59);
    assert_eq!(workbook.number_format_id("0.00000"), 60);
}

#[test]
fn test_offset_rows() {
    let mut workbook = WorkbookDocument::with_sink(MemoryArchive::new(), fixed_options()).unwrap();
    let mut sheet = workbook.sheet("Offsets").unwrap();
    sheet.skip_rows(1).unwrap();
    sheet.write_row_with_offset(26, ["AA"]).unwrap();
    sheet.end().unwrap();
    let archive = workbook.end().unwrap();

    let xml = part(&archive, "xl/worksheets/sheet1.xml");
    assert!(xml.contains(r#"<c r="Z2"></c><c r="AA2" t="inlineStr"><is><t>AA</t></is></c>"#));
    assert!(xml.contains(r#"<row r="3"></row>"#));
}
