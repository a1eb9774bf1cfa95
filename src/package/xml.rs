//! Renderers for every part of the package
//!
//! All functions are pure: the same input always produces the same markup.
//! Parts are written compactly, without whitespace between elements.

use super::xml_writer::XmlWriter;
use crate::cell_ref::cell_ref;
use crate::types::{Cell, Row, ValueType};
use chrono::{DateTime, SecondsFormat, Utc};

const NS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const NS_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PACKAGE_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_WORKSHEET: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";
const REL_SHARED_STRINGS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings";
const REL_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
const CT_WORKSHEET: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml";

/// Part name of the `index`-th sheet (1-based)
pub fn sheet_part_name(index: usize) -> String {
    format!("xl/worksheets/sheet{}.xml", index)
}

/// Relationship id of the `index`-th sheet (1-based)
fn sheet_rel_id(index: usize) -> String {
    format!("rSheet{}", index)
}

/// `_rels/.rels`
pub fn rels() -> String {
    let mut w = XmlWriter::document();
    w.start_element("Relationships");
    w.attribute("xmlns", NS_PACKAGE_REL);
    w.close_start_tag();
    for (id, rel_type, target) in [
        (
            "rId1",
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument",
            "xl/workbook.xml",
        ),
        (
            "rId2",
            "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties",
            "docProps/core.xml",
        ),
        (
            "rId3",
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties",
            "docProps/app.xml",
        ),
    ] {
        relationship(&mut w, id, rel_type, target);
    }
    w.end_element("Relationships");
    w.finish()
}

fn relationship(w: &mut XmlWriter, id: &str, rel_type: &str, target: &str) {
    w.start_element("Relationship");
    w.attribute("Id", id);
    w.attribute("Type", rel_type);
    w.attribute("Target", target);
    w.close_empty();
}

/// `xl/_rels/workbook.xml.rels`
pub fn workbook_rels(sheet_names: &[String]) -> String {
    let mut w = XmlWriter::document();
    w.start_element("Relationships");
    w.attribute("xmlns", NS_PACKAGE_REL);
    w.close_start_tag();
    for index in 1..=sheet_names.len() {
        let target = format!("worksheets/sheet{}.xml", index);
        relationship(&mut w, &sheet_rel_id(index), REL_WORKSHEET, &target);
    }
    relationship(&mut w, "rId2", REL_SHARED_STRINGS, "sharedStrings.xml");
    relationship(&mut w, "rId3", REL_STYLES, "styles.xml");
    w.end_element("Relationships");
    w.finish()
}

/// `[Content_Types].xml`
pub fn content_types(sheet_names: &[String]) -> String {
    let mut w = XmlWriter::document();
    w.start_element("Types");
    w.attribute(
        "xmlns",
        "http://schemas.openxmlformats.org/package/2006/content-types",
    );
    w.close_start_tag();

    for (extension, content_type) in [
        ("rels", "application/vnd.openxmlformats-package.relationships+xml"),
        ("xml", "application/xml"),
    ] {
        w.start_element("Default");
        w.attribute("Extension", extension);
        w.attribute("ContentType", content_type);
        w.close_empty();
    }

    let overrides = [
        (
            "/xl/workbook.xml",
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml",
        ),
        (
            "/xl/styles.xml",
            "application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml",
        ),
        (
            "/xl/sharedStrings.xml",
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml",
        ),
        (
            "/docProps/core.xml",
            "application/vnd.openxmlformats-package.core-properties+xml",
        ),
        (
            "/docProps/app.xml",
            "application/vnd.openxmlformats-officedocument.extended-properties+xml",
        ),
    ];
    for (part, content_type) in overrides {
        content_type_override(&mut w, part, content_type);
    }
    for index in 1..=sheet_names.len() {
        let part = format!("/{}", sheet_part_name(index));
        content_type_override(&mut w, &part, CT_WORKSHEET);
    }

    w.end_element("Types");
    w.finish()
}

fn content_type_override(w: &mut XmlWriter, part: &str, content_type: &str) {
    w.start_element("Override");
    w.attribute("PartName", part);
    w.attribute("ContentType", content_type);
    w.close_empty();
}

/// `xl/workbook.xml`
pub fn workbook(sheet_names: &[String]) -> String {
    let mut w = XmlWriter::document();
    w.start_element("workbook");
    w.attribute("xmlns", NS_MAIN);
    w.attribute("xmlns:r", NS_REL);
    w.close_start_tag();
    w.write_str(
        r#"<fileVersion appName="xl" lastEdited="5" lowestEdited="5" rupBuild="9303"/><workbookPr defaultThemeVersion="124226"/><bookViews><workbookView xWindow="480" yWindow="60" windowWidth="18195" windowHeight="8505"/></bookViews>"#,
    );

    w.start_element("sheets");
    w.close_start_tag();
    for (i, name) in sheet_names.iter().enumerate() {
        let index = i + 1;
        w.start_element("sheet");
        w.attribute("name", name);
        w.attribute_int("sheetId", index as u64);
        w.attribute("r:id", &sheet_rel_id(index));
        w.close_empty();
    }
    w.end_element("sheets");

    w.write_str(r#"<calcPr calcId="145621"/>"#);
    w.end_element("workbook");
    w.finish()
}

/// `xl/worksheets/sheetN.xml`
///
/// With `style_refs` every cell also carries its style index as `s`.
pub fn sheet(rows: &[Row], style_refs: bool) -> String {
    let mut w = XmlWriter::document();
    w.start_element("worksheet");
    w.attribute("xmlns", NS_MAIN);
    w.attribute("xmlns:r", NS_REL);
    w.attribute(
        "xmlns:mc",
        "http://schemas.openxmlformats.org/markup-compatibility/2006",
    );
    w.attribute("mc:Ignorable", "x14ac");
    w.attribute(
        "xmlns:x14ac",
        "http://schemas.microsoft.com/office/spreadsheetml/2009/9/ac",
    );
    w.close_start_tag();
    w.write_str(r#"<sheetViews><sheetView workbookViewId="0"/></sheetViews>"#);
    w.write_str(r#"<sheetFormatPr defaultRowHeight="15" x14ac:dyDescent="0.25"/>"#);

    w.start_element("sheetData");
    w.close_start_tag();
    for row in rows {
        write_row(&mut w, row, style_refs);
    }
    w.end_element("sheetData");

    w.end_element("worksheet");
    w.finish()
}

fn write_row(w: &mut XmlWriter, row: &Row, style_refs: bool) {
    w.start_element("row");
    w.attribute_int("r", row.index as u64 + 1);
    w.close_start_tag();
    for (col, cell) in row.cells.iter().enumerate() {
        write_cell(w, row.index, col as u32, cell, style_refs);
    }
    w.end_element("row");
}

/// A single `<c>` element
pub fn cell(row: u32, col: u32, cell: &Cell, style_refs: bool) -> String {
    let mut w = XmlWriter::new();
    write_cell(&mut w, row, col, cell, style_refs);
    w.finish()
}

fn write_cell(w: &mut XmlWriter, row: u32, col: u32, cell: &Cell, style_refs: bool) {
    w.start_element("c");
    w.attribute("r", &cell_ref(row, col));
    if style_refs {
        w.attribute_int("s", cell.style_index as u64);
    }

    if let Some(formula) = &cell.formula {
        w.attribute("t", cell.value_type.formula_type_code());
        w.close_start_tag();
        w.text_element("f", formula);
        w.end_element("c");
        return;
    }

    match (cell.value_type, cell.value.as_deref()) {
        (ValueType::String, Some(text)) => {
            w.attribute("t", "inlineStr");
            w.close_start_tag();
            w.write_str("<is>");
            w.text_element("t", text);
            w.write_str("</is>");
        }
        (ValueType::Number, Some(text)) => value_cell(w, "n", text),
        (ValueType::Date, Some(text)) => value_cell(w, "d", text),
        (ValueType::Boolean, Some(text)) => value_cell(w, "b", text),
        _ => w.close_start_tag(),
    }
    w.end_element("c");
}

fn value_cell(w: &mut XmlWriter, type_code: &str, text: &str) {
    w.attribute("t", type_code);
    w.close_start_tag();
    w.text_element("v", text);
}

/// `docProps/app.xml`
pub fn app(application: &str, app_version: &str) -> String {
    let mut w = XmlWriter::document();
    w.start_element("Properties");
    w.attribute(
        "xmlns",
        "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties",
    );
    w.attribute(
        "xmlns:vt",
        "http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes",
    );
    w.close_start_tag();
    w.text_element("Application", application);
    w.write_str("<DocSecurity>0</DocSecurity><ScaleCrop>false</ScaleCrop><Company></Company>");
    w.write_str("<LinksUpToDate>false</LinksUpToDate><SharedDoc>false</SharedDoc>");
    w.write_str("<HyperlinksChanged>false</HyperlinksChanged>");
    w.text_element("AppVersion", app_version);
    w.end_element("Properties");
    w.finish()
}

/// `docProps/core.xml`
pub fn core(creator: &str, created: &DateTime<Utc>) -> String {
    let timestamp = created.to_rfc3339_opts(SecondsFormat::Secs, true);

    let mut w = XmlWriter::document();
    w.start_element("cp:coreProperties");
    w.attribute(
        "xmlns:cp",
        "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
    );
    w.attribute("xmlns:dc", "http://purl.org/dc/elements/1.1/");
    w.attribute("xmlns:dcterms", "http://purl.org/dc/terms/");
    w.attribute("xmlns:dcmitype", "http://purl.org/dc/dcmitype/");
    w.attribute("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance");
    w.close_start_tag();
    w.text_element("dc:creator", creator);
    w.text_element("cp:lastModifiedBy", creator);
    for tag in ["dcterms:created", "dcterms:modified"] {
        w.start_element(tag);
        w.attribute("xsi:type", "dcterms:W3CDTF");
        w.close_start_tag();
        w.write_str(&timestamp);
        w.end_element(tag);
    }
    w.end_element("cp:coreProperties");
    w.finish()
}

/// `xl/sharedStrings.xml`; always empty since strings are written inline
pub fn shared_strings() -> String {
    let mut w = XmlWriter::document();
    w.start_element("sst");
    w.attribute("xmlns", NS_MAIN);
    w.attribute_int("count", 0);
    w.attribute_int("uniqueCount", 0);
    w.close_empty();
    w.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn text_cell(value_type: ValueType, value: &str) -> Cell {
        Cell {
            value: Some(value.to_string()),
            formula: None,
            value_type,
            styles: Vec::new(),
            style_index: 0,
        }
    }

    #[test]
    fn test_cell_dispatch() {
        assert_eq!(
            cell(1, 0, &text_cell(ValueType::Number, "1.5"), false),
            r#"<c r="A2" t="n"><v>1.5</v></c>"#
        );
        assert_eq!(
            cell(1, 1, &text_cell(ValueType::Date, "2019-04-01T00:00:00.000Z"), false),
            r#"<c r="B2" t="d"><v>2019-04-01T00:00:00.000Z</v></c>"#
        );
        assert_eq!(
            cell(0, 2, &text_cell(ValueType::String, "abc"), false),
            r#"<c r="C1" t="inlineStr"><is><t>abc</t></is></c>"#
        );
        assert_eq!(
            cell(0, 3, &text_cell(ValueType::Boolean, "1"), false),
            r#"<c r="D1" t="b"><v>1</v></c>"#
        );
        assert_eq!(cell(0, 4, &Cell::blank(0), false), r#"<c r="E1"></c>"#);
    }

    #[test]
    fn test_formula_cell() {
        let formula = Cell {
            value: None,
            formula: Some("=IF(A1<>\"\",A1&\"x\",0)".to_string()),
            value_type: ValueType::String,
            styles: Vec::new(),
            style_index: 0,
        };
        assert_eq!(
            cell(2, 3, &formula, false),
            r#"<c r="D3" t="str"><f>=IF(A1&lt;&gt;&quot;&quot;,A1&amp;&quot;x&quot;,0)</f></c>"#
        );
    }

    #[test]
    fn test_inline_string_escaping() {
        assert_eq!(
            cell(0, 0, &text_cell(ValueType::String, "<a> & \"b\""), false),
            r#"<c r="A1" t="inlineStr"><is><t>&lt;a&gt; &amp; &quot;b&quot;</t></is></c>"#
        );
    }

    #[test]
    fn test_style_refs() {
        let mut styled = text_cell(ValueType::Number, "3");
        styled.style_index = 4;
        assert_eq!(
            cell(0, 0, &styled, true),
            r#"<c r="A1" s="4" t="n"><v>3</v></c>"#
        );
    }

    #[test]
    fn test_sheet_rows() {
        let rows = vec![
            Row {
                index: 0,
                cells: vec![text_cell(ValueType::String, "#")],
            },
            Row::new(1),
        ];
        let xml = sheet(&rows, false);
        assert!(xml.starts_with(super::super::xml_writer::XML_DECLARATION));
        assert!(xml.contains(
            r#"<sheetData><row r="1"><c r="A1" t="inlineStr"><is><t>#</t></is></c></row><row r="2"></row></sheetData>"#
        ));
        assert!(xml.ends_with("</worksheet>"));
    }

    #[test]
    fn test_workbook_sheets() {
        let names = vec!["Data".to_string(), "A & B".to_string()];
        let xml = workbook(&names);
        assert!(xml.contains(
            r#"<sheets><sheet name="Data" sheetId="1" r:id="rSheet1"/><sheet name="A &amp; B" sheetId="2" r:id="rSheet2"/></sheets>"#
        ));

        let rels = workbook_rels(&names);
        assert!(rels.contains(r#"Id="rSheet2" Type="#));
        assert!(rels.contains(r#"Target="worksheets/sheet2.xml"/>"#));
        assert!(rels.contains(r#"Id="rId3""#));

        let types = content_types(&names);
        assert!(types.contains(r#"PartName="/xl/worksheets/sheet1.xml""#));
        assert!(types.contains(r#"PartName="/xl/worksheets/sheet2.xml""#));
        assert!(!types.contains("sheet3.xml"));
    }

    #[test]
    fn test_shared_strings_always_empty() {
        assert_eq!(
            shared_strings(),
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="0" uniqueCount="0"/>"#
        );
    }

    #[test]
    fn test_document_properties() {
        let created = Utc.with_ymd_and_hms(2019, 4, 1, 9, 30, 0).unwrap();
        let core = core("sheetstream", &created);
        assert!(core.contains("<dc:creator>sheetstream</dc:creator>"));
        assert!(core.contains(
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">2019-04-01T09:30:00Z</dcterms:created>"#
        ));

        let app = app("R&D tool", "1.2.3");
        assert!(app.contains("<Application>R&amp;D tool</Application>"));
        assert!(app.contains("<AppVersion>1.2.3</AppVersion>"));
    }
}
