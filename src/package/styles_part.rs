//! Extension point for the `xl/styles.xml` part

use crate::format::{NumberFormat, NumberFormatRegistry};
use crate::style::{Style, StyleRuleEngine};

/// Read access to the workbook's style state when `xl/styles.xml` is written
pub struct StylesContext<'a> {
    styles: &'a StyleRuleEngine,
    formats: &'a NumberFormatRegistry,
}

impl<'a> StylesContext<'a> {
    pub fn new(styles: &'a StyleRuleEngine, formats: &'a NumberFormatRegistry) -> Self {
        StylesContext { styles, formats }
    }

    /// Registered styles in registration order
    pub fn styles(&self) -> impl Iterator<Item = (&'a str, &'a Style)> + 'a {
        self.styles.styles()
    }

    /// Style signatures; position is the index written into cells
    pub fn signatures(&self) -> impl Iterator<Item = (usize, Vec<&'a str>)> + 'a {
        self.styles.signatures().iter().enumerate().map(|(i, sig)| {
            let names = if sig.is_empty() {
                Vec::new()
            } else {
                sig.split(crate::style::SIGNATURE_SEPARATOR).collect()
            };
            (i, names)
        })
    }

    /// Look up a style by name
    pub fn style(&self, name: &str) -> Option<&'a Style> {
        self.styles.style(name)
    }

    /// Custom number formats in id order
    pub fn custom_formats(&self) -> Vec<NumberFormat> {
        self.formats.custom_formats().collect()
    }

    /// Id of a known number format code
    pub fn format_id(&self, format_code: &str) -> Option<u32> {
        self.formats.lookup(format_code)
    }
}

/// Materializes `xl/styles.xml` from the workbook's styles
pub trait StylesPart {
    /// Markup of the styles part
    fn render(&self, ctx: &StylesContext<'_>) -> String;

    /// Whether cells should reference their style index with `s="N"`
    ///
    /// Only return `true` when `render` writes one `cellXfs` entry per
    /// signature.
    fn cell_style_refs(&self) -> bool {
        false
    }
}

/// Minimal valid stylesheet with a single default format
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultStylesPart;

impl StylesPart for DefaultStylesPart {
    fn render(&self, _ctx: &StylesContext<'_>) -> String {
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
            r#"<fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts>"#,
            r#"<fills count="2"><fill><patternFill patternType="none"/></fill>"#,
            r#"<fill><patternFill patternType="gray125"/></fill></fills>"#,
            r#"<borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>"#,
            r#"<cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>"#,
            r#"<cellXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/></cellXfs>"#,
            r#"</styleSheet>"#
        )
        .to_string()
    }
}
