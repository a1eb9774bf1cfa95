//! Small XML builder used by the part renderers

use std::borrow::Cow;

/// XML declaration written at the top of every part
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Escape `&`, `<`, `>` and `"` for text content and attribute values
///
/// Control characters XML 1.0 forbids are written as `_xHHHH_`, the OOXML
/// escape for characters that cannot appear in markup. Returns the input
/// unchanged (borrowed) when nothing needs escaping.
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text
        .chars()
        .any(|ch| matches!(ch, '&' | '<' | '>' | '"') || is_forbidden(ch))
    {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            ch if is_forbidden(ch) => out.push_str(&format!("_x{:04X}_", ch as u32)),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// C0 controls other than tab, line feed and carriage return
#[inline]
fn is_forbidden(ch: char) -> bool {
    matches!(ch, '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}')
}

/// Builds markup into an in-memory buffer
pub struct XmlWriter {
    buffer: String,
}

impl XmlWriter {
    pub fn new() -> Self {
        XmlWriter {
            buffer: String::with_capacity(8192), // 8KB buffer
        }
    }

    /// Writer that starts with the XML declaration
    pub fn document() -> Self {
        let mut writer = Self::new();
        writer.write_str(XML_DECLARATION);
        writer
    }

    /// Write markup as-is
    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.buffer.push_str(s);
    }

    /// Write XML element start tag, left open for attributes
    #[inline]
    pub fn start_element(&mut self, name: &str) {
        self.buffer.push('<');
        self.buffer.push_str(name);
    }

    /// Close start tag
    #[inline]
    pub fn close_start_tag(&mut self) {
        self.buffer.push('>');
    }

    /// Close start tag as a self-closing element
    #[inline]
    pub fn close_empty(&mut self) {
        self.buffer.push_str("/>");
    }

    /// Write XML element end tag
    #[inline]
    pub fn end_element(&mut self, name: &str) {
        self.buffer.push_str("</");
        self.buffer.push_str(name);
        self.buffer.push('>');
    }

    /// Write attribute with escaped value
    #[inline]
    pub fn attribute(&mut self, name: &str, value: &str) {
        self.buffer.push(' ');
        self.buffer.push_str(name);
        self.buffer.push_str("=\"");
        self.buffer.push_str(&escape(value));
        self.buffer.push('"');
    }

    /// Write attribute with integer value
    #[inline]
    pub fn attribute_int(&mut self, name: &str, value: u64) {
        let mut buf = itoa::Buffer::new();
        self.buffer.push(' ');
        self.buffer.push_str(name);
        self.buffer.push_str("=\"");
        self.buffer.push_str(buf.format(value));
        self.buffer.push('"');
    }

    /// Write `<name>text</name>` with escaped text
    pub fn text_element(&mut self, name: &str, text: &str) {
        self.start_element(name);
        self.close_start_tag();
        self.write_escaped(text);
        self.end_element(name);
    }

    /// Write text content with XML escaping
    #[inline]
    pub fn write_escaped(&mut self, text: &str) {
        self.buffer.push_str(&escape(text));
    }

    /// Take the built markup
    pub fn finish(self) -> String {
        self.buffer
    }
}

impl Default for XmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xml_writer() {
        let mut writer = XmlWriter::new();
        writer.start_element("root");
        writer.attribute("attr", "value");
        writer.attribute_int("n", 3);
        writer.close_start_tag();
        writer.write_str("content");
        writer.end_element("root");

        assert_eq!(writer.finish(), "<root attr=\"value\" n=\"3\">content</root>");
    }

    #[test]
    fn test_xml_escaping() {
        assert_eq!(
            escape("<test a=\"1\">&value</test>"),
            "&lt;test a=&quot;1&quot;&gt;&amp;value&lt;/test&gt;"
        );
        // Apostrophes are left alone
        assert_eq!(escape("it's"), "it's");
        assert!(matches!(escape("plain"), Cow::Borrowed(_)));
        assert!(matches!(escape("a\tb\r\nc"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_control_characters() {
        assert_eq!(escape("a\u{b}b"), "a_x000B_b");
        assert_eq!(escape("\u{0}\u{1f}<"), "_x0000__x001F_&lt;");
    }

    #[test]
    fn test_escape_is_not_repeated() {
        let mut writer = XmlWriter::new();
        writer.text_element("t", "&amp;");
        assert_eq!(writer.finish(), "<t>&amp;amp;</t>");
    }
}
