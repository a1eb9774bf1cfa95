//! Number format id registry
//!
//! Built-in formats use the fixed ids of the OOXML standard. Codes that are not
//! built in get a custom id the first time they are looked up and keep it for
//! the lifetime of the registry.

use crate::error::{ExcelError, Result};
use indexmap::IndexMap;

/// A number format code and its id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NumberFormat {
    pub id: u32,
    pub format_code: String,
}

impl NumberFormat {
    pub fn new(id: u32, format_code: impl Into<String>) -> Self {
        NumberFormat {
            id,
            format_code: format_code.into(),
        }
    }
}

const BUILTIN_FORMATS: &[(u32, &str)] = &[
    (0, "General"),
    (1, "0"),
    (2, "0.00"),
    (3, "#,##0"),
    (4, "#,##0.00"),
    (9, "0%"),
    (10, "0.00%"),
    (11, "0.00E+00"),
    (12, "# ?/?"),
    (13, "# ??/??"),
    (14, "mm-dd-yy"),
    (15, "d-mmm-yy"),
    (16, "d-mmm"),
    (17, "mmm-yy"),
    (18, "h:mm AM/PM"),
    (19, "h:mm:ss AM/PM"),
    (20, "h:mm"),
    (21, "h:mm:ss"),
    (22, "m/d/yy h:mm"),
    (37, "#,##0 ;(#,##0)"),
    (38, "#,##0 ;[Red](#,##0)"),
    (39, "#,##0.00;(#,##0.00)"),
    (40, "#,##0.00;[Red](#,##0.00)"),
    (45, "mm:ss"),
    (46, "[h]:mm:ss"),
    (47, "mmss.0"),
    (48, "##0.0E+0"),
    (49, "@"),
];

/// Supplies locale-specific built-in formats
pub trait LocaleFormats {
    /// Locale identifier, e.g. `ja-JP`
    fn locale(&self) -> &str;

    /// `(id, formatCode)` pairs in registration order
    fn formats(&self) -> Vec<NumberFormat>;
}

/// Japanese built-in formats (ids 27-36 and 50-58)
#[derive(Debug, Clone, Copy, Default)]
pub struct JaJpFormats;

const JA_JP_FORMATS: &[(u32, &str)] = &[
    (27, "[$-411]ge.m.d"),
    (28, "[$-411]ggge\"年\"m\"月\"d\"日\""),
    (29, "[$-411]ggge\"年\"m\"月\"d\"日\""),
    (30, "m/d/yy"),
    (31, "yyyy\"年\"m\"月\"d\"日\""),
    (32, "h\"時\"mm\"分\""),
    (33, "h\"時\"mm\"分\"ss\"秒\""),
    (34, "yyyy\"年\"m\"月\""),
    (35, "m\"月\"d\"日\""),
    (36, "[$-411]ge.m.d"),
    (50, "[$-411]ge.m.d"),
    (51, "[$-411]ggge\"年\"m\"月\"d\"日\""),
    (52, "yyyy\"年\"m\"月\""),
    (53, "m\"月\"d\"日\""),
    (54, "[$-411]ggge\"年\"m\"月\"d\"日\""),
    (55, "yyyy\"年\"m\"月\""),
    (56, "m\"月\"d\"日\""),
    (57, "[$-411]ge.m.d"),
    (58, "[$-411]ggge\"年\"m\"月\"d\"日\""),
];

impl LocaleFormats for JaJpFormats {
    fn locale(&self) -> &str {
        "ja-JP"
    }

    fn formats(&self) -> Vec<NumberFormat> {
        JA_JP_FORMATS
            .iter()
            .map(|(id, code)| NumberFormat::new(*id, *code))
            .collect()
    }
}

/// Resolve a locale identifier to its built-in format supplier
///
/// Matching ignores case and accepts `_` as separator.
pub fn locale_formats(locale: &str) -> Result<Box<dyn LocaleFormats>> {
    match locale.replace('_', "-").to_ascii_lowercase().as_str() {
        "ja-jp" | "ja" => Ok(Box::new(JaJpFormats)),
        _ => Err(ExcelError::UnknownLocale(locale.to_string())),
    }
}

/// Maps format codes to ids
#[derive(Debug, Clone)]
pub struct NumberFormatRegistry {
    builtins: IndexMap<String, u32>,
    customs: IndexMap<String, u32>,
    max_builtin_id: u32,
}

impl NumberFormatRegistry {
    /// Registry with the standard built-in formats
    pub fn new() -> Self {
        let mut registry = NumberFormatRegistry {
            builtins: IndexMap::with_capacity(BUILTIN_FORMATS.len()),
            customs: IndexMap::new(),
            max_builtin_id: 0,
        };
        for (id, code) in BUILTIN_FORMATS {
            registry.add_builtin(*id, code);
        }
        registry
    }

    /// Registry with the standard formats plus a locale's built-ins
    pub fn with_locale(locale: &dyn LocaleFormats) -> Self {
        let mut registry = Self::new();
        for format in locale.formats() {
            registry.add_builtin(format.id, &format.format_code);
        }
        registry
    }

    fn add_builtin(&mut self, id: u32, code: &str) {
        // First registration of a code wins
        self.builtins.entry(code.to_string()).or_insert(id);
        self.max_builtin_id = self.max_builtin_id.max(id);
    }

    /// Id for a format code, assigning a custom id on first sight
    ///
    /// Custom ids start right after the highest built-in id so they never
    /// collide with a reserved one.
    pub fn get_id(&mut self, format_code: &str) -> u32 {
        if let Some(&id) = self.builtins.get(format_code) {
            return id;
        }
        if let Some(&id) = self.customs.get(format_code) {
            return id;
        }

        let id = self.max_builtin_id + self.customs.len() as u32 + 1;
        self.customs.insert(format_code.to_string(), id);
        id
    }

    /// Id of a known format without assigning one
    pub fn lookup(&self, format_code: &str) -> Option<u32> {
        self.builtins
            .get(format_code)
            .or_else(|| self.customs.get(format_code))
            .copied()
    }

    /// Custom formats in assignment order
    pub fn custom_formats(&self) -> impl Iterator<Item = NumberFormat> + '_ {
        self.customs
            .iter()
            .map(|(code, id)| NumberFormat::new(*id, code.clone()))
    }

    /// Number of distinct built-in codes
    pub fn builtin_count(&self) -> usize {
        self.builtins.len()
    }
}

impl Default for NumberFormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}
