//! Named cell styles and the rules that assign them
//!
//! Styles are registered once per workbook under a unique name. Rules pair a
//! style name with a `(row, col)` predicate; for every cell the matching rule
//! names, in registration order and without duplicates, form the cell's style
//! signature. Each distinct signature is interned and its index is what the
//! cell carries.

use crate::error::{ExcelError, Result};
use indexmap::{IndexMap, IndexSet};

/// Separator between style names in a signature
pub const SIGNATURE_SEPARATOR: &str = ",";

/// Font attributes
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontStyle {
    pub size: Option<f64>,
    pub name: Option<String>,
    pub color: Option<String>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub strike: Option<bool>,
    pub underline: Option<bool>,
}

/// Border line shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum LineType {
    None,
    Thin,
    Medium,
    Dashed,
    Dotted,
    Thick,
    Double,
    Hair,
    MediumDashed,
    DashDot,
    MediumDashDot,
    DashDotDot,
    MediumDashDotDot,
    SlantedDashDot,
}

impl LineType {
    /// Attribute value used by `<border>` children
    pub fn as_xml_attr(&self) -> &'static str {
        match self {
            LineType::None => "none",
            LineType::Thin => "thin",
            LineType::Medium => "medium",
            LineType::Dashed => "dashed",
            LineType::Dotted => "dotted",
            LineType::Thick => "thick",
            LineType::Double => "double",
            LineType::Hair => "hair",
            LineType::MediumDashed => "mediumDashed",
            LineType::DashDot => "dashDot",
            LineType::MediumDashDot => "mediumDashDot",
            LineType::DashDotDot => "dashDotDot",
            LineType::MediumDashDotDot => "mediumDashDotDot",
            LineType::SlantedDashDot => "slantDashDot",
        }
    }
}

/// One side of a border
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineStyle {
    pub style: Option<LineType>,
    pub color: Option<String>,
}

impl LineStyle {
    pub fn new(style: LineType) -> Self {
        LineStyle {
            style: Some(style),
            color: None,
        }
    }
}

/// Border attributes per side
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BorderStyle {
    pub top: Option<LineStyle>,
    pub right: Option<LineStyle>,
    pub bottom: Option<LineStyle>,
    pub left: Option<LineStyle>,
}

/// Fill attributes
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FillStyle {
    pub color: Option<String>,
    pub pattern: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum HorizontalAlignment {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum VerticalAlignment {
    Top,
    Center,
    Bottom,
}

/// Number format given by code or by built-in id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum FormatRef {
    Id(u32),
    Code(String),
}

/// A named, immutable set of optional cell attributes
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    pub font: Option<FontStyle>,
    pub border: Option<BorderStyle>,
    pub fill: Option<FillStyle>,
    pub format: Option<FormatRef>,
    pub align: Option<HorizontalAlignment>,
    pub vertical_align: Option<VerticalAlignment>,
}

impl Style {
    pub fn new() -> Self {
        Style::default()
    }

    pub fn bold(mut self) -> Self {
        self.font.get_or_insert_with(FontStyle::default).bold = Some(true);
        self
    }

    pub fn italic(mut self) -> Self {
        self.font.get_or_insert_with(FontStyle::default).italic = Some(true);
        self
    }

    pub fn font(mut self, font: FontStyle) -> Self {
        self.font = Some(font);
        self
    }

    pub fn fill_color(mut self, color: &str) -> Self {
        self.fill = Some(FillStyle {
            color: Some(color.into()),
            pattern: Some("solid".into()),
        });
        self
    }

    pub fn border(mut self, border: BorderStyle) -> Self {
        self.border = Some(border);
        self
    }

    pub fn border_top(mut self, style: LineType) -> Self {
        self.border.get_or_insert_with(BorderStyle::default).top = Some(LineStyle::new(style));
        self
    }

    pub fn border_right(mut self, style: LineType) -> Self {
        self.border.get_or_insert_with(BorderStyle::default).right = Some(LineStyle::new(style));
        self
    }

    pub fn border_bottom(mut self, style: LineType) -> Self {
        self.border.get_or_insert_with(BorderStyle::default).bottom =
            Some(LineStyle::new(style));
        self
    }

    pub fn border_left(mut self, style: LineType) -> Self {
        self.border.get_or_insert_with(BorderStyle::default).left = Some(LineStyle::new(style));
        self
    }

    pub fn format_id(mut self, id: u32) -> Self {
        self.format = Some(FormatRef::Id(id));
        self
    }

    pub fn format_code(mut self, code: &str) -> Self {
        self.format = Some(FormatRef::Code(code.into()));
        self
    }

    pub fn align(mut self, align: HorizontalAlignment) -> Self {
        self.align = Some(align);
        self
    }

    pub fn vertical_align(mut self, align: VerticalAlignment) -> Self {
        self.vertical_align = Some(align);
        self
    }
}

/// Decides whether a rule applies to a zero-based `(row, col)`
pub type Predicate = Box<dyn Fn(u32, u32) -> bool>;

struct Rule {
    name: String,
    predicate: Predicate,
}

/// Holds the workbook's styles, the active rules and the signature table
#[derive(Default)]
pub struct StyleRuleEngine {
    styles: IndexMap<String, Style>,
    rules: Vec<Rule>,
    signatures: IndexSet<String>,
}

impl StyleRuleEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a style under a new name
    pub fn add_style(&mut self, name: &str, style: Style) -> Result<()> {
        if self.styles.contains_key(name) {
            return Err(ExcelError::DuplicateStyle(name.to_string()));
        }
        self.styles.insert(name.to_string(), style);
        Ok(())
    }

    /// Look up a registered style
    pub fn style(&self, name: &str) -> Option<&Style> {
        self.styles.get(name)
    }

    /// Registered styles in registration order
    pub fn styles(&self) -> impl Iterator<Item = (&str, &Style)> {
        self.styles.iter().map(|(name, style)| (name.as_str(), style))
    }

    /// Drop all active rules; styles and interned signatures are kept
    pub fn reset_rules(&mut self) {
        self.rules.clear();
    }

    /// Apply the named style wherever `predicate` holds
    pub fn add_rule<F>(&mut self, name: &str, predicate: F) -> Result<()>
    where
        F: Fn(u32, u32) -> bool + 'static,
    {
        if !self.styles.contains_key(name) {
            return Err(ExcelError::UnknownStyle(name.to_string()));
        }
        self.rules.push(Rule {
            name: name.to_string(),
            predicate: Box::new(predicate),
        });
        Ok(())
    }

    /// Number of active rules
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Matching rule names for a cell, in rule order, deduplicated
    pub fn matching_styles(&self, row: u32, col: u32) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for rule in &self.rules {
            if (rule.predicate)(row, col) && !names.contains(&rule.name.as_str()) {
                names.push(&rule.name);
            }
        }
        names
    }

    /// Signature index for the rules matching `(row, col)`
    pub fn style_index_for(&mut self, row: u32, col: u32) -> usize {
        let key = self.matching_styles(row, col).join(SIGNATURE_SEPARATOR);
        self.intern(key)
    }

    /// Signature index for the matching rules followed by a cell's own styles
    pub fn style_index_for_cell<S: AsRef<str>>(
        &mut self,
        row: u32,
        col: u32,
        explicit: &[S],
    ) -> Result<usize> {
        let mut names = self.matching_styles(row, col);
        for name in explicit {
            let name = name.as_ref();
            if !self.styles.contains_key(name) {
                return Err(ExcelError::UnknownStyle(name.to_string()));
            }
            if !names.contains(&name) {
                names.push(name);
            }
        }
        let key = names.join(SIGNATURE_SEPARATOR);
        Ok(self.intern(key))
    }

    fn intern(&mut self, key: String) -> usize {
        let (index, inserted) = self.signatures.insert_full(key);
        if inserted {
            log::trace!("new style signature {} = {:?}", index, self.signatures[index]);
        }
        index
    }

    /// Interned signatures; position is the style index
    pub fn signatures(&self) -> &IndexSet<String> {
        &self.signatures
    }
}

impl std::fmt::Debug for StyleRuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleRuleEngine")
            .field("styles", &self.styles.keys().collect::<Vec<_>>())
            .field(
                "rules",
                &self.rules.iter().map(|r| &r.name).collect::<Vec<_>>(),
            )
            .field("signatures", &self.signatures)
            .finish()
    }
}
