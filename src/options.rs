//! Workbook configuration

use chrono::{DateTime, Utc};

/// Environment variable holding the zip compression level (0-9)
pub const ENV_COMPRESSION_LEVEL: &str = "SHEETSTREAM_COMPRESSION_LEVEL";
/// Environment variable holding the number format locale
pub const ENV_LOCALE: &str = "SHEETSTREAM_LOCALE";

/// Settings fixed when a workbook is created
#[derive(Debug, Clone, PartialEq)]
pub struct WorkbookOptions {
    /// Written to `docProps/app.xml`
    pub application: String,
    /// Written to `docProps/app.xml`
    pub app_version: String,
    /// Author written to `docProps/core.xml`
    pub creator: String,
    /// Document timestamp used by every part that needs one
    pub created: DateTime<Utc>,
    /// Deflate level, 0-9
    pub compression_level: u32,
    /// Locale whose built-in number formats are merged in
    pub locale: Option<String>,
}

impl Default for WorkbookOptions {
    fn default() -> Self {
        WorkbookOptions {
            application: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            creator: env!("CARGO_PKG_NAME").to_string(),
            created: Utc::now(),
            compression_level: 6, // Balance between speed and compression
            locale: None,
        }
    }
}

impl WorkbookOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `SHEETSTREAM_COMPRESSION_LEVEL` and
    /// `SHEETSTREAM_LOCALE` when set
    ///
    /// Unparsable compression levels are ignored.
    pub fn from_env() -> Self {
        let mut options = Self::default();
        if let Some(level) = std::env::var(ENV_COMPRESSION_LEVEL)
            .ok()
            .and_then(|s| s.trim().parse::<u32>().ok())
        {
            options = options.compression_level(level);
        }
        if let Ok(locale) = std::env::var(ENV_LOCALE) {
            if !locale.trim().is_empty() {
                options = options.locale(locale.trim());
            }
        }
        options
    }

    pub fn application(mut self, name: &str) -> Self {
        self.application = name.to_string();
        self
    }

    pub fn app_version(mut self, version: &str) -> Self {
        self.app_version = version.to_string();
        self
    }

    pub fn creator(mut self, creator: &str) -> Self {
        self.creator = creator.to_string();
        self
    }

    pub fn created(mut self, created: DateTime<Utc>) -> Self {
        self.created = created;
        self
    }

    /// Set deflate level; values above 9 are clamped
    pub fn compression_level(mut self, level: u32) -> Self {
        self.compression_level = level.min(9);
        self
    }

    pub fn locale(mut self, locale: &str) -> Self {
        self.locale = Some(locale.to_string());
        self
    }
}
