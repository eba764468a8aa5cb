use thiserror::Error;

use crate::display::DEFAULT_PRECISION;

/// A configuration line that was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigWarning {
    /// The line has no `=`.
    #[error("line {line}: expected 'name = value'")]
    Malformed { line: usize },
    /// The key is not a known setting.
    #[error("line {line}: unknown setting '{key}'")]
    UnknownKey { line: usize, key: String },
    /// An integer setting with a value that is not a non-negative integer.
    #[error("line {line}: '{value}' is not a valid integer for '{key}'")]
    BadInteger { line: usize, key: String, value: String },
}

/// User settings for the command line front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Significant digits shown for floats.
    pub precision: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self { precision: DEFAULT_PRECISION }
    }
}

impl Settings {
    /// Reads `name = value` lines on top of the defaults.
    ///
    /// Blank lines and lines starting with `#` are ignored. Lines that cannot
    /// be applied are reported and skipped; the rest still take effect.
    ///
    /// # Example
    /// ```
    /// use ka::config::{ConfigWarning, Settings};
    ///
    /// let (settings, warnings) = Settings::parse("precision = 10\ncolour = blue");
    /// assert_eq!(settings.precision, 10);
    /// assert_eq!(warnings.len(), 1);
    /// assert!(matches!(warnings[0], ConfigWarning::UnknownKey { line: 2, .. }));
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> (Self, Vec<ConfigWarning>) {
        let mut settings = Self::default();
        let mut warnings = Vec::new();

        for (i, raw) in text.lines().enumerate() {
            let line = i + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let Some((key, value)) = trimmed.split_once('=') else {
                warnings.push(ConfigWarning::Malformed { line });
                continue;
            };
            if let Err(warning) = settings.apply(line, key.trim(), value.trim()) {
                warnings.push(warning);
            }
        }

        (settings, warnings)
    }

    fn apply(&mut self, line: usize, key: &str, value: &str) -> Result<(), ConfigWarning> {
        match key {
            "precision" => {
                self.precision = value.parse().map_err(|_| ConfigWarning::BadInteger { line,
                                                                                       key: key.to_string(),
                                                                                       value: value.to_string() })?;
            },
            _ => {
                return Err(ConfigWarning::UnknownKey { line,
                                                       key: key.to_string() });
            },
        }
        Ok(())
    }
}
