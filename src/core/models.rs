//! Export settings.

use serde::{Deserialize, Serialize};

/// Controls which optional columns an export carries.
///
/// Sender and content are always written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Include the message timestamp
    pub include_timestamps: bool,
    /// Include the system-notice flag
    pub include_system_flag: bool,
    /// Include the unmodified source text
    pub include_raw: bool,
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables every optional column.
    pub fn all() -> Self {
        Self {
            include_timestamps: true,
            include_system_flag: true,
            include_raw: true,
        }
    }

    #[must_use]
    pub fn with_timestamps(mut self) -> Self {
        self.include_timestamps = true;
        self
    }

    #[must_use]
    pub fn with_system_flag(mut self) -> Self {
        self.include_system_flag = true;
        self
    }

    #[must_use]
    pub fn with_raw(mut self) -> Self {
        self.include_raw = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_optional_columns() {
        let config = OutputConfig::new();
        assert!(!config.include_timestamps);
        assert!(!config.include_system_flag);
        assert!(!config.include_raw);
    }

    #[test]
    fn test_builders() {
        let config = OutputConfig::new().with_timestamps().with_raw();
        assert!(config.include_timestamps);
        assert!(!config.include_system_flag);
        assert!(config.include_raw);
        assert_eq!(OutputConfig::all(), config.with_system_flag());
    }
}
