//! Wrap configuration.

use stringwrap_core::WidthPolicy;

use crate::error::WrapError;

/// Smallest accepted column limit.
pub const MIN_LIMIT: usize = 2;

/// Tab stop spacing used by [`WrapConfig::new`].
pub const DEFAULT_TAB_SIZE: usize = 4;

/// Options for one wrap call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapConfig {
    /// Maximum visual width of a line in columns.
    pub limit: usize,
    /// Columns between tab stops. Zero makes tabs render as nothing.
    pub tab_size: usize,
    /// Drop whitespace at the start and end of every wrapped line.
    pub trim_whitespace: bool,
    /// Allow words wider than the remaining space to be broken.
    pub split_words: bool,
    /// How ambiguous-width characters are measured.
    pub width_policy: WidthPolicy,
}

impl WrapConfig {
    /// Create options with the given limit.
    ///
    /// Defaults: tab size 4, trimming on, splitting off, width policy
    /// detected from the environment.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            tab_size: DEFAULT_TAB_SIZE,
            trim_whitespace: true,
            split_words: false,
            width_policy: WidthPolicy::detect(),
        }
    }

    /// Set the tab size.
    #[must_use]
    pub fn tab_size(mut self, tab_size: usize) -> Self {
        self.tab_size = tab_size;
        self
    }

    /// Set whether per-line whitespace is trimmed.
    #[must_use]
    pub fn trim_whitespace(mut self, trim: bool) -> Self {
        self.trim_whitespace = trim;
        self
    }

    /// Set whether words may be split across lines.
    #[must_use]
    pub fn split_words(mut self, split: bool) -> Self {
        self.split_words = split;
        self
    }

    /// Set the width policy.
    #[must_use]
    pub fn width_policy(mut self, policy: WidthPolicy) -> Self {
        self.width_policy = policy;
        self
    }

    /// Check the preconditions of a wrap call.
    pub fn validate(&self) -> Result<(), WrapError> {
        if self.limit < MIN_LIMIT {
            return Err(WrapError::InvalidLimit { limit: self.limit });
        }
        Ok(())
    }
}

impl Default for WrapConfig {
    fn default() -> Self {
        Self::new(80)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let config = WrapConfig::new(12)
            .tab_size(8)
            .trim_whitespace(false)
            .split_words(true)
            .width_policy(WidthPolicy::Cjk);
        assert_eq!(config.limit, 12);
        assert_eq!(config.tab_size, 8);
        assert!(!config.trim_whitespace);
        assert!(config.split_words);
        assert_eq!(config.width_policy, WidthPolicy::Cjk);
    }

    #[test]
    fn defaults() {
        let config = WrapConfig::default();
        assert_eq!(config.limit, 80);
        assert_eq!(config.tab_size, DEFAULT_TAB_SIZE);
        assert!(config.trim_whitespace);
        assert!(!config.split_words);
    }

    #[test]
    fn validate_rejects_small_limits() {
        assert_eq!(
            WrapConfig::new(0).validate(),
            Err(WrapError::InvalidLimit { limit: 0 })
        );
        assert_eq!(
            WrapConfig::new(1).validate(),
            Err(WrapError::InvalidLimit { limit: 1 })
        );
        assert_eq!(WrapConfig::new(2).validate(), Ok(()));
    }
}
