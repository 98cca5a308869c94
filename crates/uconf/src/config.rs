//! Tree configuration

use bytestr::Growth;

/// Default cap on soft-reference hops taken by [`Tree::follow`](crate::Tree::follow).
pub const DEFAULT_MAX_FOLLOW_DEPTH: usize = 10;

/// Settings for a [`Tree`](crate::Tree).
///
/// ```
/// use uconf::{Tree, TreeConfig};
///
/// let tree = Tree::with_config(TreeConfig::with_max_follow_depth(3));
/// assert_eq!(tree.config().max_follow_depth, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TreeConfig {
    /// Maximum number of soft references resolved in a chain before
    /// resolution gives up (cycle protection)
    pub max_follow_depth: usize,

    /// Growth policy for strings the tree allocates itself
    pub string_growth: Growth,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_follow_depth: DEFAULT_MAX_FOLLOW_DEPTH,
            string_growth: Growth::Tight,
        }
    }
}

impl TreeConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config with a custom soft-reference depth cap.
    pub fn with_max_follow_depth(max_depth: usize) -> Self {
        Self {
            max_follow_depth: max_depth,
            ..Default::default()
        }
    }

    /// Use `growth` for strings the tree allocates.
    pub fn string_growth(mut self, growth: Growth) -> Self {
        self.string_growth = growth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TreeConfig::new();
        assert_eq!(config.max_follow_depth, 10);
        assert_eq!(config.string_growth, Growth::Tight);
    }

    #[test]
    fn test_builder() {
        let config = TreeConfig::with_max_follow_depth(2).string_growth(Growth::Amortized);
        assert_eq!(config.max_follow_depth, 2);
        assert_eq!(config.string_growth, Growth::Amortized);
    }
}
