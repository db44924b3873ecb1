use std::env;

/// Environment variable overriding [`BridgeConfig::max_depth`].
pub const MAX_DEPTH_ENV: &str = "TABLEBRIDGE_MAX_DEPTH";

pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Settings passed explicitly to every conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Deepest nesting the lifter will follow before failing.
    pub max_depth: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl BridgeConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Defaults overridden by `TABLEBRIDGE_MAX_DEPTH` when it holds a number.
    pub fn from_env() -> Self {
        let config = Self::default();
        match env::var(MAX_DEPTH_ENV) {
            Ok(raw) => match raw.trim().parse::<usize>() {
                Ok(depth) => config.with_max_depth(depth),
                Err(_) => {
                    tracing::warn!(value = %raw, "ignoring unparsable {}", MAX_DEPTH_ENV);
                    config
                }
            },
            Err(_) => config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_depth() {
        assert_eq!(BridgeConfig::default().max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_with_max_depth() {
        assert_eq!(BridgeConfig::default().with_max_depth(3).max_depth, 3);
    }
}
