//! Pipeline settings.

/// Largest batch the remote API serves in one request.
pub const MAX_AMOUNT: usize = 50;

/// Batch used when the caller does not ask for a size.
pub const DEFAULT_AMOUNT: usize = 10;

/// Settings for `QuestionPipeline`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Whether remote questions go through the translator.
    pub translation_enabled: bool,
    /// Batch size when none is requested.
    pub default_amount: usize,
    /// Upper bound on a single batch.
    pub max_amount: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            translation_enabled: true,
            default_amount: DEFAULT_AMOUNT,
            max_amount: MAX_AMOUNT,
        }
    }
}

impl PipelineConfig {
    /// Clamps a requested batch size into `[1, max_amount]`.
    #[must_use]
    pub fn clamp_amount(&self, amount: usize) -> usize {
        amount.clamp(1, self.max_amount.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_amount_bounds() {
        let config = PipelineConfig::default();

        assert_eq!(config.clamp_amount(0), 1);
        assert_eq!(config.clamp_amount(7), 7);
        assert_eq!(config.clamp_amount(500), MAX_AMOUNT);
    }

    #[test]
    fn test_zero_max_amount_still_allows_one() {
        let config = PipelineConfig {
            max_amount: 0,
            ..PipelineConfig::default()
        };

        assert_eq!(config.clamp_amount(5), 1);
    }
}
