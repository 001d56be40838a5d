//! Workflow suggestion
//!
//! A single threshold rule: an inefficiency score above the threshold means
//! the workflow should be optimized.

use serde::{Deserialize, Serialize};

pub const OPTIMIZE_MESSAGE: &str = "Optimize process A and invest in operational assets B";
pub const OPTIMAL_MESSAGE: &str = "Workflow is optimal";

/// Score and threshold used when the caller does not supply a score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkflowConfig {
    pub inefficiency_score: f64,
    pub threshold: f64,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            inefficiency_score: 60.0,
            threshold: 50.0,
        }
    }
}

impl WorkflowConfig {
    /// Suggestion for the configured score
    pub fn suggestion(&self) -> WorkflowSuggestion {
        suggest(self.inefficiency_score, self.threshold)
    }

    /// Suggestion for an explicit score against the configured threshold
    pub fn suggestion_for(&self, score: f64) -> WorkflowSuggestion {
        suggest(score, self.threshold)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowSuggestion {
    pub inefficiency_score: f64,
    pub threshold: f64,
    pub needs_optimization: bool,
    pub message: String,
}

pub fn suggest(score: f64, threshold: f64) -> WorkflowSuggestion {
    let needs_optimization = score > threshold;
    let message = if needs_optimization {
        OPTIMIZE_MESSAGE
    } else {
        OPTIMAL_MESSAGE
    };

    WorkflowSuggestion {
        inefficiency_score: score,
        threshold,
        needs_optimization,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_score_needs_optimization() {
        let suggestion = WorkflowConfig::default().suggestion();
        assert!(suggestion.needs_optimization);
        assert_eq!(
            suggestion.message,
            "Optimize process A and invest in operational assets B"
        );
    }

    #[test]
    fn test_low_score_is_optimal() {
        let suggestion = WorkflowConfig::default().suggestion_for(40.0);
        assert!(!suggestion.needs_optimization);
        assert_eq!(suggestion.message, "Workflow is optimal");
    }

    #[test]
    fn test_score_equal_to_threshold_is_optimal() {
        assert_eq!(suggest(50.0, 50.0).message, OPTIMAL_MESSAGE);
    }
}
