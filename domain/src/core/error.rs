//! Domain error types

use thiserror::Error;

/// Why a direct vote was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Surface is not armed for the current attempt
    Disarmed,
    /// Jury surfaces only receive votes through the scoring authority
    JuryInput,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::Disarmed => write!(f, "surface is disarmed"),
            RejectReason::JuryInput => write!(f, "jury surface does not accept direct votes"),
        }
    }
}

/// Decision-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecisionError {
    #[error("Input rejected: {0}")]
    InputRejected(RejectReason),

    #[error("Invalid referee slot: {0} (expected 1..=3)")]
    InvalidSlot(u8),

    #[error("Referee {0} cannot cast an unset vote")]
    UnsetVote(u8),
}

impl DecisionError {
    /// Input that is dropped silently rather than reported to the operator.
    pub fn is_ignorable(&self) -> bool {
        matches!(self, DecisionError::InputRejected(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            DecisionError::InvalidSlot(4).to_string(),
            "Invalid referee slot: 4 (expected 1..=3)"
        );
        assert_eq!(
            DecisionError::InputRejected(RejectReason::Disarmed).to_string(),
            "Input rejected: surface is disarmed"
        );
    }

    #[test]
    fn test_is_ignorable() {
        assert!(DecisionError::InputRejected(RejectReason::JuryInput).is_ignorable());
        assert!(!DecisionError::InvalidSlot(0).is_ignorable());
        assert!(!DecisionError::UnsetVote(2).is_ignorable());
    }
}
