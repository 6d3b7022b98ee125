//! Surface roles
//!
//! A referee-mode surface is where votes originate (keypads are attached to
//! it). A jury-mode surface only mirrors what the scoring authority tells it.
//! Role-specific behaviour is read from [`RoleBehavior`] instead of being
//! checked ad hoc.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Referee,
    Jury,
}

/// Behaviour table for a [`Role`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleBehavior {
    /// Keypad votes are accepted directly.
    pub accepts_direct_input: bool,
    /// First majority triggers the down signal locally.
    pub originates_reveal: bool,
    /// Down arrow is taken away by a timer rather than by an explicit call.
    pub auto_hides_down: bool,
}

impl Role {
    pub fn from_jury_flag(jury: bool) -> Self {
        if jury { Role::Jury } else { Role::Referee }
    }

    pub fn is_jury(&self) -> bool {
        matches!(self, Role::Jury)
    }

    pub fn behavior(&self) -> RoleBehavior {
        match self {
            Role::Referee => RoleBehavior {
                accepts_direct_input: true,
                originates_reveal: true,
                auto_hides_down: true,
            },
            Role::Jury => RoleBehavior {
                accepts_direct_input: false,
                originates_reveal: false,
                auto_hides_down: false,
            },
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Referee => write!(f, "referee"),
            Role::Jury => write!(f, "jury"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jury_is_passive() {
        let behavior = Role::Jury.behavior();
        assert!(!behavior.accepts_direct_input);
        assert!(!behavior.originates_reveal);
        assert!(!behavior.auto_hides_down);
    }

    #[test]
    fn test_referee_is_active() {
        let behavior = Role::Referee.behavior();
        assert!(behavior.accepts_direct_input);
        assert!(behavior.originates_reveal);
        assert!(behavior.auto_hides_down);
    }

    #[test]
    fn test_from_jury_flag() {
        assert_eq!(Role::from_jury_flag(true), Role::Jury);
        assert_eq!(Role::from_jury_flag(false), Role::Referee);
    }
}
