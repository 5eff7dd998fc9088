use huquq_llm::FailureKind;
use serde::{Serialize, Serializer};

/// How a payload came to be. The payload itself always has the same shape,
/// so this tag is the only way to tell a generated answer from a substitute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Generated,
    /// The backend answered successfully but without any text.
    Empty,
    Fallback(FailureKind),
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Generated => "generated",
            Outcome::Empty => "empty",
            Outcome::Fallback(FailureKind::Transport) => "fallback_transport",
            Outcome::Fallback(FailureKind::Timeout) => "fallback_timeout",
            Outcome::Fallback(FailureKind::MalformedOutput) => "fallback_malformed_output",
        }
    }
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated<T> {
    pub value: T,
    pub outcome: Outcome,
}

impl<T> Generated<T> {
    pub fn generated(value: T) -> Self {
        Self {
            value,
            outcome: Outcome::Generated,
        }
    }

    pub fn empty(value: T) -> Self {
        Self {
            value,
            outcome: Outcome::Empty,
        }
    }

    pub fn fallback(value: T, kind: FailureKind) -> Self {
        Self {
            value,
            outcome: Outcome::Fallback(kind),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.outcome, Outcome::Fallback(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_serializes_as_flat_string() {
        let json = serde_json::to_value(Outcome::Fallback(FailureKind::MalformedOutput)).unwrap();
        assert_eq!(json, serde_json::json!("fallback_malformed_output"));
        assert_eq!(
            serde_json::to_value(Outcome::Generated).unwrap(),
            serde_json::json!("generated")
        );
    }

    #[test]
    fn fallback_is_flagged() {
        assert!(Generated::fallback("x", FailureKind::Timeout).is_fallback());
        assert!(!Generated::empty("x").is_fallback());
        assert!(!Generated::generated(3).is_fallback());
    }
}
