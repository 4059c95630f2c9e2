//! Orchestration domain entities
//!
//! The orchestration is a small state machine:
//!
//! ```text
//! Drafting ──ok──> Critiquing ──ok──> Synthesizing ──ok──> Done(Synthesized)
//!    │                 │                   │
//!   fail              fail                fail
//!    v                 v                   v
//! Done(DirectFallback  Done(Critique-      Done(Synthesis-
//!   | Exhausted)         Unavailable)        Unavailable)
//! ```
//!
//! Every path ends in [`Stage::Done`]; there are no cycles.

use crate::core::provider::{Contributors, ProviderId};
use serde::{Deserialize, Serialize};

/// Stage of an orchestration run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Primary provider writes the first answer
    Drafting,
    /// Secondary provider enhances the draft
    Critiquing,
    /// Primary provider merges draft and critique
    Synthesizing,
    /// Terminal state
    Done,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Drafting => "drafting",
            Stage::Critiquing => "critiquing",
            Stage::Synthesizing => "synthesizing",
            Stage::Done => "done",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::Drafting => "Draft",
            Stage::Critiquing => "Critique",
            Stage::Synthesizing => "Synthesis",
            Stage::Done => "Done",
        }
    }

    /// Next stage given whether this stage's provider call succeeded
    pub fn advance(self, succeeded: bool) -> Stage {
        match (self, succeeded) {
            (Stage::Drafting, true) => Stage::Critiquing,
            (Stage::Critiquing, true) => Stage::Synthesizing,
            _ => Stage::Done,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Done)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// How an orchestration reached [`Stage::Done`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// All three stages succeeded; the answer is the synthesis
    Synthesized,
    /// Critique failed; the answer is the draft
    CritiqueUnavailable,
    /// Synthesis failed; the answer is the draft (never the critique)
    SynthesisUnavailable,
    /// Drafting failed; the answer came from the secondary provider directly
    DirectFallback,
    /// Drafting and the direct fallback both failed
    Exhausted,
}

impl Resolution {
    /// Providers whose output shaped the final answer
    pub fn contributors(&self) -> Contributors {
        match self {
            Resolution::Synthesized => Contributors::both(),
            Resolution::CritiqueUnavailable | Resolution::SynthesisUnavailable => {
                Contributors::only(ProviderId::Primary)
            }
            Resolution::DirectFallback => Contributors::only(ProviderId::Secondary),
            Resolution::Exhausted => Contributors::none(),
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, Resolution::Exhausted)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Synthesized => "synthesized",
            Resolution::CritiqueUnavailable => "critique_unavailable",
            Resolution::SynthesisUnavailable => "synthesis_unavailable",
            Resolution::DirectFallback => "direct_fallback",
            Resolution::Exhausted => "exhausted",
        }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_transitions() {
        let mut stage = Stage::Drafting;
        let mut visited = vec![stage];
        while !stage.is_terminal() {
            stage = stage.advance(true);
            visited.push(stage);
        }
        assert_eq!(
            visited,
            vec![
                Stage::Drafting,
                Stage::Critiquing,
                Stage::Synthesizing,
                Stage::Done
            ]
        );
    }

    #[test]
    fn test_failure_always_terminates() {
        for stage in [Stage::Drafting, Stage::Critiquing, Stage::Synthesizing] {
            assert_eq!(stage.advance(false), Stage::Done);
        }
        assert_eq!(Stage::Done.advance(true), Stage::Done);
    }

    #[test]
    fn test_resolution_contributors() {
        assert_eq!(Resolution::Synthesized.contributors(), Contributors::both());
        assert_eq!(
            Resolution::SynthesisUnavailable.contributors(),
            Contributors::only(ProviderId::Primary)
        );
        assert_eq!(
            Resolution::DirectFallback.contributors(),
            Contributors::only(ProviderId::Secondary)
        );
        assert!(Resolution::Exhausted.contributors().is_empty());
        assert!(!Resolution::Exhausted.is_success());
    }
}
