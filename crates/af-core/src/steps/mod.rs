//! The wizard step registry.
//!
//! `ApplicationStep` is the single definition site for the application
//! wizard's step sequence. The variants are closed, so an unregistered
//! step id can only appear at a string-parsing boundary (`FromStr`), never
//! inside the domain.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One step of the application wizard, in sequence order.
///
/// The derived `Ord` follows declaration order, which is also the wizard's
/// navigation order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStep {
    Basics,
    Personal,
    Education,
    Sponsor,
    Documents,
    Review,
    Declaration,
}

/// Registry entry: a step together with its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDefinition {
    pub step: ApplicationStep,
    pub label: &'static str,
}

const SEQUENCE: [StepDefinition; 7] = [
    StepDefinition {
        step: ApplicationStep::Basics,
        label: "Basics",
    },
    StepDefinition {
        step: ApplicationStep::Personal,
        label: "Personal Information",
    },
    StepDefinition {
        step: ApplicationStep::Education,
        label: "Education History",
    },
    StepDefinition {
        step: ApplicationStep::Sponsor,
        label: "Sponsor",
    },
    StepDefinition {
        step: ApplicationStep::Documents,
        label: "Supporting Documents",
    },
    StepDefinition {
        step: ApplicationStep::Review,
        label: "Review",
    },
    StepDefinition {
        step: ApplicationStep::Declaration,
        label: "Declaration",
    },
];

/// The canonical ordered step sequence. Never empty, same slice every call.
pub fn all_steps() -> &'static [StepDefinition] {
    &SEQUENCE
}

/// Denormalized per-step completion flag, persisted alongside the record so
/// dashboard views never have to replay the step sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepFlag {
    Basics,
    PersonalInfo,
    Education,
    ProgramInfo,
    Documents,
    Declaration,
}

impl ApplicationStep {
    /// Stable string id used in URLs and persisted rows.
    pub fn id(&self) -> &'static str {
        match self {
            ApplicationStep::Basics => "basics",
            ApplicationStep::Personal => "personal",
            ApplicationStep::Education => "education",
            ApplicationStep::Sponsor => "sponsor",
            ApplicationStep::Documents => "documents",
            ApplicationStep::Review => "review",
            ApplicationStep::Declaration => "declaration",
        }
    }

    /// Position in the sequence, starting at zero.
    pub fn index(&self) -> usize {
        match self {
            ApplicationStep::Basics => 0,
            ApplicationStep::Personal => 1,
            ApplicationStep::Education => 2,
            ApplicationStep::Sponsor => 3,
            ApplicationStep::Documents => 4,
            ApplicationStep::Review => 5,
            ApplicationStep::Declaration => 6,
        }
    }

    /// The step after this one, `None` at the last step.
    pub fn next(&self) -> Option<ApplicationStep> {
        SEQUENCE.get(self.index() + 1).map(|d| d.step)
    }

    /// The step before this one, `None` at the first step.
    pub fn previous(&self) -> Option<ApplicationStep> {
        self.index()
            .checked_sub(1)
            .and_then(|i| SEQUENCE.get(i))
            .map(|d| d.step)
    }

    /// The entry step of the wizard, reachable with no prerequisites.
    pub fn first() -> ApplicationStep {
        SEQUENCE[0].step
    }

    pub fn is_last(&self) -> bool {
        self.next().is_none()
    }

    pub fn label(&self) -> &'static str {
        SEQUENCE[self.index()].label
    }

    /// Completion flags this step sets when it completes.
    ///
    /// The basics step is where program and intake are chosen, so it also
    /// marks the program info flag. Sponsor and review carry no flag.
    pub fn completion_flags(&self) -> &'static [StepFlag] {
        match self {
            ApplicationStep::Basics => &[StepFlag::Basics, StepFlag::ProgramInfo],
            ApplicationStep::Personal => &[StepFlag::PersonalInfo],
            ApplicationStep::Education => &[StepFlag::Education],
            ApplicationStep::Documents => &[StepFlag::Documents],
            ApplicationStep::Declaration => &[StepFlag::Declaration],
            ApplicationStep::Sponsor | ApplicationStep::Review => &[],
        }
    }
}

impl fmt::Display for ApplicationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A step id that is not registered in the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown wizard step id: {0}")]
pub struct UnknownStep(pub String);

impl FromStr for ApplicationStep {
    type Err = UnknownStep;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SEQUENCE
            .iter()
            .map(|d| d.step)
            .find(|step| step.id() == s)
            .ok_or_else(|| UnknownStep(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_is_total_and_unique() {
        let steps = all_steps();
        assert_eq!(steps.len(), 7);
        for (i, definition) in steps.iter().enumerate() {
            assert_eq!(definition.step.index(), i);
        }
        assert_eq!(ApplicationStep::first(), ApplicationStep::Basics);
        assert!(ApplicationStep::Declaration.is_last());
    }

    #[test]
    fn next_and_previous_are_inverse_in_the_interior() {
        for definition in all_steps() {
            let step = definition.step;
            if let Some(next) = step.next() {
                assert_eq!(next.previous(), Some(step));
            }
            if let Some(previous) = step.previous() {
                assert_eq!(previous.next(), Some(step));
            }
        }
        assert_eq!(ApplicationStep::Basics.previous(), None);
        assert_eq!(ApplicationStep::Declaration.next(), None);
    }

    #[test]
    fn step_ids_round_trip_through_from_str() {
        for definition in all_steps() {
            let parsed: ApplicationStep = definition.step.id().parse().unwrap();
            assert_eq!(parsed, definition.step);
        }
    }

    #[test]
    fn unregistered_id_is_rejected() {
        let err = "payment".parse::<ApplicationStep>().unwrap_err();
        assert_eq!(err, UnknownStep("payment".to_string()));
    }

    #[test]
    fn basics_sets_both_basics_and_program_info_flags() {
        assert_eq!(
            ApplicationStep::Basics.completion_flags(),
            &[StepFlag::Basics, StepFlag::ProgramInfo]
        );
        assert!(ApplicationStep::Sponsor.completion_flags().is_empty());
        assert!(ApplicationStep::Review.completion_flags().is_empty());
    }

    #[test]
    fn serde_uses_the_stable_lowercase_id() {
        let json = serde_json::to_string(&ApplicationStep::Personal).unwrap();
        assert_eq!(json, "\"personal\"");
    }
}
