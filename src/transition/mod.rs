use serde::{Deserialize, Serialize};

/// Transition identifiers for the four legs of a screen's life on the surface:
/// enter/exit when the screen is pushed, enter/exit when it is popped. Absent
/// identifiers disable that leg. A leg pair is only usable when both of its
/// identifiers are present; [`TransitionSpec::push_legs`] and
/// [`TransitionSpec::pop_legs`] enforce that on the consumer side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionSpec {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub push_in: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub push_out: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub pop_in: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub pop_out: Option<String>,
}

impl TransitionSpec {
    /// Spec with all four legs.
    pub fn of(
        push_in: impl Into<String>,
        push_out: impl Into<String>,
        pop_in: impl Into<String>,
        pop_out: impl Into<String>,
    ) -> Self {
        Self {
            push_in: Some(push_in.into()),
            push_out: Some(push_out.into()),
            pop_in: Some(pop_in.into()),
            pop_out: Some(pop_out.into()),
        }
    }

    /// Spec animating the push legs only.
    pub fn push_only(push_in: impl Into<String>, push_out: impl Into<String>) -> Self {
        Self {
            push_in: Some(push_in.into()),
            push_out: Some(push_out.into()),
            ..Self::default()
        }
    }

    pub fn push_legs(&self) -> Option<TransitionLegs> {
        match (&self.push_in, &self.push_out) {
            (Some(enter), Some(exit)) => Some(TransitionLegs {
                enter: enter.clone(),
                exit: exit.clone(),
            }),
            _ => None,
        }
    }

    pub fn pop_legs(&self) -> Option<TransitionLegs> {
        match (&self.pop_in, &self.pop_out) {
            (Some(enter), Some(exit)) => Some(TransitionLegs {
                enter: enter.clone(),
                exit: exit.clone(),
            }),
            _ => None,
        }
    }
}

/// One enter/exit pair handed to the surface host for a mount or unmount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionLegs {
    pub enter: String,
    pub exit: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legs_require_both_identifiers() {
        let spec = TransitionSpec {
            push_in: Some("slide_in".into()),
            ..TransitionSpec::default()
        };
        assert!(spec.push_legs().is_none());
        assert!(spec.pop_legs().is_none());

        let full = TransitionSpec::of("slide_in", "slide_out", "fade_in", "fade_out");
        let push = full.push_legs().unwrap();
        assert_eq!(push.enter, "slide_in");
        assert_eq!(push.exit, "slide_out");
        let pop = full.pop_legs().unwrap();
        assert_eq!(pop.enter, "fade_in");
        assert_eq!(pop.exit, "fade_out");
    }

    #[test]
    fn absent_legs_are_omitted_from_json() {
        let spec = TransitionSpec::push_only("slide_in", "slide_out");
        let raw = serde_json::to_string(&spec).unwrap();
        assert_eq!(raw, r#"{"pushIn":"slide_in","pushOut":"slide_out"}"#);

        let back: TransitionSpec = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, spec);
    }
}
