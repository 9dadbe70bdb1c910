//! Per-file expand/collapse state.
//!
//! Two states: `Collapsed` groups with the configured cutoff, `Expanded`
//! shows every match. The controller only supplies grouping parameters; it
//! never groups anything itself.

use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum CutoffState {
    #[default]
    Collapsed,
    /// Expanded by a "show more" action that revealed `revealed` matches.
    Expanded { revealed: usize },
}

/// What the expand/collapse control should offer for a file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "count", rename_all = "camelCase")]
pub enum Affordance {
    /// Nothing hidden, nothing to collapse.
    None,
    ShowMore(usize),
    Hide(usize),
}

impl Affordance {
    /// Button label, e.g. `Show 3 more matches` or `Hide 1 match`.
    pub fn label(&self) -> Option<String> {
        let noun = |n: usize| if n == 1 { "match" } else { "matches" };
        match *self {
            Affordance::None => None,
            Affordance::ShowMore(n) => Some(format!("Show {n} more {}", noun(n))),
            Affordance::Hide(n) => Some(format!("Hide {n} {}", noun(n))),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CutoffController {
    state: CutoffState,
}

impl CutoffController {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> CutoffState {
        self.state
    }

    #[inline]
    pub fn is_expanded(&self) -> bool {
        matches!(self.state, CutoffState::Expanded { .. })
    }

    /// `(cutoff, force_all)` for the next grouping run.
    #[inline]
    pub fn window(&self, configured_cutoff: usize) -> (usize, bool) {
        match self.state {
            CutoffState::Collapsed => (configured_cutoff, false),
            CutoffState::Expanded { .. } => (usize::MAX, true),
        }
    }

    /// Show every match. Returns false (and stays collapsed) when nothing is hidden
    /// or the file is already expanded.
    pub fn expand(&mut self, hidden_match_count: usize) -> bool {
        if self.is_expanded() || hidden_match_count == 0 {
            return false;
        }
        self.state = CutoffState::Expanded {
            revealed: hidden_match_count,
        };
        true
    }

    /// Return to the configured cutoff. Returns the count the expansion revealed.
    pub fn collapse(&mut self) -> Option<usize> {
        match std::mem::take(&mut self.state) {
            CutoffState::Expanded { revealed } => Some(revealed),
            CutoffState::Collapsed => None,
        }
    }

    /// Back to `Collapsed`, as for a new result set.
    pub fn reset(&mut self) {
        self.state = CutoffState::Collapsed;
    }

    /// Control to show given the matches currently hidden.
    pub fn affordance(&self, hidden_match_count: usize) -> Affordance {
        match self.state {
            CutoffState::Expanded { revealed } => Affordance::Hide(revealed),
            CutoffState::Collapsed if hidden_match_count > 0 => {
                Affordance::ShowMore(hidden_match_count)
            }
            CutoffState::Collapsed => Affordance::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapsed_uses_configured_cutoff() {
        let controller = CutoffController::new();
        assert_eq!(controller.window(5), (5, false));
        assert_eq!(controller.affordance(3), Affordance::ShowMore(3));
        assert_eq!(controller.affordance(0), Affordance::None);
    }

    #[test]
    fn test_expand_then_collapse() {
        let mut controller = CutoffController::new();
        assert!(controller.expand(4));
        assert!(controller.is_expanded());
        assert_eq!(controller.window(5), (usize::MAX, true));
        assert_eq!(controller.affordance(0), Affordance::Hide(4));
        assert!(!controller.expand(4));

        assert_eq!(controller.collapse(), Some(4));
        assert_eq!(controller.state(), CutoffState::Collapsed);
        assert_eq!(controller.collapse(), None);
    }

    #[test]
    fn test_expand_with_nothing_hidden_is_noop() {
        let mut controller = CutoffController::new();
        assert!(!controller.expand(0));
        assert_eq!(controller.state(), CutoffState::Collapsed);
    }

    #[test]
    fn test_reset() {
        let mut controller = CutoffController::new();
        controller.expand(2);
        controller.reset();
        assert!(!controller.is_expanded());
    }

    #[test]
    fn test_labels() {
        assert_eq!(
            Affordance::ShowMore(1).label().as_deref(),
            Some("Show 1 more match")
        );
        assert_eq!(Affordance::Hide(3).label().as_deref(), Some("Hide 3 matches"));
        assert_eq!(Affordance::None.label(), None);
    }
}
