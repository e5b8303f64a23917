use crate::color::Color;

/// Position of a swatch in its viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SwatchId(pub usize);

/// Display state of a swatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mark {
    #[default]
    Normal,
    Selected,
}

/// Receives display-state changes as the selection moves.
pub trait Marker {
    fn mark(&mut self, swatch: SwatchId, mark: Mark);
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Selection {
    #[default]
    Empty,
    Selected { swatch: SwatchId, color: Color },
}

/// What a call to [`SelectionState::select`] changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The swatch was already selected.
    Unchanged,
    Selected { previous: Option<SwatchId> },
}

/// Tracks at most one selected swatch.
///
/// Moving the selection marks the previous swatch [`Mark::Normal`] before
/// the new one is marked [`Mark::Selected`], so no two swatches are ever
/// shown as selected at once.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    state: Selection,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, swatch: SwatchId, color: Color, marker: &mut dyn Marker) -> Transition {
        let previous = match self.state {
            Selection::Selected { swatch: prev, .. } if prev == swatch => {
                return Transition::Unchanged;
            }
            Selection::Selected { swatch: prev, .. } => Some(prev),
            Selection::Empty => None,
        };

        if let Some(prev) = previous {
            marker.mark(prev, Mark::Normal);
        }
        marker.mark(swatch, Mark::Selected);
        self.state = Selection::Selected { swatch, color };

        Transition::Selected { previous }
    }

    pub fn state(&self) -> Selection {
        self.state
    }

    pub fn selected(&self) -> Option<SwatchId> {
        match self.state {
            Selection::Selected { swatch, .. } => Some(swatch),
            Selection::Empty => None,
        }
    }

    /// RGB of the selected swatch.
    pub fn current(&self) -> Option<Color> {
        match self.state {
            Selection::Selected { color, .. } => Some(color.rgb()),
            Selection::Empty => None,
        }
    }

    pub fn current_with_alpha(&self, alpha: f32) -> Option<Color> {
        self.current().map(|c| c.with_alpha(alpha))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    /// Records every mark call and the resulting set of selected swatches.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<(SwatchId, Mark)>,
        selected: BTreeSet<SwatchId>,
        max_selected: usize,
    }

    impl Marker for Recorder {
        fn mark(&mut self, swatch: SwatchId, mark: Mark) {
            self.calls.push((swatch, mark));
            match mark {
                Mark::Normal => {
                    self.selected.remove(&swatch);
                }
                Mark::Selected => {
                    self.selected.insert(swatch);
                }
            }
            self.max_selected = self.max_selected.max(self.selected.len());
        }
    }

    const RED: Color = Color::new(1.0, 0.0, 0.0);
    const GREEN: Color = Color::new(0.0, 1.0, 0.0);
    const BLUE: Color = Color::new(0.0, 0.0, 1.0);

    #[test]
    fn starts_empty() {
        let state = SelectionState::new();
        assert_eq!(state.state(), Selection::Empty);
        assert_eq!(state.current(), None);
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn moving_selection_deselects_first() {
        let mut state = SelectionState::new();
        let mut rec = Recorder::default();

        let swatches = [(SwatchId(0), RED), (SwatchId(1), GREEN), (SwatchId(2), BLUE)];
        for (i, (id, color)) in swatches.iter().enumerate() {
            let transition = state.select(*id, *color, &mut rec);
            let previous = i.checked_sub(1).map(SwatchId);
            assert_eq!(transition, Transition::Selected { previous });
            assert_eq!(rec.selected, BTreeSet::from([*id]));
        }

        assert_eq!(rec.max_selected, 1, "two swatches were marked selected at once");
        assert_eq!(
            rec.calls,
            [
                (SwatchId(0), Mark::Selected),
                (SwatchId(0), Mark::Normal),
                (SwatchId(1), Mark::Selected),
                (SwatchId(1), Mark::Normal),
                (SwatchId(2), Mark::Selected),
            ]
        );
        assert_eq!(state.current(), Some(BLUE));
    }

    #[test]
    fn reselecting_is_a_no_op() {
        let mut state = SelectionState::new();
        let mut rec = Recorder::default();

        state.select(SwatchId(3), RED, &mut rec);
        let transition = state.select(SwatchId(3), RED, &mut rec);

        assert_eq!(transition, Transition::Unchanged);
        assert_eq!(rec.calls, [(SwatchId(3), Mark::Selected)]);
        assert_eq!(state.selected(), Some(SwatchId(3)));
    }

    #[test]
    fn current_strips_and_adds_alpha() {
        let mut state = SelectionState::new();
        state.select(SwatchId(0), RED.with_alpha(0.3), &mut Recorder::default());
        assert_eq!(state.current().map(|c| c.alpha), Some(None));
        let with_alpha = state.current_with_alpha(0.5).unwrap();
        assert_eq!(with_alpha, RED);
        assert_eq!(with_alpha.alpha, Some(0.5));
    }
}
