use crate::{controller::DeckCommand, controller::SlideDeckController, deck::Position};

/// The on-screen control that receives activation keys.
///
/// Tab order is previous button, then every dot in order, then the next button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum ControlFocus {
    Previous,
    Dot(Position),
    #[default]
    Next,
}

impl ControlFocus {
    /// Move the focus forward, wrapping around after the next button.
    pub(crate) fn forward(self, total_slides: usize) -> Self {
        match self {
            Self::Previous if total_slides > 0 => Self::Dot(Position::FIRST),
            Self::Previous => Self::Next,
            Self::Dot(position) if position.get() < total_slides => Self::Dot(position.next()),
            Self::Dot(_) => Self::Next,
            Self::Next => Self::Previous,
        }
    }

    /// Move the focus backwards, wrapping around before the previous button.
    pub(crate) fn backward(self, total_slides: usize) -> Self {
        match self {
            Self::Previous => Self::Next,
            Self::Dot(position) => position.previous().map(Self::Dot).unwrap_or(Self::Previous),
            Self::Next => Position::new(total_slides).map(Self::Dot).unwrap_or(Self::Previous),
        }
    }

    /// Get the command that activating this control triggers.
    ///
    /// Disabled buttons don't trigger anything.
    pub(crate) fn activate(&self, controller: &SlideDeckController) -> Option<DeckCommand> {
        match self {
            Self::Previous if controller.previous_button().is_disabled() => None,
            Self::Previous => Some(DeckCommand::Previous),
            Self::Next if controller.next_button().is_disabled() => None,
            Self::Next => Some(DeckCommand::Next),
            Self::Dot(position) => Some(DeckCommand::GoTo(position.get())),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{controller::RevealTiming, deck::DeckBuilder};
    use rstest::rstest;

    fn dot(position: usize) -> ControlFocus {
        ControlFocus::Dot(Position::new(position).unwrap())
    }

    #[test]
    fn forward_cycle() {
        let mut focus = ControlFocus::Previous;
        let mut visited = Vec::new();
        for _ in 0..6 {
            focus = focus.forward(3);
            visited.push(focus);
        }
        assert_eq!(visited, &[dot(1), dot(2), dot(3), ControlFocus::Next, ControlFocus::Previous, dot(1)]);
    }

    #[test]
    fn backward_cycle() {
        let mut focus = ControlFocus::Next;
        let mut visited = Vec::new();
        for _ in 0..5 {
            focus = focus.backward(2);
            visited.push(focus);
        }
        assert_eq!(visited, &[dot(2), dot(1), ControlFocus::Previous, ControlFocus::Next, dot(2)]);
    }

    #[rstest]
    #[case::previous_disabled(1, ControlFocus::Previous, None)]
    #[case::next_enabled(1, ControlFocus::Next, Some(DeckCommand::Next))]
    #[case::previous_enabled(2, ControlFocus::Previous, Some(DeckCommand::Previous))]
    #[case::next_disabled(3, ControlFocus::Next, None)]
    #[case::dot(1, dot(3), Some(DeckCommand::GoTo(3)))]
    fn activation(#[case] position: usize, #[case] focus: ControlFocus, #[case] expected: Option<DeckCommand>) {
        let deck = DeckBuilder::default()
            .slide(Some("a"), ["x"])
            .slide(Some("b"), ["y"])
            .slide(Some("c"), ["z"])
            .build();
        let mut controller = SlideDeckController::new(deck, RevealTiming::default()).unwrap();
        controller.go_to(position).unwrap();
        assert_eq!(focus.activate(&controller), expected);
    }
}
