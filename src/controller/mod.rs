use crate::deck::{Deck, Position};
use std::time::Duration;
use tracing::{debug, trace};

pub(crate) mod animation;
pub(crate) mod view;

pub use animation::{AnimationState, CubicBezier, RevealTiming};
pub use view::{Dot, FeatureItemView, NavButton, SlideView};

/// A navigation request coming from any input source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeckCommand {
    /// Move to the next slide.
    Next,

    /// Move to the previous slide.
    Previous,

    /// Go to the first slide.
    First,

    /// Go to the last slide.
    Last,

    /// Go to one particular slide.
    GoTo(usize),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("deck has no slides")]
    EmptyDeck,

    #[error("slide {position} is out of range, deck has {total_slides} slides")]
    InvalidPosition { position: usize, total_slides: usize },
}

/// The current position within a deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavigationState {
    current: Position,
}

impl NavigationState {
    pub fn current_position(&self) -> Position {
        self.current
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self { current: Position::FIRST }
    }
}

/// Drives a deck of slides.
///
/// This owns the current position and every widget that depends on it: the slides, the previous
/// and next buttons and the indicator dots. Every operation that changes the position performs a
/// full render pass over all of them, so they can never disagree with each other.
#[derive(Debug)]
pub struct SlideDeckController {
    state: NavigationState,
    slides: Vec<SlideView>,
    dots: Vec<Dot>,
    previous: NavButton,
    next: NavButton,
    timing: RevealTiming,
}

impl SlideDeckController {
    /// Construct a controller over a deck.
    ///
    /// This fails if the deck is empty.
    pub fn new(deck: Deck, timing: RevealTiming) -> Result<Self, DeckError> {
        if deck.is_empty() {
            return Err(DeckError::EmptyDeck);
        }
        let slides: Vec<_> = deck.into_slides().into_iter().map(SlideView::new).collect();
        let dots = (0..slides.len()).map(|index| Dot::new(Position::from_index(index))).collect();
        let mut controller = Self {
            state: NavigationState::default(),
            slides,
            dots,
            previous: NavButton::default(),
            next: NavButton::default(),
            timing,
        };
        debug!(total_slides = controller.total_slides(), "initialized deck");
        controller.render();
        Ok(controller)
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn current_position(&self) -> Position {
        self.state.current
    }

    pub fn total_slides(&self) -> usize {
        self.slides.len()
    }

    pub fn slides(&self) -> &[SlideView] {
        &self.slides
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    pub fn previous_button(&self) -> &NavButton {
        &self.previous
    }

    pub fn next_button(&self) -> &NavButton {
        &self.next
    }

    /// Get the currently active slide.
    pub fn current_slide(&self) -> &SlideView {
        &self.slides[self.state.current.index()]
    }

    /// Apply a command, returning whether the position changed.
    pub fn handle(&mut self, command: DeckCommand) -> Result<bool, DeckError> {
        debug!(?command, current = self.state.current.get(), "handling command");
        let moved = match command {
            DeckCommand::Next => self.next(),
            DeckCommand::Previous => self.previous(),
            DeckCommand::First => self.go_to(Position::FIRST.get())?,
            DeckCommand::Last => self.go_to(self.total_slides())?,
            DeckCommand::GoTo(position) => self.go_to(position)?,
        };
        Ok(moved)
    }

    /// Move to the next slide, if any.
    pub fn next(&mut self) -> bool {
        if self.state.current.get() >= self.total_slides() {
            return false;
        }
        self.state.current = self.state.current.next();
        self.render();
        true
    }

    /// Move to the previous slide, if any.
    pub fn previous(&mut self) -> bool {
        let Some(previous) = self.state.current.previous() else {
            return false;
        };
        self.state.current = previous;
        self.render();
        true
    }

    /// Jump to a specific slide.
    ///
    /// Positions outside of the deck are rejected and leave the state untouched. Going to the
    /// current slide re-renders it, which replays its reveal.
    pub fn go_to(&mut self, position: usize) -> Result<bool, DeckError> {
        let total_slides = self.total_slides();
        let target = Position::new(position)
            .filter(|position| position.get() <= total_slides)
            .ok_or(DeckError::InvalidPosition { position, total_slides })?;
        let moved = target != self.state.current;
        self.state.current = target;
        self.render();
        Ok(moved)
    }

    /// Render the current position into every widget.
    pub fn render(&mut self) {
        let current = self.state.current;
        for slide in &mut self.slides {
            slide.deactivate();
        }

        let slide = &mut self.slides[current.index()];
        slide.active = true;
        slide.features_visible = true;
        for (index, item) in slide.items.iter_mut().enumerate() {
            item.animation = self.timing.schedule(index);
        }

        self.previous.disabled = current == Position::FIRST;
        self.next.disabled = current.get() == self.total_slides();
        for dot in &mut self.dots {
            dot.active = dot.position == current;
        }
        trace!(current = current.get(), "rendered deck");
    }

    /// Advance the reveal animations on the active slide.
    ///
    /// `elapsed` is the time since the last render. Returns whether the visible state of any item
    /// changed.
    pub fn advance_animations(&mut self, elapsed: Duration) -> bool {
        let timing = &self.timing;
        let slide = &mut self.slides[self.state.current.index()];
        let mut changed = false;
        for (index, item) in slide.items.iter_mut().enumerate() {
            if !item.animation.is_pending() {
                continue;
            }
            let next = timing.state_at(timing.delay_for(index), elapsed);
            if next != item.animation {
                changed = changed || next.opacity() != item.animation.opacity();
                item.animation = next;
            }
        }
        changed
    }

    /// Whether any item in the active slide is still waiting to be or being revealed.
    pub fn has_pending_animations(&self) -> bool {
        self.current_slide().items.iter().any(|item| item.animation.is_pending())
    }
}
