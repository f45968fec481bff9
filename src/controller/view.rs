use super::animation::AnimationState;
use crate::deck::{FeatureItem, Position, Slide};

/// The rendered state of a slide.
#[derive(Clone, Debug)]
pub struct SlideView {
    pub(crate) slide: Slide,
    pub(crate) active: bool,
    pub(crate) features_visible: bool,
    pub(crate) items: Vec<FeatureItemView>,
}

impl SlideView {
    pub(crate) fn new(slide: Slide) -> Self {
        let items = slide.features.iter().cloned().map(FeatureItemView::new).collect();
        Self { slide, active: false, features_visible: false, items }
    }

    pub fn position(&self) -> Position {
        self.slide.position
    }

    pub fn title(&self) -> Option<&str> {
        self.slide.title()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether this slide's feature list is shown.
    pub fn features_visible(&self) -> bool {
        self.features_visible
    }

    pub fn items(&self) -> &[FeatureItemView] {
        &self.items
    }

    pub(crate) fn deactivate(&mut self) {
        self.active = false;
        self.features_visible = false;
        for item in &mut self.items {
            item.animation = AnimationState::NotStarted;
        }
    }
}

/// A feature item and the state of its reveal.
#[derive(Clone, Debug)]
pub struct FeatureItemView {
    pub(crate) item: FeatureItem,
    pub(crate) animation: AnimationState,
}

impl FeatureItemView {
    fn new(item: FeatureItem) -> Self {
        Self { item, animation: AnimationState::NotStarted }
    }

    pub fn text(&self) -> &str {
        self.item.text()
    }

    pub fn animation(&self) -> AnimationState {
        self.animation
    }
}

/// A previous or next button.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavButton {
    pub(crate) disabled: bool,
}

impl NavButton {
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }
}

/// A slide indicator.
///
/// Dots are created once per deck and only have their active flag toggled afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dot {
    pub(crate) position: Position,
    pub(crate) active: bool,
}

impl Dot {
    pub(crate) fn new(position: Position) -> Self {
        Self { position, active: false }
    }

    /// The position this dot navigates to when activated.
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn label(&self) -> String {
        format!("Go to slide {}", self.position)
    }
}
