use std::{fmt, num::NonZeroUsize};

pub(crate) mod html;

pub use html::{DeckLoadError, HtmlDeckLoader};

/// The 1-based position of a slide within a deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(NonZeroUsize);

impl Position {
    /// The first position in any deck.
    pub const FIRST: Position = Position(NonZeroUsize::MIN);

    /// Construct a position, returning `None` for 0.
    pub fn new(position: usize) -> Option<Self> {
        NonZeroUsize::new(position).map(Self)
    }

    /// Get this position as a plain number.
    pub fn get(&self) -> usize {
        self.0.get()
    }

    /// The 0-based index this position maps to.
    pub(crate) fn index(&self) -> usize {
        self.0.get() - 1
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Self(NonZeroUsize::MIN.saturating_add(index))
    }

    pub(crate) fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }

    pub(crate) fn previous(&self) -> Option<Self> {
        Self::new(self.0.get() - 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry in a slide's feature list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureItem {
    pub(crate) text: String,
}

impl FeatureItem {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A slide as discovered in the source document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slide {
    pub(crate) position: Position,
    pub(crate) title: Option<String>,
    pub(crate) features: Vec<FeatureItem>,
}

impl Slide {
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn features(&self) -> &[FeatureItem] {
        &self.features
    }
}

/// The fixed, ordered collection of slides.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Deck {
    slides: Vec<Slide>,
}

impl Deck {
    /// Get the number of slides in this deck.
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn iter_slides(&self) -> impl Iterator<Item = &Slide> {
        self.slides.iter()
    }

    pub(crate) fn into_slides(self) -> Vec<Slide> {
        self.slides
    }
}

/// A deck builder.
///
/// Positions are assigned in the order slides are added.
#[derive(Default)]
pub struct DeckBuilder {
    slides: Vec<Slide>,
}

impl DeckBuilder {
    pub fn slide<T, I, S>(mut self, title: Option<T>, features: I) -> Self
    where
        T: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let position = Position::from_index(self.slides.len());
        let features = features.into_iter().map(FeatureItem::new).collect();
        self.slides.push(Slide { position, title: title.map(Into::into), features });
        self
    }

    pub fn build(self) -> Deck {
        Deck { slides: self.slides }
    }
}

impl From<Vec<Slide>> for Deck {
    fn from(slides: Vec<Slide>) -> Self {
        Self { slides }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builder_positions() {
        let deck = DeckBuilder::default()
            .slide(Some("intro"), ["a", "b"])
            .slide(None::<String>, Vec::<String>::new())
            .slide(Some("end"), ["c"])
            .build();
        let positions: Vec<_> = deck.iter_slides().map(|s| s.position().get()).collect();
        assert_eq!(positions, &[1, 2, 3]);
        assert_eq!(deck.iter_slides().nth(1).unwrap().title(), None);
    }

    #[test]
    fn position_bounds() {
        assert!(Position::new(0).is_none());
        assert_eq!(Position::FIRST.previous(), None);
        assert_eq!(Position::FIRST.next().get(), 2);
        assert_eq!(Position::from_index(3).index(), 3);
    }
}
