use super::{Deck, FeatureItem, Position, Slide};
use std::{collections::HashSet, fs, io, path::Path};
use tl::{HTMLTag, Parser};
use tracing::debug;

const SLIDE_SELECTOR: &str = ".slide";
const FEATURE_LIST_SELECTOR: &str = ".feature-list";
const FEATURE_ITEM_SELECTOR: &str = "li";
const POSITION_ATTRIBUTE: &str = "data-slide";
const TITLE_SELECTORS: &[&str] = &["h1", "h2", "h3"];

/// Discovers a deck of slides from an HTML document.
///
/// Every element with the `slide` class is a slide, in document order, and it must be tagged with
/// a `data-slide` attribute matching its 1-based position. List items inside elements with the
/// `feature-list` class become the slide's feature items.
#[derive(Default)]
pub struct HtmlDeckLoader;

impl HtmlDeckLoader {
    /// Load a deck from the file at the given path.
    pub fn load(&self, path: &Path) -> Result<Deck, DeckLoadError> {
        let contents = fs::read_to_string(path)?;
        self.parse(&contents)
    }

    /// Parse a deck out of an HTML document.
    pub fn parse(&self, input: &str) -> Result<Deck, DeckLoadError> {
        let dom = tl::parse(input, Default::default())?;
        let parser = dom.parser();
        let mut slides = Vec::new();
        for handle in dom.query_selector(SLIDE_SELECTOR).into_iter().flatten() {
            let Some(tag) = handle.get(parser).and_then(|node| node.as_tag()) else {
                continue;
            };
            let expected = Position::from_index(slides.len());
            let position = Self::parse_position(tag, expected)?;
            if position != expected {
                return Err(DeckLoadError::UnexpectedPosition { expected, found: position });
            }
            let title = Self::find_title(tag, parser);
            let features = Self::find_features(tag, parser);
            debug!(position = position.get(), features = features.len(), "discovered slide");
            slides.push(Slide { position, title, features });
        }
        Ok(Deck::from(slides))
    }

    fn parse_position(tag: &HTMLTag, expected: Position) -> Result<Position, DeckLoadError> {
        let value = match tag.attributes().get(POSITION_ATTRIBUTE) {
            Some(Some(value)) => value.as_utf8_str(),
            _ => return Err(DeckLoadError::MissingPosition(expected)),
        };
        value
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(Position::new)
            .ok_or_else(|| DeckLoadError::InvalidPosition { slide: expected, value: value.to_string() })
    }

    fn find_title<'a>(tag: &HTMLTag<'a>, parser: &Parser<'a>) -> Option<String> {
        for selector in TITLE_SELECTORS {
            let heading = tag
                .query_selector(parser, selector)
                .into_iter()
                .flatten()
                .find_map(|handle| handle.get(parser).and_then(|node| node.as_tag()));
            if let Some(heading) = heading {
                let text = collapse_whitespace(&heading.inner_text(parser));
                if !text.is_empty() {
                    return Some(text);
                }
            }
        }
        None
    }

    fn find_features<'a>(tag: &HTMLTag<'a>, parser: &Parser<'a>) -> Vec<FeatureItem> {
        // Nested feature lists match their items more than once.
        let mut seen = HashSet::new();
        let mut features = Vec::new();
        for list in tag.query_selector(parser, FEATURE_LIST_SELECTOR).into_iter().flatten() {
            let Some(list) = list.get(parser).and_then(|node| node.as_tag()) else {
                continue;
            };
            for handle in list.query_selector(parser, FEATURE_ITEM_SELECTOR).into_iter().flatten() {
                if !seen.insert(handle.get_inner()) {
                    continue;
                }
                let Some(item) = handle.get(parser).and_then(|node| node.as_tag()) else {
                    continue;
                };
                features.push(FeatureItem::new(collapse_whitespace(&item.inner_text(parser))));
            }
        }
        features
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[derive(Debug, thiserror::Error)]
pub enum DeckLoadError {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("parsing html failed: {0}")]
    ParsingHtml(#[from] tl::ParseError),

    #[error("slide {0} has no 'data-slide' attribute")]
    MissingPosition(Position),

    #[error("slide {slide} has invalid 'data-slide' attribute: {value:?}")]
    InvalidPosition { slide: Position, value: String },

    #[error("slide declared as {found} but it is slide number {expected}")]
    UnexpectedPosition { expected: Position, found: Position },
}
