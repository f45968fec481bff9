//! slidedeck: present HTML slide decks from your terminal.
//!
//! The [SlideDeckController] is the core of this crate: it owns the navigation state of a deck
//! and keeps every widget that depends on it in sync. Everything else loads decks, reads input
//! and draws the controller's state on the terminal.

pub(crate) mod commands;
pub(crate) mod config;
pub(crate) mod controller;
pub(crate) mod deck;
pub(crate) mod logging;
pub(crate) mod presenter;
pub(crate) mod render;
pub(crate) mod style;
pub(crate) mod terminal;

pub use crate::{
    commands::keyboard::{KeyBindingParseError, KeyBindingsValidationError},
    config::{AnimationConfig, Config, ConfigLoadError, ThemeConfig},
    controller::{
        AnimationState, CubicBezier, DeckCommand, DeckError, Dot, FeatureItemView, NavButton, NavigationState,
        RevealTiming, SlideDeckController, SlideView,
    },
    deck::{Deck, DeckBuilder, DeckLoadError, FeatureItem, HtmlDeckLoader, Position, Slide},
    logging::{LOG_FILTER_ENV, LoggingError, init_file_logging},
    presenter::{PresentationError, Presenter, PresenterOptions},
    render::RenderError,
    style::{Color, ParseColorError},
    terminal::printer::TerminalError,
};
