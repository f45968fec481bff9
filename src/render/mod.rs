pub(crate) mod draw;
pub(crate) mod layout;
pub(crate) mod properties;

use crate::{
    commands::focus::ControlFocus,
    config::ThemeConfig,
    controller::SlideDeckController,
    terminal::printer::{TerminalError, TerminalIo},
};
use draw::DeckDrawer;
use layout::ControlLayout;
use properties::WindowSize;
use std::io;

const MINIMUM_ROWS: u16 = 8;
const MINIMUM_COLUMNS: u16 = 20;

/// The result of a render operation.
pub(crate) type RenderResult<T = ()> = Result<T, RenderError>;

/// Allows drawing on the terminal.
pub(crate) struct TerminalDrawer<T: TerminalIo> {
    pub(crate) terminal: T,
    theme: ThemeConfig,
}

impl<T: TerminalIo> TerminalDrawer<T> {
    pub(crate) fn new(terminal: T, theme: ThemeConfig) -> Self {
        Self { terminal, theme }
    }

    /// Render the deck and return the layout of the controls that were drawn.
    pub(crate) fn render_deck(
        &mut self,
        controller: &SlideDeckController,
        focus: ControlFocus,
        dimensions: WindowSize,
    ) -> RenderResult<ControlLayout> {
        if dimensions.rows < MINIMUM_ROWS || dimensions.columns < MINIMUM_COLUMNS {
            return Err(RenderError::TerminalTooSmall);
        }
        let drawer = DeckDrawer { terminal: &mut self.terminal, theme: &self.theme, dimensions };
        drawer.draw(controller, focus)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("terminal: {0}")]
    Terminal(#[from] TerminalError),

    #[error("screen is too small")]
    TerminalTooSmall,
}
