use super::keyboard::{CommandKeyBindings, KeyBindingsValidationError, KeyboardListener};
use crate::config::KeyBindingsConfig;
use serde::Deserialize;
use std::{io, time::Duration};
use strum::EnumDiscriminants;

/// A command listener that allows polling all command sources in a single place.
pub struct CommandListener {
    keyboard: KeyboardListener,
}

impl CommandListener {
    /// Create a new command listener using the given key bindings.
    pub fn new(config: KeyBindingsConfig) -> Result<Self, KeyBindingsValidationError> {
        let bindings = CommandKeyBindings::try_from(config)?;
        Ok(Self { keyboard: KeyboardListener::new(bindings) })
    }

    /// Try to get the next command.
    ///
    /// This attempts to get a command and returns `Ok(None)` on timeout.
    pub(crate) fn try_next_command(&mut self, timeout: Duration) -> io::Result<Option<Command>> {
        self.keyboard.poll_next_command(timeout)
    }
}

/// A command.
#[derive(Clone, Debug, PartialEq, Eq, EnumDiscriminants)]
#[strum_discriminants(derive(Deserialize))]
pub(crate) enum Command {
    /// Redraw the deck.
    ///
    /// This can happen on terminal resize.
    Redraw,

    /// Move to the next slide.
    Next,

    /// Move to the previous slide.
    Previous,

    /// Go to the first slide.
    FirstSlide,

    /// Go to the last slide.
    LastSlide,

    /// Go to one particular slide.
    GoToSlide(u32),

    /// Move the focus to the next control.
    FocusNext,

    /// Move the focus to the previous control.
    FocusPrevious,

    /// Activate the focused control.
    Activate,

    /// The primary mouse button was pressed at this cell.
    Click { column: u16, row: u16 },

    /// Exit the presentation.
    Exit,
}
