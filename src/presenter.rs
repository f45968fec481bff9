use crate::{
    commands::{
        focus::ControlFocus,
        keyboard::KeyBindingsValidationError,
        listener::{Command, CommandListener},
    },
    config::{KeyBindingsConfig, ThemeConfig},
    controller::{DeckCommand, DeckError, SlideDeckController},
    render::{RenderError, RenderResult, TerminalDrawer, layout::ControlLayout, properties::WindowSize},
    terminal::printer::{Terminal, TerminalIo},
};
use std::{
    io,
    time::{Duration, Instant},
};
use tracing::{debug, info, warn};

const IDLE_POLL_TIMEOUT: Duration = Duration::from_millis(250);

pub struct PresenterOptions {
    pub theme: ThemeConfig,
    pub bindings: KeyBindingsConfig,
    pub frame_interval: Duration,
    pub start: Option<usize>,
}

/// A deck presenter.
///
/// This type puts the controller, the input and the terminal together.
pub struct Presenter {
    controller: SlideDeckController,
    commands: CommandListener,
    focus: ControlFocus,
    layout: ControlLayout,
    animation_start: Instant,
    theme: ThemeConfig,
    frame_interval: Duration,
}

impl Presenter {
    /// Construct a new presenter.
    pub fn new(mut controller: SlideDeckController, options: PresenterOptions) -> Result<Self, PresentationError> {
        let commands = CommandListener::new(options.bindings)?;
        if let Some(start) = options.start {
            controller.go_to(start)?;
        }
        Ok(Self {
            controller,
            commands,
            focus: ControlFocus::default(),
            layout: ControlLayout::default(),
            animation_start: Instant::now(),
            theme: options.theme,
            frame_interval: options.frame_interval,
        })
    }

    /// Run the presentation until the user exits.
    pub fn present(mut self) -> Result<(), PresentationError> {
        let terminal = Terminal::enter(io::stdout())?;
        let mut drawer = TerminalDrawer::new(terminal, self.theme.clone());
        info!(total_slides = self.controller.total_slides(), "starting presentation");
        self.animation_start = Instant::now();
        loop {
            self.render(&mut drawer)?;
            loop {
                let timeout =
                    if self.controller.has_pending_animations() { self.frame_interval } else { IDLE_POLL_TIMEOUT };
                let Some(command) = self.commands.try_next_command(timeout)? else {
                    if self.controller.advance_animations(self.animation_start.elapsed()) {
                        break;
                    }
                    continue;
                };
                match self.apply_command(command) {
                    CommandSideEffect::Exit => return Ok(()),
                    CommandSideEffect::Redraw => break,
                    CommandSideEffect::None => (),
                };
            }
        }
    }

    fn render<T: TerminalIo>(&mut self, drawer: &mut TerminalDrawer<T>) -> RenderResult {
        let dimensions = WindowSize::current()?;
        match drawer.render_deck(&self.controller, self.focus, dimensions) {
            Ok(layout) => {
                self.layout = layout;
                Ok(())
            }
            // If the screen is too small, simply ignore this. Eventually the user will resize the
            // screen.
            Err(RenderError::TerminalTooSmall) => {
                self.layout = ControlLayout::default();
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn apply_command(&mut self, command: Command) -> CommandSideEffect {
        let deck_command = match command {
            Command::Exit => return CommandSideEffect::Exit,
            Command::Redraw => return CommandSideEffect::Redraw,
            Command::FocusNext => {
                self.focus = self.focus.forward(self.controller.total_slides());
                return CommandSideEffect::Redraw;
            }
            Command::FocusPrevious => {
                self.focus = self.focus.backward(self.controller.total_slides());
                return CommandSideEffect::Redraw;
            }
            Command::Activate => match self.focus.activate(&self.controller) {
                Some(command) => command,
                None => return CommandSideEffect::None,
            },
            Command::Click { column, row } => {
                let Some(control) = self.layout.control_at(column, row) else {
                    return CommandSideEffect::None;
                };
                self.focus = control;
                match control.activate(&self.controller) {
                    Some(command) => command,
                    None => return CommandSideEffect::Redraw,
                }
            }
            Command::Next => DeckCommand::Next,
            Command::Previous => DeckCommand::Previous,
            Command::FirstSlide => DeckCommand::First,
            Command::LastSlide => DeckCommand::Last,
            Command::GoToSlide(number) => DeckCommand::GoTo(number as usize),
        };
        self.navigate(deck_command)
    }

    fn navigate(&mut self, command: DeckCommand) -> CommandSideEffect {
        match self.controller.handle(command) {
            // Jumps always re-render the active slide, even if it didn't change.
            Ok(moved) if moved || !matches!(command, DeckCommand::Next | DeckCommand::Previous) => {
                debug!(position = self.controller.current_position().get(), "navigated");
                self.animation_start = Instant::now();
                CommandSideEffect::Redraw
            }
            Ok(_) => CommandSideEffect::None,
            Err(e) => {
                warn!("ignoring command {command:?}: {e}");
                CommandSideEffect::None
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum CommandSideEffect {
    Exit,
    Redraw,
    None,
}

/// An error when running a presentation.
#[derive(thiserror::Error, Debug)]
pub enum PresentationError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("invalid key bindings: {0}")]
    KeyBindings(#[from] KeyBindingsValidationError),

    #[error(transparent)]
    Deck(#[from] DeckError),
}
