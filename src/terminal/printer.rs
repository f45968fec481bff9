use crate::style::{Colors, TextStyle};
use crossterm::{cursor, event, queue, style, terminal};
use std::io::{self, Write};

/// A drawing operation.
#[derive(Debug, PartialEq)]
pub(crate) enum TerminalCommand<'a> {
    BeginUpdate,
    EndUpdate,
    MoveTo { column: u16, row: u16 },
    PrintText { content: &'a str, style: TextStyle },
    ClearScreen,
    SetColors(Colors),
    Flush,
}

/// Something drawing operations can be applied to.
pub(crate) trait TerminalIo {
    fn execute(&mut self, command: &TerminalCommand<'_>) -> Result<(), TerminalError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TerminalError {
    #[error("io: {0}")]
    Io(#[from] io::Error),
}

/// Writes drawing operations as escape sequences.
///
/// A terminal created via [Terminal::enter] owns the screen: it switches to raw mode, the
/// alternate screen and mouse reporting, and switches back when dropped.
pub(crate) struct Terminal<W: Write> {
    writer: W,
    owns_screen: bool,
}

impl<W: Write> Terminal<W> {
    #[cfg(test)]
    fn new(writer: W) -> Self {
        Self { writer, owns_screen: false }
    }

    pub(crate) fn enter(mut writer: W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        queue!(writer, terminal::EnterAlternateScreen, cursor::Hide, event::EnableMouseCapture)?;
        writer.flush()?;
        Ok(Self { writer, owns_screen: true })
    }
}

impl<W: Write> TerminalIo for Terminal<W> {
    fn execute(&mut self, command: &TerminalCommand<'_>) -> Result<(), TerminalError> {
        let writer = &mut self.writer;
        match command {
            TerminalCommand::BeginUpdate => queue!(writer, terminal::BeginSynchronizedUpdate)?,
            TerminalCommand::EndUpdate => queue!(writer, terminal::EndSynchronizedUpdate)?,
            TerminalCommand::MoveTo { column, row } => queue!(writer, cursor::MoveTo(*column, *row))?,
            TerminalCommand::PrintText { content, style } => queue!(writer, style::PrintStyledContent(style.apply(*content)))?,
            TerminalCommand::ClearScreen => queue!(writer, terminal::Clear(terminal::ClearType::All))?,
            TerminalCommand::SetColors(colors) => {
                let colors = style::Colors {
                    foreground: colors.foreground.map(Into::into),
                    background: colors.background.map(Into::into),
                };
                queue!(writer, style::ResetColor, style::SetColors(colors))?
            }
            TerminalCommand::Flush => writer.flush()?,
        };
        Ok(())
    }
}

impl<W: Write> Drop for Terminal<W> {
    fn drop(&mut self) {
        if !self.owns_screen {
            return;
        }
        let _ = queue!(self.writer, event::DisableMouseCapture, terminal::LeaveAlternateScreen, cursor::Show);
        let _ = self.writer.flush();
        let _ = terminal::disable_raw_mode();
    }
}
