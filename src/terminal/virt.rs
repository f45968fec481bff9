use super::printer::{TerminalCommand, TerminalError, TerminalIo};
use crate::{
    render::properties::WindowSize,
    style::{Color, Colors, TextStyle},
};
use unicode_width::UnicodeWidthChar;

pub(crate) struct TerminalGrid {
    pub(crate) rows: Vec<Vec<StyledChar>>,
    pub(crate) background_color: Option<Color>,
}

impl TerminalGrid {
    /// Get the text in each row, with trailing whitespace removed.
    pub(crate) fn lines(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.iter().map(|c| c.character).collect::<String>().trim_end().to_string()).collect()
    }

    /// Find the row and column where a piece of text starts.
    pub(crate) fn find(&self, text: &str) -> Option<(u16, u16)> {
        for (row, line) in self.rows.iter().enumerate() {
            let chars: Vec<char> = line.iter().map(|c| c.character).collect();
            let needle: Vec<char> = text.chars().collect();
            if let Some(column) = chars.windows(needle.len()).position(|window| window == needle.as_slice()) {
                return Some((row as u16, column as u16));
            }
        }
        None
    }

    pub(crate) fn style_at(&self, row: u16, column: u16) -> Option<&TextStyle> {
        self.rows.get(row as usize).and_then(|r| r.get(column as usize)).map(|c| &c.style)
    }
}

/// An in-memory terminal that records what's printed into it.
pub(crate) struct VirtualTerminal {
    row: u16,
    column: u16,
    colors: Colors,
    rows: Vec<Vec<StyledChar>>,
    background_color: Option<Color>,
}

impl VirtualTerminal {
    pub(crate) fn new(dimensions: WindowSize) -> Self {
        let rows = vec![vec![StyledChar::default(); dimensions.columns as usize]; dimensions.rows as usize];
        Self { row: 0, column: 0, colors: Default::default(), rows, background_color: None }
    }

    pub(crate) fn into_contents(self) -> TerminalGrid {
        TerminalGrid { rows: self.rows, background_color: self.background_color }
    }

    fn current_cell_mut(&mut self) -> Option<&mut StyledChar> {
        self.rows.get_mut(self.row as usize).and_then(|row| row.get_mut(self.column as usize))
    }

    fn move_to(&mut self, column: u16, row: u16) {
        self.column = column;
        self.row = row;
    }

    fn print_text(&mut self, content: &str, style: &TextStyle) {
        let mut style = *style;
        style.colors.background = style.colors.background.or(self.colors.background);
        style.colors.foreground = style.colors.foreground.or(self.colors.foreground);
        for c in content.chars() {
            if let Some(cell) = self.current_cell_mut() {
                cell.character = c;
                cell.style = style;
            }
            self.column = self.column.saturating_add(c.width().unwrap_or(0).max(1) as u16);
        }
    }

    fn clear_screen(&mut self) {
        for row in &mut self.rows {
            for cell in row {
                *cell = StyledChar::default();
            }
        }
        self.background_color = self.colors.background;
    }
}

impl TerminalIo for VirtualTerminal {
    fn execute(&mut self, command: &TerminalCommand<'_>) -> Result<(), TerminalError> {
        use TerminalCommand::*;
        match command {
            BeginUpdate | EndUpdate | Flush => (),
            MoveTo { column, row } => self.move_to(*column, *row),
            PrintText { content, style } => self.print_text(content, style),
            ClearScreen => self.clear_screen(),
            SetColors(colors) => self.colors = *colors,
        };
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct StyledChar {
    pub(crate) character: char,
    pub(crate) style: TextStyle,
}

impl Default for StyledChar {
    fn default() -> Self {
        Self { character: ' ', style: Default::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait TerminalGridExt {
        fn assert_contents(&self, lines: &[&str]);
    }

    impl TerminalGridExt for TerminalGrid {
        fn assert_contents(&self, lines: &[&str]) {
            assert_eq!(self.rows.len(), lines.len());
            for (line, expected) in self.rows.iter().zip(lines) {
                let line: String = line.iter().map(|c| c.character).collect();
                assert_eq!(line, *expected);
            }
        }
    }

    fn terminal(rows: u16, columns: u16) -> VirtualTerminal {
        VirtualTerminal::new(WindowSize { rows, columns })
    }

    #[test]
    fn text() {
        let mut term = terminal(2, 3);
        term.print_text("abc", &Default::default());
        term.move_to(0, 1);
        term.print_text("A", &Default::default());
        let grid = term.into_contents();
        grid.assert_contents(&["abc", "A  "]);
    }

    #[test]
    fn overflow_is_clipped() {
        let mut term = terminal(1, 3);
        term.print_text("abcdef", &Default::default());
        term.move_to(0, 4);
        term.print_text("x", &Default::default());
        term.into_contents().assert_contents(&["abc"]);
    }

    #[test]
    fn clear_resets_cells() {
        let mut term = terminal(1, 3);
        let colors = Colors { background: Some(Color::new(1, 2, 3)), foreground: None };
        term.execute(&TerminalCommand::SetColors(colors)).unwrap();
        term.print_text("ab", &Default::default());
        term.execute(&TerminalCommand::ClearScreen).unwrap();
        let grid = term.into_contents();
        grid.assert_contents(&["   "]);
        assert_eq!(grid.background_color, Some(Color::new(1, 2, 3)));
    }

    #[test]
    fn inherits_colors() {
        let mut term = terminal(1, 3);
        let colors = Colors { background: Some(Color::new(1, 2, 3)), foreground: Some(Color::new(4, 5, 6)) };
        term.execute(&TerminalCommand::SetColors(colors)).unwrap();
        term.print_text("a", &TextStyle::default().fg_color(Color::new(9, 9, 9)));
        let grid = term.into_contents();
        let style = grid.style_at(0, 0).unwrap();
        assert_eq!(style.colors.foreground, Some(Color::new(9, 9, 9)));
        assert_eq!(style.colors.background, Some(Color::new(1, 2, 3)));
    }

    #[test]
    fn find_text() {
        let mut term = terminal(2, 6);
        term.move_to(2, 1);
        term.print_text("hi", &Default::default());
        let grid = term.into_contents();
        assert_eq!(grid.find("hi"), Some((1, 2)));
        assert_eq!(grid.find("bye"), None);
        assert_eq!(grid.lines(), &["", "  hi"]);
    }
}
