use super::{
    RenderResult,
    layout::{ACTIVE_DOT, ControlLayout, INACTIVE_DOT, NEXT_LABEL, PREVIOUS_LABEL},
    properties::WindowSize,
};
use crate::{
    commands::focus::ControlFocus,
    config::ThemeConfig,
    controller::{SlideDeckController, SlideView},
    style::{Colors, TextStyle},
    terminal::printer::{TerminalCommand, TerminalIo},
};
use unicode_width::UnicodeWidthStr;

const TITLE_ROW: u16 = 1;
const FIRST_ITEM_ROW: u16 = 4;
const ITEM_BULLET: &str = "• ";
// The control bar sits right above the footer.
const CONTROLS_FROM_BOTTOM: u16 = 3;

/// Draws the state of a deck controller into a terminal.
pub(crate) struct DeckDrawer<'a, T: TerminalIo> {
    pub(crate) terminal: &'a mut T,
    pub(crate) theme: &'a ThemeConfig,
    pub(crate) dimensions: WindowSize,
}

impl<T: TerminalIo> DeckDrawer<'_, T> {
    pub(crate) fn draw(mut self, controller: &SlideDeckController, focus: ControlFocus) -> RenderResult<ControlLayout> {
        let colors = Colors { foreground: Some(self.theme.foreground), background: Some(self.theme.background) };
        self.terminal.execute(&TerminalCommand::BeginUpdate)?;
        self.terminal.execute(&TerminalCommand::SetColors(colors))?;
        self.terminal.execute(&TerminalCommand::ClearScreen)?;

        let slide = controller.current_slide();
        self.draw_title(slide)?;
        if slide.features_visible() {
            self.draw_items(slide)?;
        }
        let layout = self.draw_controls(controller, focus)?;
        self.draw_footer(controller, focus)?;

        self.terminal.execute(&TerminalCommand::EndUpdate)?;
        self.terminal.execute(&TerminalCommand::Flush)?;
        Ok(layout)
    }

    fn draw_title(&mut self, slide: &SlideView) -> RenderResult {
        let fallback;
        let title = match slide.title() {
            Some(title) => title,
            None => {
                fallback = format!("Slide {}", slide.position());
                fallback.as_str()
            }
        };
        let style = TextStyle::default().bold().fg_color(self.theme.accent);
        let column = self.centered_column(title.width());
        self.print_at(title, style, column, TITLE_ROW)
    }

    fn draw_items(&mut self, slide: &SlideView) -> RenderResult {
        let widest = slide.items().iter().map(|item| item.text().width() + ITEM_BULLET.width()).max().unwrap_or(0);
        let column = self.centered_column(widest);
        for (index, item) in slide.items().iter().enumerate() {
            let opacity = item.animation().opacity();
            if opacity <= 0.0 {
                continue;
            }
            let row = FIRST_ITEM_ROW + index as u16;
            if row >= self.controls_row() {
                break;
            }
            let color = self.theme.background.blend(self.theme.foreground, opacity);
            let text = format!("{ITEM_BULLET}{}", item.text());
            self.print_at(&text, TextStyle::default().fg_color(color), column, row)?;
        }
        Ok(())
    }

    fn draw_controls(&mut self, controller: &SlideDeckController, focus: ControlFocus) -> RenderResult<ControlLayout> {
        let layout = ControlLayout::compute(controller.total_slides(), self.controls_row(), self.dimensions.columns);
        for region in layout.iter_regions() {
            let (text, mut style) = match region.control {
                ControlFocus::Previous => (PREVIOUS_LABEL, self.button_style(controller.previous_button().is_disabled())),
                ControlFocus::Next => (NEXT_LABEL, self.button_style(controller.next_button().is_disabled())),
                ControlFocus::Dot(position) => {
                    let dot = &controller.dots()[position.index()];
                    if dot.is_active() {
                        (ACTIVE_DOT, TextStyle::default().fg_color(self.theme.accent))
                    } else {
                        (INACTIVE_DOT, TextStyle::default().fg_color(self.theme.dimmed))
                    }
                }
            };
            if region.control == focus {
                style = style.reverse();
            }
            self.print_at(text, style, region.start_column, region.row)?;
        }
        Ok(layout)
    }

    fn draw_footer(&mut self, controller: &SlideDeckController, focus: ControlFocus) -> RenderResult {
        let row = self.dimensions.rows.saturating_sub(1);
        let style = TextStyle::default().fg_color(self.theme.dimmed);
        // A focused dot announces where it leads.
        if let ControlFocus::Dot(position) = focus {
            if let Some(dot) = controller.dots().get(position.index()) {
                self.print_at(&dot.label(), style, 1, row)?;
            }
        }
        let text = format!("{} / {}", controller.current_position(), controller.total_slides());
        let column = self.dimensions.columns.saturating_sub((text.width() as u16).saturating_add(1));
        self.print_at(&text, style, column, row)
    }

    fn button_style(&self, disabled: bool) -> TextStyle {
        if disabled {
            TextStyle::default().dim().fg_color(self.theme.dimmed)
        } else {
            TextStyle::default().bold().fg_color(self.theme.foreground)
        }
    }

    fn controls_row(&self) -> u16 {
        self.dimensions.rows.saturating_sub(CONTROLS_FROM_BOTTOM)
    }

    fn centered_column(&self, width: usize) -> u16 {
        self.dimensions.columns.saturating_sub(width as u16) / 2
    }

    fn print_at(&mut self, content: &str, style: TextStyle, column: u16, row: u16) -> RenderResult {
        self.terminal.execute(&TerminalCommand::MoveTo { column, row })?;
        self.terminal.execute(&TerminalCommand::PrintText { content, style })?;
        Ok(())
    }
}
