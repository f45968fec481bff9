use crate::{commands::focus::ControlFocus, deck::Position};
use unicode_width::UnicodeWidthStr;

pub(crate) const PREVIOUS_LABEL: &str = "‹ prev";
pub(crate) const NEXT_LABEL: &str = "next ›";
pub(crate) const ACTIVE_DOT: &str = "●";
pub(crate) const INACTIVE_DOT: &str = "○";
const BUTTON_SPACING: u16 = 3;
const DOT_SPACING: u16 = 1;

/// A rectangle of a single row that maps to a control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct HitRegion {
    pub(crate) row: u16,
    pub(crate) start_column: u16,
    pub(crate) end_column: u16,
    pub(crate) control: ControlFocus,
}

impl HitRegion {
    fn contains(&self, column: u16, row: u16) -> bool {
        self.row == row && column >= self.start_column && column < self.end_column
    }
}

/// Where every control in the control bar was drawn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ControlLayout {
    regions: Vec<HitRegion>,
}

impl ControlLayout {
    /// Lay out the control bar for a deck with the given number of slides, centered on a row.
    ///
    /// The bar looks like `‹ prev   ● ○ ○   next ›`.
    pub(crate) fn compute(total_slides: usize, row: u16, columns: u16) -> Self {
        let previous_width = PREVIOUS_LABEL.width() as u16;
        let next_width = NEXT_LABEL.width() as u16;
        let total_dots = u16::try_from(total_slides).unwrap_or(u16::MAX);
        let dots_width = total_dots.saturating_mul(DOT_SPACING + 1).saturating_sub(DOT_SPACING);
        let total_width = previous_width
            .saturating_add(BUTTON_SPACING)
            .saturating_add(dots_width)
            .saturating_add(BUTTON_SPACING)
            .saturating_add(next_width);
        let mut column = columns.saturating_sub(total_width) / 2;

        let mut regions = Vec::with_capacity(total_slides.saturating_add(2));
        regions.push(Self::region(row, column, previous_width, ControlFocus::Previous));
        column = column.saturating_add(previous_width).saturating_add(BUTTON_SPACING);
        for index in 0..total_slides {
            regions.push(Self::region(row, column, 1, ControlFocus::Dot(Position::from_index(index))));
            column = column.saturating_add(DOT_SPACING + 1);
        }
        column = column.saturating_sub(DOT_SPACING).saturating_add(BUTTON_SPACING);
        regions.push(Self::region(row, column, next_width, ControlFocus::Next));
        Self { regions }
    }

    fn region(row: u16, start_column: u16, width: u16, control: ControlFocus) -> HitRegion {
        HitRegion { row, start_column, end_column: start_column.saturating_add(width), control }
    }

    /// Find the control drawn at the given cell.
    pub(crate) fn control_at(&self, column: u16, row: u16) -> Option<ControlFocus> {
        self.regions.iter().find(|region| region.contains(column, row)).map(|region| region.control)
    }

    pub(crate) fn iter_regions(&self) -> impl Iterator<Item = &HitRegion> {
        self.regions.iter()
    }
}
