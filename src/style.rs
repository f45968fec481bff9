use crossterm::style::{Attribute, ContentStyle, StyledContent};
use hex::{FromHex, FromHexError};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::{
    fmt::{self, Display},
    str::FromStr,
};

/// The style of a piece of text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextStyle {
    flags: u8,
    pub(crate) colors: Colors,
}

impl TextStyle {
    /// Add bold to this style.
    pub(crate) fn bold(mut self) -> Self {
        self.flags |= TextFormatFlags::Bold as u8;
        self
    }

    /// Render this text dimmed.
    pub(crate) fn dim(mut self) -> Self {
        self.flags |= TextFormatFlags::Dim as u8;
        self
    }

    /// Swap the foreground and background colors.
    pub(crate) fn reverse(mut self) -> Self {
        self.flags |= TextFormatFlags::Reverse as u8;
        self
    }

    /// Set the foreground color for this text style.
    pub(crate) fn fg_color(mut self, color: Color) -> Self {
        self.colors.foreground = Some(color);
        self
    }

    /// Check whether this text style is bold.
    pub(crate) fn is_bold(&self) -> bool {
        self.flags & TextFormatFlags::Bold as u8 != 0
    }

    /// Check whether this text style is dimmed.
    pub(crate) fn is_dim(&self) -> bool {
        self.flags & TextFormatFlags::Dim as u8 != 0
    }

    /// Check whether this text style is reversed.
    pub(crate) fn is_reverse(&self) -> bool {
        self.flags & TextFormatFlags::Reverse as u8 != 0
    }

    /// Apply this style to a piece of text.
    pub(crate) fn apply<T: Display>(&self, text: T) -> StyledContent<T> {
        let mut style = ContentStyle::new();
        style.foreground_color = self.colors.foreground.map(Into::into);
        style.background_color = self.colors.background.map(Into::into);
        if self.is_bold() {
            style.attributes.set(Attribute::Bold);
        }
        if self.is_dim() {
            style.attributes.set(Attribute::Dim);
        }
        if self.is_reverse() {
            style.attributes.set(Attribute::Reverse);
        }
        StyledContent::new(style, text)
    }
}

#[derive(Debug)]
enum TextFormatFlags {
    Bold = 1,
    Dim = 2,
    Reverse = 4,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, SerializeDisplay, DeserializeFromStr)]
pub struct Color(crossterm::style::Color);

impl Color {
    pub(crate) fn new(r: u8, g: u8, b: u8) -> Self {
        Self(crossterm::style::Color::Rgb { r, g, b })
    }

    pub(crate) fn as_rgb(&self) -> Option<(u8, u8, u8)> {
        match self.0 {
            crossterm::style::Color::Rgb { r, g, b } => Some((r, g, b)),
            _ => None,
        }
    }

    /// Blend this color towards `target`.
    ///
    /// `ratio` 0 yields `self`, 1 yields `target`. Only rgb colors can be blended: anything else
    /// snaps to whichever end is closer.
    pub(crate) fn blend(&self, target: Color, ratio: f64) -> Color {
        let ratio = ratio.clamp(0.0, 1.0);
        match (self.as_rgb(), target.as_rgb()) {
            (Some((r1, g1, b1)), Some((r2, g2, b2))) => {
                let mix = |from: u8, to: u8| (from as f64 + (to as f64 - from as f64) * ratio).round() as u8;
                Color::new(mix(r1, r2), mix(g1, g2), mix(b1, b2))
            }
            _ if ratio >= 0.5 => target,
            _ => *self,
        }
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        use crossterm::style::Color as C;
        let output = match input {
            "black" => Self(C::Black),
            "white" => Self(C::White),
            "grey" => Self(C::Grey),
            "dark_grey" => Self(C::DarkGrey),
            "red" => Self(C::Red),
            "dark_red" => Self(C::DarkRed),
            "green" => Self(C::Green),
            "dark_green" => Self(C::DarkGreen),
            "blue" => Self(C::Blue),
            "dark_blue" => Self(C::DarkBlue),
            "yellow" => Self(C::Yellow),
            "dark_yellow" => Self(C::DarkYellow),
            "magenta" => Self(C::Magenta),
            "dark_magenta" => Self(C::DarkMagenta),
            "cyan" => Self(C::Cyan),
            "dark_cyan" => Self(C::DarkCyan),
            // Fallback to hex-encoded rgb
            _ => {
                let values = <[u8; 3]>::from_hex(input.trim_start_matches('#'))?;
                Self(C::Rgb { r: values[0], g: values[1], b: values[2] })
            }
        };
        Ok(output)
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use crossterm::style::Color as C;
        match self.0 {
            C::Rgb { r, g, b } => write!(f, "{}", hex::encode([r, g, b])),
            C::Black => write!(f, "black"),
            C::White => write!(f, "white"),
            C::Grey => write!(f, "grey"),
            C::DarkGrey => write!(f, "dark_grey"),
            C::Red => write!(f, "red"),
            C::DarkRed => write!(f, "dark_red"),
            C::Green => write!(f, "green"),
            C::DarkGreen => write!(f, "dark_green"),
            C::Blue => write!(f, "blue"),
            C::DarkBlue => write!(f, "dark_blue"),
            C::Yellow => write!(f, "yellow"),
            C::DarkYellow => write!(f, "dark_yellow"),
            C::Magenta => write!(f, "magenta"),
            C::DarkMagenta => write!(f, "dark_magenta"),
            C::Cyan => write!(f, "cyan"),
            C::DarkCyan => write!(f, "dark_cyan"),
            other => write!(f, "{other:?}"),
        }
    }
}

impl From<Color> for crossterm::style::Color {
    fn from(value: Color) -> Self {
        value.0
    }
}

/// Text colors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Colors {
    /// The background color.
    pub(crate) background: Option<Color>,

    /// The foreground color.
    pub(crate) foreground: Option<Color>,
}

#[derive(Debug, thiserror::Error)]
#[error("invalid color: {0}")]
pub struct ParseColorError(#[from] FromHexError);
