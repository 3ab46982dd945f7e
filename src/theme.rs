// ABOUTME: Presentation-wide theme and transition names
// ABOUTME: Validated enumerations shared by the HTML and PPTX renderers

use crate::errors::{DeckError, Result};
use std::fmt;
use std::str::FromStr;

/// A reveal.js theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Black,
    White,
    League,
    Beige,
    Sky,
    Night,
    Serif,
    Simple,
    Solarized,
    Moon,
    Dracula,
    Blood,
}

/// Colors approximating a theme in formats without stylesheets.
/// Values are `RRGGBB` hex without the leading `#`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub text: &'static str,
    pub accent: &'static str,
}

impl Theme {
    pub const ALL: [Theme; 12] = [
        Theme::Black,
        Theme::White,
        Theme::League,
        Theme::Beige,
        Theme::Sky,
        Theme::Night,
        Theme::Serif,
        Theme::Simple,
        Theme::Solarized,
        Theme::Moon,
        Theme::Dracula,
        Theme::Blood,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Black => "black",
            Theme::White => "white",
            Theme::League => "league",
            Theme::Beige => "beige",
            Theme::Sky => "sky",
            Theme::Night => "night",
            Theme::Serif => "serif",
            Theme::Simple => "simple",
            Theme::Solarized => "solarized",
            Theme::Moon => "moon",
            Theme::Dracula => "dracula",
            Theme::Blood => "blood",
        }
    }

    pub fn palette(&self) -> Palette {
        let (background, text, accent) = match self {
            Theme::Black => ("191919", "FFFFFF", "42AFFA"),
            Theme::White => ("FFFFFF", "222222", "2A76DD"),
            Theme::League => ("1C1E20", "EEEEEE", "13DAEC"),
            Theme::Beige => ("F7F3DE", "333333", "8B743D"),
            Theme::Sky => ("F7FBFC", "333333", "3B759E"),
            Theme::Night => ("111111", "EEEEEE", "E7AD52"),
            Theme::Serif => ("F0F1EB", "000000", "51483D"),
            Theme::Simple => ("FFFFFF", "000000", "00008B"),
            Theme::Solarized => ("FDF6E3", "657B83", "268BD2"),
            Theme::Moon => ("002B36", "93A1A1", "268BD2"),
            Theme::Dracula => ("282A36", "F8F8F2", "BD93F9"),
            Theme::Blood => ("222222", "EEEEEE", "AA2233"),
        };
        Palette {
            background,
            text,
            accent,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        Theme::ALL
            .iter()
            .copied()
            .find(|theme| theme.as_str() == name)
            .ok_or_else(|| {
                DeckError::ConfigError(format!(
                    "unrecognized theme {:?}, expected one of: {}",
                    s,
                    Theme::ALL.map(|t| t.as_str()).join(", ")
                ))
            })
    }
}

/// A slide transition effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transition {
    None,
    #[default]
    Fade,
    Slide,
    Convex,
    Concave,
    Zoom,
}

impl Transition {
    pub const ALL: [Transition; 6] = [
        Transition::None,
        Transition::Fade,
        Transition::Slide,
        Transition::Convex,
        Transition::Concave,
        Transition::Zoom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Transition::None => "none",
            Transition::Fade => "fade",
            Transition::Slide => "slide",
            Transition::Convex => "convex",
            Transition::Concave => "concave",
            Transition::Zoom => "zoom",
        }
    }

    /// PresentationML transition element, if the effect has one.
    pub fn pptx_element(&self) -> Option<&'static str> {
        match self {
            Transition::None => None,
            Transition::Fade => Some("<p:fade/>"),
            Transition::Slide => Some(r#"<p:push dir="l"/>"#),
            Transition::Convex => Some(r#"<p:cover dir="l"/>"#),
            Transition::Concave => Some(r#"<p:pull dir="l"/>"#),
            Transition::Zoom => Some("<p:zoom/>"),
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Transition {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        Transition::ALL
            .iter()
            .copied()
            .find(|transition| transition.as_str() == name)
            .ok_or_else(|| {
                DeckError::ConfigError(format!(
                    "unrecognized transition {:?}, expected one of: {}",
                    s,
                    Transition::ALL.map(|t| t.as_str()).join(", ")
                ))
            })
    }
}
