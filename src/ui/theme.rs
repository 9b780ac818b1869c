//! Phone color themes.

use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhoneTheme {
    /// Dark titanium chassis, near-black screen.
    #[default]
    Graphite,
    /// Deep blue chassis.
    Midnight,
    /// Terminal default colors only.
    Plain,
}

/// Resolved colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub chassis: Color,
    pub screen: Color,
    pub island: Color,
    pub text: Color,
    pub dim: Color,
    pub accent: Color,
    pub danger: Color,
    pub track: Color,
    pub button: Color,
    pub button_active: Color,
    pub copied: Color,
    /// False for `plain`: app tiles drop their brand colors.
    pub brand_colors: bool,
}

const GRAPHITE: Palette = Palette {
    chassis: Color::Rgb(72, 72, 78),
    screen: Color::Rgb(12, 12, 14),
    island: Color::Rgb(0, 0, 0),
    text: Color::Rgb(245, 245, 247),
    dim: Color::Rgb(142, 142, 147),
    accent: Color::Rgb(52, 199, 89),
    danger: Color::Rgb(255, 59, 48),
    track: Color::Rgb(44, 44, 46),
    button: Color::Rgb(58, 58, 60),
    button_active: Color::Rgb(235, 235, 240),
    copied: Color::Rgb(0x4a, 0xde, 0x80),
    brand_colors: true,
};

const MIDNIGHT: Palette = Palette {
    chassis: Color::Rgb(38, 52, 84),
    screen: Color::Rgb(8, 12, 24),
    island: Color::Rgb(0, 0, 0),
    text: Color::Rgb(230, 236, 255),
    dim: Color::Rgb(128, 140, 170),
    accent: Color::Rgb(48, 209, 88),
    danger: Color::Rgb(255, 69, 58),
    track: Color::Rgb(30, 38, 62),
    button: Color::Rgb(44, 54, 86),
    button_active: Color::Rgb(220, 228, 255),
    copied: Color::Rgb(0x4a, 0xde, 0x80),
    brand_colors: true,
};

const PLAIN: Palette = Palette {
    chassis: Color::Reset,
    screen: Color::Reset,
    island: Color::Reset,
    text: Color::Reset,
    dim: Color::Reset,
    accent: Color::Reset,
    danger: Color::Reset,
    track: Color::Reset,
    button: Color::Reset,
    button_active: Color::Reset,
    copied: Color::Reset,
    brand_colors: false,
};

impl PhoneTheme {
    pub const NAMES: [&'static str; 3] = ["graphite", "midnight", "plain"];

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "graphite" | "default" => Some(Self::Graphite),
            "midnight" | "blue" => Some(Self::Midnight),
            "plain" | "none" => Some(Self::Plain),
            _ => None,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Self::Graphite => GRAPHITE,
            Self::Midnight => MIDNIGHT,
            Self::Plain => PLAIN,
        }
    }
}

/// Mix `fg` toward `bg` as `opacity` drops to 0. Colors that are not RGB
/// cannot be mixed, so they switch over at half opacity instead.
pub fn fade(fg: Color, bg: Color, opacity: f32) -> Color {
    let opacity = opacity.clamp(0.0, 1.0);
    match (fg, bg) {
        (Color::Rgb(fr, fg_, fb), Color::Rgb(br, bg_, bb)) => {
            let mix = |f: u8, b: u8| -> u8 {
                (b as f32 + (f as f32 - b as f32) * opacity).round() as u8
            };
            Color::Rgb(mix(fr, br), mix(fg_, bg_), mix(fb, bb))
        }
        _ if opacity >= 0.5 => fg,
        _ => bg,
    }
}

pub fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}
