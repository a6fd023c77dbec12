use ratatui::style::{Color as RatatuiColor, Modifier, Style as RatatuiStyle};

/// RGB color. Construct with `Color::new(r, g, b)` or use the named constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const GRAY: Color = Color::new(128, 128, 128);
    pub const DARK_GRAY: Color = Color::new(100, 100, 100);
    pub const CYAN: Color = Color::new(0, 255, 255);
    pub const GOLD: Color = Color::new(255, 215, 0);
    pub const SKY_BLUE: Color = Color::new(135, 206, 235);
    pub const PINK: Color = Color::new(255, 105, 180);

    // Piano keys
    pub const IVORY: Color = Color::new(235, 230, 215);
    pub const KEY_SELECTED: Color = Color::new(60, 100, 180);

    // Status
    pub const OK: Color = Color::new(80, 220, 100);
    pub const WARN: Color = Color::new(255, 220, 80);
    pub const ERROR: Color = Color::new(255, 100, 100);
}

/// Text style with foreground, background, and attributes.
///
/// Builder methods (all const, chainable): `fg`, `bg`, `bold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
}

impl Style {
    pub const fn new() -> Self {
        Self { fg: None, bg: None, bold: false }
    }

    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// Style for a control that may be greyed out.
pub fn control_style(enabled: bool, fg: Color) -> Style {
    if enabled {
        Style::new().fg(fg).bold()
    } else {
        Style::new().fg(Color::DARK_GRAY)
    }
}

// --- Conversions to ratatui types ---

impl From<Color> for RatatuiColor {
    fn from(c: Color) -> Self {
        RatatuiColor::Rgb(c.r, c.g, c.b)
    }
}

impl From<Style> for RatatuiStyle {
    fn from(s: Style) -> Self {
        let mut rs = RatatuiStyle::default();
        if let Some(fg) = s.fg {
            rs = rs.fg(RatatuiColor::from(fg));
        }
        if let Some(bg) = s.bg {
            rs = rs.bg(RatatuiColor::from(bg));
        }
        if s.bold {
            rs = rs.add_modifier(Modifier::BOLD);
        }
        rs
    }
}
