use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub dim: Color,
    pub border: Color,
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub error: Color,
}

impl Theme {
    /// Palette picked by the dark mode setting.
    pub fn for_mode(dark: bool) -> Self {
        if dark { Self::dark() } else { Self::light() }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(8, 12, 16),
            surface: Color::Rgb(20, 26, 32),
            text: Color::Rgb(220, 220, 220),
            dim: Color::Rgb(140, 140, 140),
            border: Color::Rgb(60, 70, 80),
            accent: Color::Rgb(80, 160, 160),
            positive: Color::Rgb(90, 180, 110),
            negative: Color::Rgb(210, 100, 90),
            warning: Color::Rgb(220, 170, 60),
            error: Color::Rgb(200, 80, 80),
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::Rgb(245, 245, 242),
            surface: Color::Rgb(255, 255, 255),
            text: Color::Rgb(30, 30, 30),
            dim: Color::Rgb(110, 110, 110),
            border: Color::Rgb(190, 190, 190),
            accent: Color::Rgb(25, 118, 210),
            positive: Color::Rgb(46, 125, 50),
            negative: Color::Rgb(198, 40, 40),
            warning: Color::Rgb(237, 108, 2),
            error: Color::Rgb(211, 47, 47),
        }
    }
}
