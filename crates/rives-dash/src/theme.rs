//! Color themes for the RIVES Dashboard

use ratatui::style::Color;

#[derive(Clone)]
pub struct Theme {
    pub name: String,

    pub border: Color,
    pub title: Color,
    pub text: Color,
    pub label: Color,
    pub highlight: Color,

    pub success: Color,
    pub warning: Color,
    pub error: Color,

    pub active_tab: Color,
    pub inactive_tab: Color,

    /// Background of the selected leaderboard row
    pub selection: Color,
}

impl Theme {
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "dark" => Self::dark(),
            "light" => Self::light(),
            _ => Self::arcade(),
        }
    }

    /// Arcade theme (default): amber and magenta on black
    pub fn arcade() -> Self {
        Self {
            name: "arcade".to_string(),
            border: Color::Rgb(120, 40, 120),
            title: Color::Rgb(255, 191, 0),
            text: Color::Rgb(230, 230, 230),
            label: Color::Rgb(150, 150, 160),
            highlight: Color::Rgb(255, 64, 200),
            success: Color::Rgb(0, 230, 118),
            warning: Color::Rgb(255, 214, 0),
            error: Color::Rgb(255, 61, 61),
            active_tab: Color::Rgb(255, 191, 0),
            inactive_tab: Color::Rgb(120, 40, 120),
            selection: Color::Rgb(60, 20, 60),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            border: Color::Rgb(70, 70, 80),
            title: Color::Rgb(100, 200, 255),
            text: Color::Rgb(200, 200, 200),
            label: Color::Rgb(128, 128, 140),
            highlight: Color::Rgb(0, 191, 255),
            success: Color::Rgb(50, 205, 50),
            warning: Color::Rgb(255, 165, 0),
            error: Color::Rgb(255, 69, 0),
            active_tab: Color::Rgb(0, 191, 255),
            inactive_tab: Color::Rgb(100, 100, 110),
            selection: Color::Rgb(40, 40, 55),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            border: Color::Rgb(180, 180, 190),
            title: Color::Rgb(30, 30, 40),
            text: Color::Rgb(50, 50, 60),
            label: Color::Rgb(100, 100, 110),
            highlight: Color::Rgb(0, 120, 215),
            success: Color::Rgb(0, 128, 0),
            warning: Color::Rgb(200, 130, 0),
            error: Color::Rgb(200, 0, 0),
            active_tab: Color::Rgb(0, 120, 215),
            inactive_tab: Color::Rgb(140, 140, 150),
            selection: Color::Rgb(220, 230, 245),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::arcade()
    }
}
