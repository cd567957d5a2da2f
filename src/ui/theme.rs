use ratatui::style::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub title: Color,
    pub weekday_header: Color,
    pub inactive_day: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub focus: Color,
    pub today: Color,
    pub loading: Color,
    pub meeting_title: Color,
    pub research_heading: Color,
    pub status_bar: Color,
    pub error: Color,
    pub success: Color,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            name: "default".to_string(),
            title: Color::Cyan,
            weekday_header: Color::Yellow,
            inactive_day: Color::DarkGray,
            selected_bg: Color::Blue,
            selected_fg: Color::White,
            focus: Color::Magenta,
            today: Color::Green,
            loading: Color::Yellow,
            meeting_title: Color::Cyan,
            research_heading: Color::Magenta,
            status_bar: Color::White,
            error: Color::Red,
            success: Color::Green,
        }
    }

    pub fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            title: Color::Rgb(251, 184, 108),
            weekday_header: Color::Rgb(254, 128, 25),
            inactive_day: Color::Rgb(146, 131, 116),
            selected_bg: Color::Rgb(60, 56, 54),
            selected_fg: Color::Rgb(235, 219, 178),
            focus: Color::Rgb(211, 134, 155),
            today: Color::Rgb(184, 187, 38),
            loading: Color::Rgb(250, 189, 47),
            meeting_title: Color::Rgb(142, 192, 124),
            research_heading: Color::Rgb(211, 134, 155),
            status_bar: Color::Rgb(235, 219, 178),
            error: Color::Rgb(251, 73, 52),
            success: Color::Rgb(184, 187, 38),
        }
    }

    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            title: Color::Rgb(136, 192, 208),
            weekday_header: Color::Rgb(235, 203, 139),
            inactive_day: Color::Rgb(76, 86, 106),
            selected_bg: Color::Rgb(59, 66, 82),
            selected_fg: Color::Rgb(236, 239, 244),
            focus: Color::Rgb(180, 142, 173),
            today: Color::Rgb(163, 190, 140),
            loading: Color::Rgb(235, 203, 139),
            meeting_title: Color::Rgb(129, 161, 193),
            research_heading: Color::Rgb(180, 142, 173),
            status_bar: Color::Rgb(216, 222, 233),
            error: Color::Rgb(191, 97, 106),
            success: Color::Rgb(163, 190, 140),
        }
    }

    pub fn get_by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "gruvbox" => Self::gruvbox(),
            "nord" => Self::nord(),
            _ => Self::default_theme(),
        }
    }

    pub fn available_themes() -> Vec<&'static str> {
        vec!["default", "gruvbox", "nord"]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
