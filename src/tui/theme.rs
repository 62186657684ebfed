use ratatui::style::{Color, Modifier, Style};

/// A theme defines the color scheme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // General UI colors
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub border: Color,
    pub border_focused: Color,

    // Table colors
    pub header_fg: Color,
    pub header_bg: Color,
    pub selected_fg: Color,
    pub selected_bg: Color,
    pub row_alt_bg: Color, // For zebra striping

    // Chart colors
    pub chart_line: Color,
    pub chart_overlay: Color,
    pub bar_colors: [Color; 3],
    pub heat_base: (u8, u8, u8),
    pub heat_neutral: Color,

    // Status/feedback colors
    pub delta_up: Color,
    pub delta_down: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub info: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Default dark theme
    pub fn dark() -> Self {
        Self {
            name: "Dark".to_string(),
            background: Color::Reset,
            foreground: Color::Gray,
            muted: Color::DarkGray,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            header_fg: Color::Cyan,
            header_bg: Color::Reset,
            selected_fg: Color::Black,
            selected_bg: Color::Cyan,
            row_alt_bg: Color::Rgb(25, 25, 35), // Slightly lighter than pure black
            chart_line: Color::Rgb(59, 165, 93),
            chart_overlay: Color::DarkGray,
            bar_colors: [
                Color::Rgb(31, 119, 180),
                Color::Rgb(255, 127, 14),
                Color::Rgb(44, 160, 44),
            ],
            heat_base: (59, 165, 93),
            heat_neutral: Color::Rgb(40, 40, 48),
            delta_up: Color::Green,
            delta_down: Color::Red,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,
            info: Color::Blue,
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            background: Color::White,
            foreground: Color::Black,
            muted: Color::Gray,
            border: Color::Gray,
            border_focused: Color::Blue,
            header_fg: Color::Blue,
            header_bg: Color::Rgb(240, 240, 240),
            selected_fg: Color::White,
            selected_bg: Color::Blue,
            row_alt_bg: Color::Rgb(250, 250, 250),
            chart_line: Color::Rgb(34, 120, 62),
            chart_overlay: Color::Gray,
            bar_colors: [
                Color::Rgb(31, 119, 180),
                Color::Rgb(200, 95, 0),
                Color::Rgb(34, 120, 62),
            ],
            heat_base: (34, 120, 62),
            heat_neutral: Color::Rgb(243, 244, 246),
            delta_up: Color::Green,
            delta_down: Color::Red,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Rgb(200, 150, 0), // Darker yellow for light bg
            info: Color::Blue,
        }
    }

    /// Resolve a theme by config/CLI name; unknown names get the dark theme
    pub fn by_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Heatmap cell color for an intensity in [0, 1]
    pub fn heat_color(&self, intensity: f64) -> Color {
        let clamped = intensity.clamp(0.0, 1.0);
        let (r, g, b) = self.heat_base;
        Color::Rgb(
            (r as f64 * clamped) as u8,
            (g as f64 * clamped) as u8,
            (b as f64 * clamped) as u8,
        )
    }

    /// Color for a signed delta value
    pub fn delta_style(&self, delta: f64) -> Style {
        if delta >= 0.0 {
            Style::default().fg(self.delta_up)
        } else {
            Style::default().fg(self.delta_down)
        }
    }

    /// Helper methods to get commonly used styles

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.header_fg)
            .bg(self.header_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.selected_fg)
            .bg(self.selected_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn normal_style(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn alt_row_style(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.row_alt_bg)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn focused_border_style(&self) -> Style {
        Style::default().fg(self.border_focused)
    }

    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn info_style(&self) -> Style {
        Style::default().fg(self.info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme() {
        let theme = Theme::default();
        assert_eq!(theme.name, "Dark");

        // Should have valid colors
        assert_ne!(theme.header_fg, Color::Reset);
        assert_ne!(theme.selected_bg, Color::Reset);
    }

    #[test]
    fn test_light_theme() {
        let theme = Theme::light();
        assert_eq!(theme.name, "Light");

        // Light theme should have different background
        assert_eq!(theme.background, Color::White);
        assert_eq!(theme.foreground, Color::Black);
    }

    #[test]
    fn test_by_name_falls_back_to_dark() {
        assert_eq!(Theme::by_name("light").name, "Light");
        assert_eq!(Theme::by_name("LIGHT").name, "Light");
        assert_eq!(Theme::by_name("solarized").name, "Dark");
    }

    #[test]
    fn test_heat_color_scales_with_intensity() {
        let theme = Theme::dark();
        assert_eq!(theme.heat_color(0.0), Color::Rgb(0, 0, 0));
        assert_eq!(theme.heat_color(1.0), Color::Rgb(59, 165, 93));
        // Out-of-range intensities clamp instead of wrapping
        assert_eq!(theme.heat_color(2.0), theme.heat_color(1.0));
    }

    #[test]
    fn test_style_helpers() {
        let theme = Theme::default();

        // Header should be bold
        let header = theme.header_style();
        assert!(header.add_modifier.contains(Modifier::BOLD));

        // Selected should have distinct colors
        let selected = theme.selected_style();
        assert_eq!(selected.fg, Some(theme.selected_fg));
        assert_eq!(selected.bg, Some(theme.selected_bg));
    }

    #[test]
    fn test_delta_styles() {
        let theme = Theme::dark();
        assert_eq!(theme.delta_style(1.2).fg, Some(theme.delta_up));
        assert_eq!(theme.delta_style(0.0).fg, Some(theme.delta_up));
        assert_eq!(theme.delta_style(-0.4).fg, Some(theme.delta_down));
    }
}
