//! Display Settings
//!
//! The light/dark preference lives in application state and is handed to the
//! renderer with every view request. It resets to the configured theme on restart.

use serde::{Deserialize, Serialize};

/// Colors assigned to ranking slices, cycled by position
pub const SLICE_PALETTE: [&str; 10] = [
    "#8884d8", "#82ca9d", "#ffc658", "#ff8042", "#8dd1e1", "#d0ed57", "#a4de6c", "#d4a6a6",
    "#a28bfc", "#6f8aff",
];

/// Stroke/fill for the series and bar charts
pub const SERIES_COLOR: &str = "#8884d8";

/// Color of the slice at `index`
pub fn slice_color(index: usize) -> &'static str {
    SLICE_PALETTE[index % SLICE_PALETTE.len()]
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Tooltip colors for this theme
    pub fn style(self) -> ThemeStyle {
        match self {
            Self::Dark => ThemeStyle {
                tooltip_background: "rgba(36, 28, 28, 0.75)",
                tooltip_text: "#ffffff",
            },
            Self::Light => ThemeStyle {
                tooltip_background: "rgba(255, 255, 255, 0.75)",
                tooltip_text: "#000000",
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemeStyle {
    pub tooltip_background: &'static str,
    pub tooltip_text: &'static str,
}

/// Display state passed to the rendering side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplaySettings {
    theme: Theme,
}

impl DisplaySettings {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flip light/dark, returning the new theme
    pub fn toggle(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Serializable form including derived style and palette
    pub fn describe(&self) -> DisplayDescription {
        DisplayDescription {
            theme: self.theme,
            style: self.theme.style(),
            series_color: SERIES_COLOR,
            palette: &SLICE_PALETTE,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DisplayDescription {
    pub theme: Theme,
    pub style: ThemeStyle,
    pub series_color: &'static str,
    pub palette: &'static [&'static str],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trip() {
        let mut display = DisplaySettings::default();
        assert_eq!(display.theme(), Theme::Dark);
        assert_eq!(display.toggle(), Theme::Light);
        assert_eq!(display.toggle(), Theme::Dark);
    }

    #[test]
    fn test_style_follows_theme() {
        assert_eq!(Theme::Dark.style().tooltip_text, "#ffffff");
        assert_eq!(Theme::Light.style().tooltip_background, "rgba(255, 255, 255, 0.75)");
    }

    #[test]
    fn test_slice_color_cycles() {
        assert_eq!(slice_color(0), "#8884d8");
        assert_eq!(slice_color(9), "#6f8aff");
        assert_eq!(slice_color(10), slice_color(0));
    }

    #[test]
    fn test_description_json() {
        let json = serde_json::to_value(DisplaySettings::new(Theme::Light).describe()).unwrap();
        assert_eq!(json["theme"], "light");
        assert_eq!(json["palette"].as_array().unwrap().len(), 10);
    }
}
