//! Color presets for exported reports.
//!
//! Each preset takes its accent from the chart template of the same name, so
//! the PDF matches the charts it embeds. Text stays dark on the white page for
//! every preset, including `dark`.

use reportly_render_core::Palette;
use reportly_types::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub display_name: &'static str,
    pub palette: Palette,
}

const BODY: Color = Color::gray(60);
const CAPTION: Color = Color::gray(80);
const RULE: Color = Color::gray(200);

impl Theme {
    pub const PROFESSIONAL: Theme = Theme {
        name: "professional",
        display_name: "Professional",
        palette: Palette {
            heading: Color::rgb(0x2C, 0x3E, 0x50),
            body: BODY,
            bullet: Color::rgb(0x2E, 0x4D, 0x8C),
            caption: CAPTION,
            rule: RULE,
        },
    };

    pub const VIBRANT: Theme = Theme {
        name: "vibrant",
        display_name: "Vibrant",
        palette: Palette {
            heading: Color::rgb(0xFF, 0x6B, 0x6B),
            body: BODY,
            bullet: Color::rgb(0x4E, 0xCD, 0xC4),
            caption: CAPTION,
            rule: Color::rgb(0x45, 0xB7, 0xD1),
        },
    };

    pub const MINIMAL: Theme = Theme {
        name: "minimal",
        display_name: "Minimal",
        palette: Palette {
            heading: Color::gray(0x33),
            body: BODY,
            bullet: Color::rgb(0xE7, 0x4C, 0x3C),
            caption: Color::gray(0x66),
            rule: Color::gray(0xCC),
        },
    };

    pub const DARK: Theme = Theme {
        name: "dark",
        display_name: "Dark Mode",
        palette: Palette {
            heading: Color::rgb(0x1A, 0x1A, 0x2E),
            body: BODY,
            bullet: Color::rgb(0x00, 0xD9, 0xFF),
            caption: CAPTION,
            rule: Color::rgb(0x00, 0xD9, 0xFF),
        },
    };

    pub fn presets() -> &'static [Theme] {
        &[Self::PROFESSIONAL, Self::VIBRANT, Self::MINIMAL, Self::DARK]
    }

    pub fn lookup(name: &str) -> Option<Theme> {
        let name = name.trim();
        Self::presets()
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
            .copied()
    }

    /// Like [`lookup`](Self::lookup), but unknown names fall back to the default preset.
    pub fn by_name(name: &str) -> Theme {
        Self::lookup(name).unwrap_or_else(|| {
            log::warn!("Unknown theme '{}', using '{}'", name, Self::PROFESSIONAL.name);
            Self::PROFESSIONAL
        })
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::PROFESSIONAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_presets_case_insensitively() {
        assert_eq!(Theme::lookup("Vibrant"), Some(Theme::VIBRANT));
        assert_eq!(Theme::lookup(" dark "), Some(Theme::DARK));
        assert_eq!(Theme::lookup("neon"), None);
    }

    #[test]
    fn unknown_names_fall_back_to_professional() {
        assert_eq!(Theme::by_name("neon"), Theme::PROFESSIONAL);
        assert_eq!(Theme::by_name(""), Theme::default());
    }

    #[test]
    fn preset_names_are_unique() {
        let presets = Theme::presets();
        for (i, a) in presets.iter().enumerate() {
            assert!(presets[i + 1..].iter().all(|b| b.name != a.name));
        }
    }
}
