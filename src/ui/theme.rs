use crate::storage::Settings;
use ratatui::{
    style::{Modifier, Style},
    widgets::{Gauge, Scrollbar},
};

/// Color the scrollbar thumb if the user picked a scrollbar color
pub fn apply_scrollbar_color<'a>(settings: &Settings, scrollbar: Scrollbar<'a>) -> Scrollbar<'a> {
    match settings.scrollbar_color {
        Some(color) => scrollbar.thumb_style(Style::default().fg(color.into())),
        None => scrollbar,
    }
}

/// Color the filled part of a progress gauge if the user picked one
pub fn apply_progress_bar_color<'a>(settings: &Settings, gauge: Gauge<'a>) -> Gauge<'a> {
    match settings.progress_bar_color {
        Some(color) => gauge.gauge_style(Style::default().fg(color.into())),
        None => gauge,
    }
}

/// Style for a menu entry drawn with the effective color scheme
pub fn menu_item_style(settings: &Settings, focused: bool) -> Style {
    let scheme = settings.color_scheme();
    let style = Style::default().fg(scheme.text.into());
    if focused {
        style.bg(scheme.base_focus.into()).add_modifier(Modifier::BOLD)
    } else {
        style.bg(scheme.base.into())
    }
}

pub fn background_style(settings: &Settings) -> Style {
    Style::default().bg(settings.color_scheme().background.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::language::FixedLocale;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::{style::Color, widgets::ScrollbarOrientation};

    fn settings() -> Settings {
        Settings::defaults(&FixedLocale::new("en-US"), &mut StdRng::seed_from_u64(1))
    }

    fn scrollbar() -> Scrollbar<'static> {
        Scrollbar::new(ScrollbarOrientation::VerticalRight)
    }

    #[test]
    fn test_unset_colors_are_noops() {
        let settings = settings();
        assert_eq!(apply_scrollbar_color(&settings, scrollbar()), scrollbar());
        assert_eq!(
            apply_progress_bar_color(&settings, Gauge::default()),
            Gauge::default()
        );
    }

    #[test]
    fn test_set_colors_are_applied() {
        let mut settings = settings();
        settings.scrollbar_color = Some(Rgba::new(1, 2, 3, 255));
        settings.progress_bar_color = Some(Rgba::new(4, 5, 6, 255));

        assert_eq!(
            apply_scrollbar_color(&settings, scrollbar()),
            scrollbar().thumb_style(Style::default().fg(Color::Rgb(1, 2, 3)))
        );
        assert_eq!(
            apply_progress_bar_color(&settings, Gauge::default()),
            Gauge::default().gauge_style(Style::default().fg(Color::Rgb(4, 5, 6)))
        );
    }

    #[test]
    fn test_menu_item_style_follows_scheme() {
        let settings = settings();
        let scheme = settings.color_scheme();
        assert_eq!(menu_item_style(&settings, false).bg, Some(Color::from(scheme.base)));
        assert_eq!(
            menu_item_style(&settings, true).bg,
            Some(Color::from(scheme.base_focus))
        );
        assert_eq!(background_style(&settings).bg, Some(Color::from(scheme.background)));
    }
}
