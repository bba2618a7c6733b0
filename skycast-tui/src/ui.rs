//! Stateless rendering of [`UiState`] into ratatui widgets.

use chrono::{Local, Timelike};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use skycast_core::display;
use skycast_core::model::WeatherReport;
use skycast_core::state::{FetchState, TemperatureUnit, Theme, UiState};

pub fn render(frame: &mut Frame, state: &UiState) {
    let area = frame.size();

    frame.render_widget(
        Block::default().style(Style::default().bg(background(state))),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(7),
            Constraint::Length(1),
        ])
        .split(area);

    let fg = text_color(state.theme);

    let title = Line::from(vec![
        Span::styled("skycast", Style::default().fg(fg).add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("  {} · {}", theme_label(state.theme), state.unit.symbol()),
            Style::default().fg(fg),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), chunks[0]);

    let input = Paragraph::new(state.city_input.as_str())
        .style(Style::default().fg(fg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("City")
                .border_style(Style::default().fg(fg)),
        );
    frame.render_widget(input, chunks[1]);
    frame.set_cursor(
        cursor_x(chunks[1], state.city_input.chars().count()),
        chunks[1].y + 1,
    );

    let body = match &state.fetch {
        FetchState::Idle => {
            Paragraph::new("Type a city and press Enter").style(Style::default().fg(fg))
        }
        FetchState::Loading { .. } => {
            Paragraph::new("Loading...").style(Style::default().fg(Color::DarkGray))
        }
        FetchState::Failed(message) => {
            Paragraph::new(message.as_str()).style(Style::default().fg(Color::Red))
        }
        FetchState::Ready(report) => {
            let lines = vec![
                Line::from(Span::styled(
                    format!("{}, {}", report.city, report.country),
                    Style::default().fg(fg).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format_temperature(state, report),
                    Style::default().fg(fg).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    capitalize(&report.description),
                    Style::default().fg(fg),
                )),
                Line::from(Span::styled(
                    format!("{} {}", glyph(&report.icon), display::map_icon(&report.icon)),
                    Style::default().fg(fg),
                )),
                Line::from(Span::styled(
                    display::icon_url(&report.icon),
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(Span::styled(
                    format!("Humidity: {}%", report.humidity_pct),
                    Style::default().fg(fg),
                )),
            ];
            Paragraph::new(lines)
        }
    };
    frame.render_widget(body.alignment(Alignment::Center), chunks[2]);

    let help = Paragraph::new("Enter fetch · Ctrl-L locate · Ctrl-U unit · Ctrl-T theme · Esc quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);
}

/// Fahrenheit is rounded to one decimal for display; Celsius shows the
/// provider value unrounded.
fn format_temperature(state: &UiState, report: &WeatherReport) -> String {
    let value = state.display_temperature(report);
    match state.unit {
        TemperatureUnit::Fahrenheit => format!("{value:.1}{}", state.unit.symbol()),
        TemperatureUnit::Celsius => format!("{value}{}", state.unit.symbol()),
    }
}

/// Cursor column for the input box, clamped inside its borders so a long
/// city name cannot push the cursor past the frame edge.
fn cursor_x(area: Rect, input_chars: usize) -> u16 {
    let offset = u16::try_from(input_chars).unwrap_or(u16::MAX);
    area.x
        .saturating_add(1)
        .saturating_add(offset)
        .min(area.right().saturating_sub(2))
}

/// Dark theme pins a fixed dark background; the light theme takes the top
/// stop of the palette gradient for the current description and local hour.
fn background(state: &UiState) -> Color {
    match state.theme {
        Theme::Dark => Color::Rgb(0x11, 0x18, 0x27),
        Theme::Light => {
            let description = state.weather().map(|w| w.description.as_str());
            let palette = display::palette_for(description, Local::now().hour());
            let ((r, g, b), _) = palette.gradient();
            Color::Rgb(r, g, b)
        }
    }
}

fn text_color(theme: Theme) -> Color {
    match theme {
        Theme::Dark => Color::White,
        Theme::Light => Color::Black,
    }
}

fn theme_label(theme: Theme) -> &'static str {
    match theme {
        Theme::Dark => "dark",
        Theme::Light => "light",
    }
}

/// Terminal stand-in for the animated SVG the icon CDN serves.
fn glyph(icon_code: &str) -> &'static str {
    match display::map_icon(icon_code) {
        "clear-day" => "☀",
        "clear-night" => "🌙",
        "partly-cloudy-day" | "partly-cloudy-night" => "⛅",
        "overcast" => "🌥",
        "rain" => "🌧",
        "thunderstorms" => "⛈",
        "snow" => "❄",
        "fog" => "🌫",
        _ => "☁",
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_at(temperature_c: f64) -> WeatherReport {
        WeatherReport {
            city: "Paris".to_string(),
            country: "FR".to_string(),
            temperature_c,
            description: "clear sky".to_string(),
            humidity_pct: 40,
            icon: "01d".to_string(),
        }
    }

    #[test]
    fn fahrenheit_always_shows_one_decimal() {
        let mut state = UiState::new();
        state.unit = TemperatureUnit::Fahrenheit;

        assert_eq!(format_temperature(&state, &report_at(20.0)), "68.0°F");
        assert_eq!(format_temperature(&state, &report_at(21.34)), "70.4°F");
    }

    #[test]
    fn celsius_shows_the_provider_value_unrounded() {
        let state = UiState::new();

        assert_eq!(format_temperature(&state, &report_at(20.0)), "20°C");
        assert_eq!(format_temperature(&state, &report_at(21.34)), "21.34°C");
    }

    #[test]
    fn cursor_stays_inside_the_input_box() {
        let area = Rect::new(0, 0, 20, 3);

        assert_eq!(cursor_x(area, 0), 1);
        assert_eq!(cursor_x(area, 5), 6);
        // right() is 20; the border column is 19, so the cursor caps at 18.
        assert_eq!(cursor_x(area, 100), 18);
        assert_eq!(cursor_x(area, usize::MAX), 18);
    }

    #[test]
    fn capitalize_first_letter_only() {
        assert_eq!(capitalize("clear sky"), "Clear sky");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("überkästig"), "Überkästig");
    }

    #[test]
    fn every_semantic_icon_has_a_glyph() {
        for (code, _) in skycast_core::display::KNOWN_ICON_CODES {
            assert!(!glyph(code).is_empty());
        }
        assert_eq!(glyph("99x"), "☁");
    }
}
