use std::sync::OnceLock;

use ratatui::style::Color;

/// Brand accent, used for the header, selected tabs and user bubbles.
pub const BRAND_LIGHT_RGB: &str = "#3553D6";
pub const BRAND_DARK_RGB: &str = "#7C93FF";

/// "나쁜 습관" insight cards and over-budget deltas.
pub const ALERT_LIGHT_RGB: &str = "#C9352B";
pub const ALERT_DARK_RGB: &str = "#FF7A70";

/// "개선" insight cards and achieved goals.
pub const SUGGESTION_LIGHT_RGB: &str = "#1D8A5A";
pub const SUGGESTION_DARK_RGB: &str = "#5FD39A";

type Rgb = (u8, u8, u8);

#[derive(Clone, Copy)]
struct UiRgbConstants {
    brand: (Rgb, Rgb),
    alert: (Rgb, Rgb),
    suggestion: (Rgb, Rgb),
}

fn ui_rgb_constants() -> &'static UiRgbConstants {
    static CONSTANTS: OnceLock<UiRgbConstants> = OnceLock::new();
    CONSTANTS.get_or_init(|| UiRgbConstants {
        brand: (
            parse_const(BRAND_LIGHT_RGB, "BRAND_LIGHT_RGB"),
            parse_const(BRAND_DARK_RGB, "BRAND_DARK_RGB"),
        ),
        alert: (
            parse_const(ALERT_LIGHT_RGB, "ALERT_LIGHT_RGB"),
            parse_const(ALERT_DARK_RGB, "ALERT_DARK_RGB"),
        ),
        suggestion: (
            parse_const(SUGGESTION_LIGHT_RGB, "SUGGESTION_LIGHT_RGB"),
            parse_const(SUGGESTION_DARK_RGB, "SUGGESTION_DARK_RGB"),
        ),
    })
}

fn parse_const(value: &str, name: &str) -> Rgb {
    parse_hex_rgb(value).unwrap_or_else(|| panic!("{name} must be #RRGGBB: {value}"))
}

fn parse_hex_rgb(value: &str) -> Option<Rgb> {
    let value = value.strip_prefix('#').unwrap_or(value);
    if value.len() != 6 || !value.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&value[0..2], 16).ok()?;
    let g = u8::from_str_radix(&value[2..4], 16).ok()?;
    let b = u8::from_str_radix(&value[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Background brightness hint from `COLORFGBG` (`"fg;bg"`, ANSI indices). Indices 7 and 15
/// are the light greys/whites; anything else is treated as a dark background.
fn light_background_from_colorfgbg(value: &str) -> Option<bool> {
    let bg = value.rsplit(';').next()?.trim().parse::<u8>().ok()?;
    Some(matches!(bg, 7 | 15))
}

fn terminal_has_light_background() -> bool {
    static LIGHT: OnceLock<bool> = OnceLock::new();
    *LIGHT.get_or_init(|| {
        std::env::var("COLORFGBG")
            .ok()
            .and_then(|value| light_background_from_colorfgbg(&value))
            .unwrap_or(false)
    })
}

fn pick((light, dark): (Rgb, Rgb)) -> Color {
    let (r, g, b) = if terminal_has_light_background() {
        light
    } else {
        dark
    };
    Color::Rgb(r, g, b)
}

pub fn brand_color() -> Color {
    pick(ui_rgb_constants().brand)
}

pub fn alert_color() -> Color {
    pick(ui_rgb_constants().alert)
}

pub fn suggestion_color() -> Color {
    pick(ui_rgb_constants().suggestion)
}
