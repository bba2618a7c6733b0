//! Pure display mappers: unit conversion, icon lookup, background palette.
//!
//! Everything here is a stateless function of its inputs; the view calls these
//! on every render.

const ICON_CDN: &str =
    "https://raw.githubusercontent.com/manifestinteractive/weather-underground-icons/master/animated";

/// Celsius to Fahrenheit, rounded to one decimal place for display.
/// Celsius values are shown unrounded, as received from the provider.
pub fn to_fahrenheit(celsius: f64) -> f64 {
    let f = celsius * 9.0 / 5.0 + 32.0;
    (f * 10.0).round() / 10.0
}

/// Map a provider icon code (e.g. "01d", "10n") to a semantic icon name.
/// Unrecognized codes fall back to "cloudy".
pub fn map_icon(code: &str) -> &'static str {
    match code {
        "01d" => "clear-day",
        "01n" => "clear-night",
        "02d" => "partly-cloudy-day",
        "02n" => "partly-cloudy-night",
        "03d" | "03n" => "cloudy",
        "04d" | "04n" => "overcast",
        "09d" | "09n" | "10d" | "10n" => "rain",
        "11d" | "11n" => "thunderstorms",
        "13d" | "13n" => "snow",
        "50d" | "50n" => "fog",
        _ => "cloudy",
    }
}

/// All provider icon codes the table recognizes.
pub const KNOWN_ICON_CODES: &[(&str, &str)] = &[
    ("01d", "clear-day"),
    ("01n", "clear-night"),
    ("02d", "partly-cloudy-day"),
    ("02n", "partly-cloudy-night"),
    ("03d", "cloudy"),
    ("03n", "cloudy"),
    ("04d", "overcast"),
    ("04n", "overcast"),
    ("09d", "rain"),
    ("09n", "rain"),
    ("10d", "rain"),
    ("10n", "rain"),
    ("11d", "thunderstorms"),
    ("11n", "thunderstorms"),
    ("13d", "snow"),
    ("13n", "snow"),
    ("50d", "fog"),
    ("50n", "fog"),
];

/// URL of the animated SVG asset for a provider icon code.
/// There is no local fallback if the CDN is unreachable.
pub fn icon_url(code: &str) -> String {
    format!("{ICON_CDN}/{}.svg", map_icon(code))
}

/// Background palette derived from the weather description and local hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Rain,
    Cloud,
    ClearDay,
    ClearNight,
    Snow,
    Default,
}

impl Palette {
    /// Gradient endpoints as RGB, top then bottom.
    pub fn gradient(self) -> ((u8, u8, u8), (u8, u8, u8)) {
        match self {
            Palette::Rain => ((0x38, 0xbd, 0xf8), (0x37, 0x41, 0x51)),
            Palette::Cloud => ((0xd1, 0xd5, 0xdb), (0x4b, 0x55, 0x63)),
            Palette::ClearDay => ((0xfe, 0xf9, 0xc3), (0x60, 0xa5, 0xfa)),
            Palette::ClearNight => ((0x6b, 0x21, 0xa8), (0x31, 0x2e, 0x81)),
            Palette::Snow => ((0xff, 0xff, 0xff), (0xdb, 0xea, 0xfe)),
            Palette::Default => ((0xbf, 0xdb, 0xfe), (0xa5, 0xb4, 0xfc)),
        }
    }
}

/// Select the background palette for a weather description at a local hour.
///
/// Substring match on the lowercased description, checked in fixed precedence:
/// rain, cloud, clear, snow, else default. Only "clear" consults the hour:
/// 6..=18 is day, anything else night. No description means no weather is
/// shown yet, which uses the default palette.
pub fn palette_for(description: Option<&str>, local_hour: u32) -> Palette {
    let Some(description) = description else {
        return Palette::Default;
    };
    let desc = description.to_lowercase();

    if desc.contains("rain") {
        Palette::Rain
    } else if desc.contains("cloud") {
        Palette::Cloud
    } else if desc.contains("clear") {
        if (6..=18).contains(&local_hour) {
            Palette::ClearDay
        } else {
            Palette::ClearNight
        }
    } else if desc.contains("snow") {
        Palette::Snow
    } else {
        Palette::Default
    }
}
