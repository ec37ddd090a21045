use crate::constants::{
    EMPTY_CONDITION_DEFAULT, FALLBACK_CONDITION, FALLBACK_TEMPERATURE_C, FALLBACK_WIND,
};
use serde::Deserialize;
use serde_json::Value;

/// Current weather at the configured location.
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherReading {
    /// Degrees Celsius.
    pub temperature: f32,
    pub condition: String,
    pub wind: String,
}

impl WeatherReading {
    /// Stand-in used whenever the weather service cannot be reached or read.
    pub fn fallback() -> Self {
        Self {
            temperature: FALLBACK_TEMPERATURE_C,
            condition: FALLBACK_CONDITION.to_string(),
            wind: FALLBACK_WIND.to_string(),
        }
    }
}

impl Default for WeatherReading {
    fn default() -> Self {
        Self::fallback()
    }
}

#[derive(Deserialize)]
struct RawWeather {
    #[serde(default)]
    temperature: Option<Value>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    condition: Option<String>,
    #[serde(default)]
    wind: Option<String>,
}

/// Read a weather service body. Never fails: an unreadable body yields
/// [`WeatherReading::fallback`], and each unreadable field falls back on its
/// own.
pub fn parse_weather_payload(body: &str) -> WeatherReading {
    let raw: RawWeather = match serde_json::from_str(body) {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!("[weather] unreadable body, using fallback: {e}");
            return WeatherReading::fallback();
        }
    };

    let temperature = match raw.temperature {
        Some(Value::Number(n)) => n.as_f64().map(|v| v as f32),
        Some(Value::String(s)) => parse_temperature(&s),
        _ => None,
    }
    .filter(|t| t.is_finite())
    .unwrap_or(FALLBACK_TEMPERATURE_C);

    let condition = raw
        .description
        .or(raw.condition)
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| EMPTY_CONDITION_DEFAULT.to_string());

    let wind = raw
        .wind
        .map(|w| w.trim().to_string())
        .filter(|w| !w.is_empty())
        .unwrap_or_else(|| FALLBACK_WIND.to_string());

    WeatherReading {
        temperature,
        condition,
        wind,
    }
}

/// Leading numeric token of a string like `"+31 °C"`; integer part only.
pub fn parse_temperature(text: &str) -> Option<f32> {
    let t = text.trim_start();
    let (sign, rest) = match t.as_bytes().first() {
        Some(b'-') => (-1.0, &t[1..]),
        Some(b'+') => (1.0, &t[1..]),
        _ => (1.0, t),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<f32>().ok().map(|v| sign * v)
}

/// Clock hour at a location `offset_minutes` away from UTC, given the current
/// UTC time of day in minutes.
pub fn local_hour(utc_minutes_of_day: u32, offset_minutes: i32) -> u32 {
    let local = (utc_minutes_of_day as i64 + offset_minutes as i64).rem_euclid(24 * 60);
    (local / 60) as u32
}
