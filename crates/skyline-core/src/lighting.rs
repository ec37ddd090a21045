use crate::constants::{
    DEFAULT_AMBIENT_HEX, DEFAULT_AMBIENT_INTENSITY, DEFAULT_DIRECTIONAL_HEX,
    DEFAULT_DIRECTIONAL_INTENSITY,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LightingError {
    #[error("malformed lighting payload: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be a finite, non-negative intensity (got {value})")]
    InvalidIntensity { field: &'static str, value: f32 },
    #[error("{field} has an invalid color component")]
    InvalidColor { field: &'static str },
}

/// Linear RGB color with components in 0..1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb(pub [f32; 3]);

impl Rgb {
    pub const WHITE: Rgb = Rgb([1.0, 1.0, 1.0]);

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self([r, g, b])
    }

    /// sRGB-encoded `0xRRGGBB` → linear components.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
        Self([channel(16), channel(8), channel(0)])
    }

    /// Nearest sRGB `0xRRGGBB`, components clamped to 0..1.
    pub fn to_hex(self) -> u32 {
        let q = |c: f32| (linear_to_srgb(c.clamp(0.0, 1.0)) * 255.0).round() as u32;
        (q(self.0[0]) << 16) | (q(self.0[1]) << 8) | q(self.0[2])
    }

    pub fn to_hex_string(self) -> String {
        format!("#{:06x}", self.to_hex())
    }

    pub fn mix(self, other: Rgb, t: f32) -> Rgb {
        let mut out = [0.0; 3];
        for (i, c) in out.iter_mut().enumerate() {
            *c = self.0[i] * (1.0 - t) + other.0[i] * t;
        }
        Rgb(out)
    }

    pub fn luminance(self) -> f32 {
        0.2126 * self.0[0] + 0.7152 * self.0[1] + 0.0722 * self.0[2]
    }

    /// Pull toward the color's own gray by `amount`.
    pub fn desaturate(self, amount: f32) -> Rgb {
        let l = self.luminance();
        self.mix(Rgb([l, l, l]), amount)
    }

    pub fn is_valid(self) -> bool {
        self.0.iter().all(|c| c.is_finite() && *c >= 0.0)
    }

    /// Parse `#rrggbb`, `#rgb`, `0xrrggbb` or bare hex digits.
    pub fn parse_hex_str(text: &str) -> Option<Rgb> {
        let t = text.trim();
        let digits = t
            .strip_prefix('#')
            .or_else(|| t.strip_prefix("0x"))
            .or_else(|| t.strip_prefix("0X"))
            .unwrap_or(t);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            6 => u32::from_str_radix(digits, 16).ok().map(Rgb::from_hex),
            3 => {
                let expanded: String = digits.chars().flat_map(|c| [c, c]).collect();
                u32::from_str_radix(&expanded, 16).ok().map(Rgb::from_hex)
            }
            _ => None,
        }
    }
}

/// sRGB transfer function, decoding direction.
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

pub fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

impl From<[f32; 3]> for Rgb {
    fn from(value: [f32; 3]) -> Self {
        Rgb(value)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RgbRepr {
    Text(String),
    Packed(u32),
    Triple([f32; 3]),
    Object { r: f32, g: f32, b: f32 },
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let triple = |c: [f32; 3]| {
            // Byte-scaled triples are sRGB, like hex; unit triples are linear.
            if c.iter().any(|v| *v > 1.0) {
                Rgb(c.map(|v| srgb_to_linear(v / 255.0)))
            } else {
                Rgb(c)
            }
        };
        match RgbRepr::deserialize(deserializer)? {
            RgbRepr::Text(s) => Rgb::parse_hex_str(&s)
                .ok_or_else(|| serde::de::Error::custom(format!("unrecognized color {s:?}"))),
            RgbRepr::Packed(hex) if hex <= 0xff_ffff => Ok(Rgb::from_hex(hex)),
            RgbRepr::Packed(hex) => Err(serde::de::Error::custom(format!(
                "packed color {hex:#x} out of range"
            ))),
            RgbRepr::Triple(c) => Ok(triple(c)),
            RgbRepr::Object { r, g, b } => Ok(triple([r, g, b])),
        }
    }
}

/// Global light state applied to the scene each frame. Always swapped whole.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightingSnapshot {
    pub ambient_color: Rgb,
    pub ambient_intensity: f32,
    pub directional_color: Rgb,
    pub directional_intensity: f32,
}

impl Default for LightingSnapshot {
    fn default() -> Self {
        Self {
            ambient_color: Rgb::from_hex(DEFAULT_AMBIENT_HEX),
            ambient_intensity: DEFAULT_AMBIENT_INTENSITY,
            directional_color: Rgb::from_hex(DEFAULT_DIRECTIONAL_HEX),
            directional_intensity: DEFAULT_DIRECTIONAL_INTENSITY,
        }
    }
}

impl LightingSnapshot {
    pub fn validate(&self) -> Result<(), LightingError> {
        let intensity = |field: &'static str, value: f32| {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(LightingError::InvalidIntensity { field, value })
            }
        };
        intensity("ambientIntensity", self.ambient_intensity)?;
        intensity("directionalIntensity", self.directional_intensity)?;
        if !self.ambient_color.is_valid() {
            return Err(LightingError::InvalidColor {
                field: "ambientColor",
            });
        }
        if !self.directional_color.is_valid() {
            return Err(LightingError::InvalidColor {
                field: "directionalColor",
            });
        }
        Ok(())
    }

    /// Parse and validate a serialized snapshot. Nothing partial comes out of
    /// this: either every field parsed and validated, or an error.
    pub fn from_json(text: &str) -> Result<Self, LightingError> {
        let snapshot: LightingSnapshot = serde_json::from_str(text)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn to_json(&self) -> Result<String, LightingError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Output contract of the lighting derivation call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightingReport {
    /// Degrees Celsius.
    pub temperature: f32,
    pub condition: String,
    pub lighting_description: String,
    /// Serialized [`LightingSnapshot`].
    pub updated_lighting_config: String,
}

impl LightingReport {
    pub fn from_json(text: &str) -> Result<Self, LightingError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn lighting(&self) -> Result<LightingSnapshot, LightingError> {
        LightingSnapshot::from_json(&self.updated_lighting_config)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeOfDay {
    Morning,
    Midday,
    Evening,
    Night,
}

impl TimeOfDay {
    /// Bucket a 24h clock hour (wrapped modulo 24).
    pub fn from_hour(hour: u32) -> Self {
        match hour % 24 {
            5..=10 => TimeOfDay::Morning,
            11..=16 => TimeOfDay::Midday,
            17..=19 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    fn base(self) -> LightingSnapshot {
        match self {
            // soft cool light
            TimeOfDay::Morning => LightingSnapshot {
                ambient_color: Rgb::from_hex(0x9fb4d6),
                ambient_intensity: 1.2,
                directional_color: Rgb::from_hex(0xdfe9ff),
                directional_intensity: 0.8,
            },
            // bright neutral
            TimeOfDay::Midday => LightingSnapshot {
                ambient_color: Rgb::from_hex(0xd8d8d8),
                ambient_intensity: 1.6,
                directional_color: Rgb::WHITE,
                directional_intensity: 1.4,
            },
            // warm golden, long shadows
            TimeOfDay::Evening => LightingSnapshot {
                ambient_color: Rgb::from_hex(0xb07050),
                ambient_intensity: 1.0,
                directional_color: Rgb::from_hex(0xffb347),
                directional_intensity: 1.1,
            },
            // low blue ambient, faint moonlight
            TimeOfDay::Night => LightingSnapshot {
                ambient_color: Rgb::from_hex(0x1a2a5a),
                ambient_intensity: 0.5,
                directional_color: Rgb::from_hex(0xaab8d8),
                directional_intensity: 0.2,
            },
        }
    }

    fn phrase(self) -> &'static str {
        match self {
            TimeOfDay::Morning => "Morning: soft, cool light spreads across the skyline",
            TimeOfDay::Midday => "Midday: bright, neutral sunlight washes over the towers",
            TimeOfDay::Evening => {
                "Evening: a warm golden glow with long shadows stretches between the towers"
            }
            TimeOfDay::Night => {
                "Night: low blue ambience and faint moonlight settle over the streets"
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkyCondition {
    Clear,
    Cloudy,
    Mist,
    Rain,
    Storm,
    Snow,
}

struct SkyModifier {
    directional: f32,
    ambient: f32,
    desaturate: f32,
    tint: Option<(Rgb, f32)>,
}

impl SkyCondition {
    /// Case-insensitive keyword match over a free-form description.
    pub fn classify(condition: &str) -> Self {
        let c = condition.to_ascii_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| c.contains(w));
        if has(&["thunder", "storm"]) {
            SkyCondition::Storm
        } else if has(&["rain", "drizzle", "shower"]) {
            SkyCondition::Rain
        } else if has(&["snow", "sleet", "hail"]) {
            SkyCondition::Snow
        } else if has(&["mist", "fog", "haze", "smoke", "dust"]) {
            SkyCondition::Mist
        } else if has(&["cloud", "overcast"]) {
            SkyCondition::Cloudy
        } else {
            SkyCondition::Clear
        }
    }

    fn modifier(self) -> SkyModifier {
        let cool = Rgb::from_hex(0x8fa6c8);
        match self {
            SkyCondition::Clear => SkyModifier {
                directional: 1.0,
                ambient: 1.0,
                desaturate: 0.0,
                tint: None,
            },
            SkyCondition::Cloudy => SkyModifier {
                directional: 0.6,
                ambient: 1.05,
                desaturate: 0.4,
                tint: None,
            },
            SkyCondition::Mist => SkyModifier {
                directional: 0.5,
                ambient: 1.15,
                desaturate: 0.5,
                tint: None,
            },
            SkyCondition::Rain => SkyModifier {
                directional: 0.4,
                ambient: 0.9,
                desaturate: 0.5,
                tint: Some((cool, 0.25)),
            },
            SkyCondition::Storm => SkyModifier {
                directional: 0.2,
                ambient: 0.75,
                desaturate: 0.6,
                tint: Some((cool, 0.35)),
            },
            SkyCondition::Snow => SkyModifier {
                directional: 0.5,
                ambient: 1.2,
                desaturate: 0.3,
                tint: Some((Rgb::from_hex(0xe8f0ff), 0.3)),
            },
        }
    }

    fn phrase(self) -> &'static str {
        match self {
            SkyCondition::Clear => "Clear skies leave the light unfiltered",
            SkyCondition::Cloudy => "Cloud cover flattens the light",
            SkyCondition::Mist => "Haze softens the distance",
            SkyCondition::Rain => "Rain dims the streets to a cool sheen",
            SkyCondition::Storm => "Storm clouds swallow most of the light",
            SkyCondition::Snow => "Snow brightens the shadows",
        }
    }
}

const WARM_TINT_HEX: u32 = 0xffd9b3;
const COLD_TINT_HEX: u32 = 0xcce6ff;

/// Pure derivation of the lighting report from weather and local hour.
pub fn derive_lighting(temperature_c: f32, condition: &str, hour: u32) -> LightingReport {
    let time = TimeOfDay::from_hour(hour);
    let sky = SkyCondition::classify(condition);
    let base = time.base();
    let m = sky.modifier();

    let mut ambient = base.ambient_color.desaturate(m.desaturate);
    let mut directional = base.directional_color.desaturate(m.desaturate);
    if let Some((tint, amount)) = m.tint {
        ambient = ambient.mix(tint, amount);
        directional = directional.mix(tint, amount);
    }
    if temperature_c >= 32.0 {
        ambient = ambient.mix(Rgb::from_hex(WARM_TINT_HEX), 0.1);
    } else if temperature_c <= 10.0 {
        ambient = ambient.mix(Rgb::from_hex(COLD_TINT_HEX), 0.1);
    }

    let snapshot = LightingSnapshot {
        ambient_color: ambient,
        ambient_intensity: (base.ambient_intensity * m.ambient).max(0.0),
        directional_color: directional,
        directional_intensity: (base.directional_intensity * m.directional).max(0.0),
    };
    // Floats are finite here, so serialization cannot fail; fall back to the
    // default payload rather than panic if it ever does.
    let updated_lighting_config = snapshot
        .to_json()
        .or_else(|_| LightingSnapshot::default().to_json())
        .unwrap_or_default();

    LightingReport {
        temperature: temperature_c,
        condition: condition.to_string(),
        lighting_description: format!(
            "{}. {}. {:.0}°C in the city.",
            time.phrase(),
            sky.phrase(),
            temperature_c
        ),
        updated_lighting_config,
    }
}
