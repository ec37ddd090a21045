// Page contract and render tuning for the web frontend.

// DOM ids
pub const CANVAS_ID: &str = "city-canvas";
pub const JOURNEY_ID: &str = "journey";
pub const SECTIONS_ID: &str = "journey-sections";
pub const LOADER_ID: &str = "loader";
pub const LOADER_TEXT_ID: &str = "loader-text";
pub const TOAST_ID: &str = "toast";
pub const WEATHER_BADGE_ID: &str = "weather-badge";
pub const SCENE_CONFIG_ID: &str = "scene-config";

// CSS class toggled on overlay elements
pub const HIDDEN_CLASS: &str = "hidden";
pub const VISIBLE_CLASS: &str = "is-visible";

// Loader
pub const LOADER_MESSAGES: [&str; 4] = [
    "Initializing experience...",
    "Building cityscape...",
    "Adjusting cosmic radiation shields...",
    "Finalizing visuals...",
];
pub const LOADER_STEP_MS: u32 = 1500;

// Toast
pub const TOAST_VISIBLE_MS: u32 = 4000;
pub const WEATHER_TOAST_TEXT: &str = "Live weather unavailable, using default conditions";

// Scene lights that are not driven by the lighting snapshot. Colors are sRGB
// hex and linearized on upload.
pub const FOG_HEX: u32 = 0x121212;
pub const FOG_DENSITY: f32 = 0.007;
pub const SUN_POSITION: [f32; 3] = [50.0, 50.0, 25.0]; // directional light shines from here towards the origin
pub const POINT_LIGHTS: [PointLightDesc; 2] = [
    PointLightDesc {
        position: [-50.0, 20.0, -40.0],
        color_hex: 0xbf00ff,
        intensity: 5.0,
        range: 200.0,
    },
    PointLightDesc {
        position: [60.0, 25.0, 30.0],
        color_hex: 0x00bfff,
        intensity: 5.0,
        range: 200.0,
    },
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLightDesc {
    pub position: [f32; 3],
    pub color_hex: u32,
    pub intensity: f32,
    pub range: f32,
}
