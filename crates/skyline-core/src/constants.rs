// Shared tuning constants for the scroll journey, used by the web frontend
// and by the pure logic in this crate.

// Section resolution
pub const INTRO_VISIBLE_BELOW: f32 = 0.05; // intro copy fades out well before its band ends
pub const JOURNEY_FINISHED_ABOVE: f32 = 0.95; // every landmark glows past this point
pub const PANEL_REVEAL_MARGIN: f32 = 0.0; // in band widths, applied on both sides of a panel band

// Glow animation
pub const GLOW_SMOOTHING_PER_FRAME: f32 = 0.1; // lerp factor, applied once per rendered frame
pub const GLOW_BASE: f32 = 1.5; // centre of the lit pulse
pub const GLOW_PULSE_AMPLITUDE: f32 = 0.5;
pub const GLOW_PULSE_RATE: f32 = 3.0; // radians per second
pub const MAX_GLOW_SLOTS: usize = 16; // matches the uniform array in city.wgsl

// Lighting fallback snapshot
pub const DEFAULT_AMBIENT_HEX: u32 = 0x808080; // neutral gray
pub const DEFAULT_AMBIENT_INTENSITY: f32 = 2.0;
pub const DEFAULT_DIRECTIONAL_HEX: u32 = 0xffffff;
pub const DEFAULT_DIRECTIONAL_INTENSITY: f32 = 1.0;

// Weather fallback tuple
pub const FALLBACK_TEMPERATURE_C: f32 = 30.0;
pub const FALLBACK_CONDITION: &str = "Clear skies";
pub const FALLBACK_WIND: &str = "10 km/h";
pub const EMPTY_CONDITION_DEFAULT: &str = "Clear";
pub const DEFAULT_WEATHER_URL: &str = "https://goweather.herokuapp.com/weather/Mumbai";
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 330; // Mumbai, UTC+05:30

// City layout
pub const CITY_EXTENT: f32 = 300.0; // side length of the square ground plane
pub const FILLER_CANDIDATES: usize = 300;
pub const LANDMARK_CLEARANCE: f32 = 20.0; // fillers closer than this (XZ) to a landmark are skipped
pub const LANDMARK_BODY_SIZE: [f32; 3] = [14.0, 60.0, 14.0];
pub const LANDMARK_CORE_SIZE: [f32; 3] = [4.0, 65.0, 4.0];
pub const LANDMARK_BODY_HEX: u32 = 0x2a2a3a;
pub const LANDMARK_CORE_HEX: u32 = 0xbf00ff;
pub const FILLER_BODY_HEX: u32 = 0x1a1a2a;
pub const WINDOW_FRAME_HEX: u32 = 0x222233;
pub const WINDOW_GLOW_HEX: u32 = 0xffff00;
pub const WINDOW_LIT_PROBABILITY: f64 = 0.7;
pub const WINDOW_PRESENT_PROBABILITY: f64 = 0.8;
pub const GROUND_HEX: u32 = 0x080808;

// Camera
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_FOV_WIDE_DEG: f32 = 70.0; // wide screens feel empty at 75°
pub const WIDE_ASPECT_THRESHOLD: f32 = 1.8;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
