// Relationships between tuning constants.

use skyline_core::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn section_thresholds_are_ordered() {
    assert!(INTRO_VISIBLE_BELOW > 0.0 && INTRO_VISIBLE_BELOW < 1.0);
    assert!(JOURNEY_FINISHED_ABOVE > 0.0 && JOURNEY_FINISHED_ABOVE < 1.0);
    assert!(INTRO_VISIBLE_BELOW < JOURNEY_FINISHED_ABOVE);
    assert!(PANEL_REVEAL_MARGIN >= 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn lit_glow_never_goes_dark() {
    assert!(GLOW_SMOOTHING_PER_FRAME > 0.0 && GLOW_SMOOTHING_PER_FRAME <= 1.0);
    assert!(GLOW_BASE - GLOW_PULSE_AMPLITUDE > 0.0);
    assert!(GLOW_PULSE_RATE > 0.0);
}

#[test]
fn glow_slots_match_the_shader() {
    assert_eq!(MAX_GLOW_SLOTS % 4, 0);
    let packed = format!("glow: array<vec4<f32>, {}>", MAX_GLOW_SLOTS / 4);
    assert!(CITY_WGSL.contains(&packed));
    assert!(CITY_WGSL.contains("fn vs_main"));
    assert!(CITY_WGSL.contains("fn fs_main"));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn city_constants_are_sane() {
    assert!((0.0..=1.0).contains(&WINDOW_LIT_PROBABILITY));
    assert!((0.0..=1.0).contains(&WINDOW_PRESENT_PROBABILITY));
    assert!(LANDMARK_CORE_SIZE[1] > LANDMARK_BODY_SIZE[1]);
    assert!(LANDMARK_CORE_SIZE[0] < LANDMARK_BODY_SIZE[0]);
    assert!(LANDMARK_CLEARANCE * 2.0 < CITY_EXTENT);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_and_weather_defaults() {
    assert!(CAMERA_FOV_WIDE_DEG < CAMERA_FOV_DEG);
    assert!(CAMERA_ZNEAR > 0.0 && CAMERA_ZNEAR < CAMERA_ZFAR);
    assert_eq!(FALLBACK_TEMPERATURE_C, 30.0);
    assert_eq!(FALLBACK_CONDITION, "Clear skies");
    assert_eq!(FALLBACK_WIND, "10 km/h");
    assert!(DEFAULT_WEATHER_URL.starts_with("https://"));
}
