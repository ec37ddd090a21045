// Scene configuration loading and fail-fast validation.

use skyline_core::*;

const MINIMAL: &str = r#"{
    "headline": "Hello",
    "items": [
        {"title": "A", "description": "first", "position": [-40, 0, -50]}
    ],
    "waypoints": [
        {"position": [0, 80, 100], "target": [0, 20, 0]},
        {"position": [0, 10, 60], "target": [0, 10, 0]}
    ]
}"#;

fn with_items(n: usize) -> String {
    let items: Vec<String> = (0..n)
        .map(|i| format!(r#"{{"title":"T{i}","description":"d","position":[{i},0,0]}}"#))
        .collect();
    format!(
        r#"{{"headline":"h","items":[{}],"waypoints":[
            {{"position":[0,0,0],"target":[0,0,1]}},
            {{"position":[1,0,0],"target":[0,0,1]}}]}}"#,
        items.join(",")
    )
}

#[test]
fn builtin_default_is_valid() {
    let config = SceneConfig::default();
    config.validate().unwrap();
    let layout = config.section_layout().unwrap();
    assert_eq!(layout.lead_panels(), 2);
    assert_eq!(layout.content_count(), 2);
    assert_eq!(layout.band_count(), 6);
    assert_eq!(config.camera_path().unwrap().len(), 10);
    assert_eq!(config.landmark_anchors().len(), config.items.len());
}

#[test]
fn minimal_json_fills_in_defaults() {
    let config = SceneConfig::from_json(MINIMAL).unwrap();
    assert_eq!(config.headline, "Hello");
    assert!(config.tagline.is_empty());
    assert!(config.panels.is_empty());
    assert!(config.contact.is_empty());
    assert_eq!(config.items[0].position, glam::Vec3::new(-40.0, 0.0, -50.0));
    assert_eq!(config.lighting, LightingSource::default());
    assert_eq!(config.lighting.weather_url, DEFAULT_WEATHER_URL);
    assert_eq!(config.reveal_margin, 0.0);
    assert_eq!(config.city_seed, 0);
    assert_eq!(config.section_layout().unwrap().band_count(), 3);
}

#[test]
fn lighting_source_uses_camel_case() {
    let text = MINIMAL.replacen(
        "\"headline\": \"Hello\",",
        r#""headline": "Hello", "lighting": {"reportUrl": "/api/lighting", "utcOffsetMinutes": -300},"#,
        1,
    );
    let config = SceneConfig::from_json(&text).unwrap();
    assert_eq!(config.lighting.report_url.as_deref(), Some("/api/lighting"));
    assert_eq!(config.lighting.utc_offset_minutes, -300);
    assert_eq!(config.lighting.weather_url, DEFAULT_WEATHER_URL);
}

#[test]
fn single_waypoint_fails_fast() {
    let text = r#"{"headline":"h","items":[{"title":"a","description":"b","position":[0,0,0]}],
        "waypoints":[{"position":[0,0,0],"target":[0,0,1]}]}"#;
    assert!(matches!(
        SceneConfig::from_json(text),
        Err(ConfigError::TooFewWaypoints(1))
    ));
}

#[test]
fn item_count_is_bounded() {
    assert!(matches!(
        SceneConfig::from_json(&with_items(0)),
        Err(ConfigError::NoContentItems)
    ));
    assert!(SceneConfig::from_json(&with_items(1)).is_ok());
    assert!(SceneConfig::from_json(&with_items(MAX_GLOW_SLOTS)).is_ok());
    assert!(matches!(
        SceneConfig::from_json(&with_items(MAX_GLOW_SLOTS + 1)),
        Err(ConfigError::TooManyContentItems { count: 17, max: 16 })
    ));
}

#[test]
fn negative_reveal_margin_is_rejected() {
    let mut config = SceneConfig::default();
    config.reveal_margin = -1.0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidThreshold {
            name: "panel_reveal_margin",
            ..
        })
    ));
}

#[test]
fn malformed_json_is_a_parse_error() {
    assert!(matches!(
        SceneConfig::from_json("{\"headline\": 3"),
        Err(ConfigError::Parse(_))
    ));
    // waypoints must be three-component vectors
    let text = MINIMAL.replace("[0, 80, 100]", "[0, 80]");
    assert!(matches!(
        SceneConfig::from_json(&text),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn default_survives_serialization() {
    let config = SceneConfig::default();
    let text = serde_json::to_string(&config).unwrap();
    assert!(text.contains("\"citySeed\""));
    assert!(text.contains("\"utcOffsetMinutes\""));
    assert_eq!(SceneConfig::from_json(&text).unwrap(), config);
}
