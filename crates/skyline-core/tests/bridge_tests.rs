// Last-known-good lighting publication.

use skyline_core::*;

const WARM: &str = r##"{
    "temperature": 33,
    "condition": "Clear",
    "lightingDescription": "Hot and bright",
    "updatedLightingConfig": "{\"ambientColor\":\"#ffcc99\",\"ambientIntensity\":1.1,\"directionalColor\":\"#ffffff\",\"directionalIntensity\":1.3}"
}"##;

// Report body with a config the snapshot validation rejects.
const NEGATIVE_INTENSITY: &str = r##"{
    "temperature": 30,
    "condition": "Clear",
    "lightingDescription": "Broken",
    "updatedLightingConfig": "{\"ambientColor\":\"#ffffff\",\"ambientIntensity\":-4,\"directionalColor\":\"#ffffff\",\"directionalIntensity\":1}"
}"##;

fn fetched(body: &str) -> Option<Result<String, String>> {
    Some(Ok(body.to_string()))
}

fn settled(step: ReportStep) -> Option<LightingReport> {
    match step {
        ReportStep::Settled(report) => report,
        ReportStep::NeedWeather => panic!("expected the chain to settle"),
    }
}

#[test]
fn starts_with_default_snapshot() {
    let life = ViewLifetime::new();
    let (bridge, reader) = LightingBridge::new(life.token());
    assert_eq!(bridge.current(), LightingSnapshot::default());
    assert_eq!(reader.get(), LightingSnapshot::default());
}

#[test]
fn valid_payload_is_published_whole() {
    let life = ViewLifetime::new();
    let (bridge, reader) = LightingBridge::new(life.token());
    let report = settled(bridge.accept_fetched_report(fetched(WARM))).unwrap();
    assert_eq!(report.lighting_description, "Hot and bright");
    let s = reader.get();
    assert_eq!(s.ambient_color.to_hex(), 0xffcc99);
    assert_eq!(s.directional_intensity, 1.3);
    assert_eq!(bridge.current(), s);
}

#[test]
fn malformed_payload_keeps_previous_snapshot() {
    let life = ViewLifetime::new();
    let (bridge, reader) = LightingBridge::new(life.token());
    assert!(settled(bridge.accept_fetched_report(fetched(WARM))).is_some());
    let before = reader.get();

    let step = bridge.accept_fetched_report(fetched("{\"temperature\": 30, \"condition\": "));
    assert!(matches!(step, ReportStep::NeedWeather));
    assert_eq!(reader.get(), before);

    let bad_config = LightingReport {
        temperature: 30.0,
        condition: "Clear".into(),
        lighting_description: String::new(),
        updated_lighting_config: r##"{"ambientColor":"#ffffff","ambientIntensity":-4,"directionalColor":"#ffffff","directionalIntensity":1}"##.into(),
    };
    assert!(matches!(
        bridge.accept_report(&bad_config),
        BridgeOutcome::Retained(LightingError::InvalidIntensity { .. })
    ));
    assert_eq!(reader.get(), before);
}

#[test]
fn results_after_teardown_are_discarded() {
    let life = ViewLifetime::new();
    let (bridge, reader) = LightingBridge::new(life.token());
    life.end();
    assert!(!bridge.is_live());
    assert!(settled(bridge.accept_fetched_report(fetched(WARM))).is_none());
    assert!(bridge.accept_weather(&WeatherReading::fallback(), 12).is_none());
    assert!(matches!(
        bridge.accept_report(&derive_lighting(20.0, "Clear", 12)),
        BridgeOutcome::Discarded
    ));
    assert_eq!(reader.get(), LightingSnapshot::default());
}

#[test]
fn dropping_the_view_discards_late_results() {
    let life = ViewLifetime::new();
    let (bridge, _reader) = LightingBridge::new(life.token());
    drop(life);
    assert!(settled(bridge.accept_fetched_report(fetched(WARM))).is_none());
}

#[test]
fn weather_reading_is_derived_then_published() {
    let life = ViewLifetime::new();
    let (bridge, reader) = LightingBridge::new(life.token());
    let reading = WeatherReading::fallback();
    let expected = derive_lighting(reading.temperature, &reading.condition, 19)
        .lighting()
        .unwrap();
    let report = bridge.accept_weather(&reading, 19).unwrap();
    assert_eq!(report.condition, reading.condition);
    assert_eq!(reader.get(), expected);
}

// Fallback chain: report service first, weather when it fails or is
// rejected, nothing once the view is gone.

#[test]
fn applied_report_settles_the_chain() {
    let life = ViewLifetime::new();
    let (bridge, reader) = LightingBridge::new(life.token());
    let report = settled(bridge.accept_fetched_report(fetched(WARM)));
    assert_eq!(report.map(|r| r.temperature), Some(33.0));
    assert_eq!(reader.get().ambient_color.to_hex(), 0xffcc99);
}

#[test]
fn transport_failure_falls_back_to_weather() {
    let life = ViewLifetime::new();
    let (bridge, reader) = LightingBridge::new(life.token());
    let failed: Option<Result<String, String>> = Some(Err("HTTP 503".into()));
    assert!(matches!(
        bridge.accept_fetched_report(failed),
        ReportStep::NeedWeather
    ));
    assert_eq!(reader.get(), LightingSnapshot::default());

    let reading = WeatherReading::fallback();
    let report = bridge.accept_weather(&reading, 13).unwrap();
    assert_eq!(reader.get(), report.lighting().unwrap());
}

#[test]
fn missing_report_service_falls_back_to_weather() {
    let life = ViewLifetime::new();
    let (bridge, _reader) = LightingBridge::new(life.token());
    assert!(matches!(
        bridge.accept_fetched_report::<String>(None),
        ReportStep::NeedWeather
    ));
}

#[test]
fn rejected_report_falls_back_to_weather() {
    let life = ViewLifetime::new();
    let (bridge, reader) = LightingBridge::new(life.token());
    assert!(matches!(
        bridge.accept_fetched_report(fetched(NEGATIVE_INTENSITY)),
        ReportStep::NeedWeather
    ));
    assert_eq!(reader.get(), LightingSnapshot::default());

    let reading = WeatherReading::fallback();
    assert!(bridge.accept_weather(&reading, 21).is_some());
    assert_ne!(reader.get(), LightingSnapshot::default());
}

#[test]
fn teardown_settles_without_weather() {
    let life = ViewLifetime::new();
    let (bridge, reader) = LightingBridge::new(life.token());
    life.end();
    let failed: Option<Result<String, String>> = Some(Err("offline".into()));
    assert!(settled(bridge.accept_fetched_report(failed)).is_none());
    assert!(settled(bridge.accept_fetched_report(fetched(NEGATIVE_INTENSITY))).is_none());
    assert!(!bridge.is_live());
    assert_eq!(reader.get(), LightingSnapshot::default());
}
