// Per-frame synchronization against a recording scene target.

use glam::Vec3;
use skyline_core::*;

#[derive(Default)]
struct Recorder {
    ready: bool,
    camera: Option<CameraPose>,
    glow: Vec<(usize, f32)>,
    lighting: Option<LightingSnapshot>,
    calls: usize,
}

impl SceneTarget for Recorder {
    fn is_ready(&self) -> bool {
        self.ready
    }
    fn apply_camera(&mut self, pose: CameraPose) {
        self.calls += 1;
        self.camera = Some(pose);
    }
    fn apply_glow(&mut self, slot: usize, intensity: f32) {
        self.calls += 1;
        self.glow.push((slot, intensity));
    }
    fn apply_lighting(&mut self, lighting: &LightingSnapshot) {
        self.calls += 1;
        self.lighting = Some(*lighting);
    }
}

struct Rig {
    tracker: ScrollTracker,
    bridge: LightingBridge,
    sync: SceneSync,
    _life: ViewLifetime,
}

fn rig(items: usize) -> Rig {
    let life = ViewLifetime::new();
    let (tracker, sections) = ScrollTracker::new(SectionLayout::new(items).unwrap());
    let (bridge, lighting) = LightingBridge::new(life.token());
    let path = CameraPath::new(vec![
        Waypoint::new([0.0, 50.0, 100.0], [0.0, 0.0, 0.0]),
        Waypoint::new([100.0, 50.0, 0.0], [0.0, 0.0, 0.0]),
    ])
    .unwrap();
    let sync = SceneSync::new(path, items, GlowTuning::default(), sections, lighting);
    Rig {
        tracker,
        bridge,
        sync,
        _life: life,
    }
}

fn scroll_to(tracker: &ScrollTracker, progress: f64) {
    tracker.on_scroll(ScrollMetrics::new(progress * 1000.0, 2000.0, 1000.0));
}

fn ready() -> Recorder {
    Recorder {
        ready: true,
        ..Recorder::default()
    }
}

#[test]
fn frame_before_surface_is_ready_is_skipped() {
    let mut r = rig(2);
    scroll_to(&r.tracker, 0.3);
    let mut target = Recorder::default();
    assert_eq!(r.sync.frame(&mut target, 0.0), FrameOutcome::Skipped);
    assert_eq!(target.calls, 0);
    assert_eq!(r.sync.glow(), &[0.0, 0.0]);

    target.ready = true;
    assert_eq!(r.sync.frame(&mut target, 0.0), FrameOutcome::Applied);
    assert!(target.camera.is_some());
    assert_eq!(target.glow.len(), 2);
    assert!(target.lighting.is_some());
}

#[test]
fn untouched_bridge_applies_documented_defaults() {
    let mut r = rig(2);
    let mut target = ready();
    r.sync.frame(&mut target, 0.0);
    let applied = target.lighting.unwrap();
    assert_eq!(applied, LightingSnapshot::default());
    assert_eq!(applied.ambient_color, Rgb::from_hex(0x808080));
    assert_eq!(applied.ambient_intensity, 2.0);
    assert_eq!(applied.directional_color, Rgb::new(1.0, 1.0, 1.0));
    assert_eq!(applied.directional_intensity, 1.0);
}

#[test]
fn malformed_payload_leaves_applied_light_identical() {
    let mut r = rig(2);
    let mut target = ready();
    let report = derive_lighting(18.0, "Mist", 7);
    assert!(r.bridge.accept_report(&report).is_applied());
    r.sync.frame(&mut target, 0.1);
    let before = target.lighting.unwrap();

    let body: Option<Result<String, String>> = Some(Ok("{{ not json".into()));
    assert!(matches!(
        r.bridge.accept_fetched_report(body),
        ReportStep::NeedWeather
    ));
    r.sync.frame(&mut target, 0.2);
    let after = target.lighting.unwrap();

    assert_eq!(format!("{before:?}"), format!("{after:?}"));
    assert_eq!(
        before.ambient_intensity.to_bits(),
        after.ambient_intensity.to_bits()
    );
    for i in 0..3 {
        assert_eq!(
            before.directional_color.0[i].to_bits(),
            after.directional_color.0[i].to_bits()
        );
    }
}

#[test]
fn camera_tracks_latest_progress_without_smoothing() {
    let mut r = rig(2);
    let mut target = ready();

    scroll_to(&r.tracker, 1.0);
    r.sync.frame(&mut target, 0.0);
    assert_eq!(target.camera.unwrap().eye, Vec3::new(100.0, 50.0, 0.0));

    scroll_to(&r.tracker, 0.5);
    r.sync.frame(&mut target, 0.0);
    assert!(target
        .camera
        .unwrap()
        .eye
        .abs_diff_eq(Vec3::new(50.0, 50.0, 50.0), 1e-4));
}

#[test]
fn active_item_glow_eases_in() {
    let mut r = rig(2);
    let mut target = ready();
    // first item band is [0.25, 0.5)
    scroll_to(&r.tracker, 0.3);

    r.sync.frame(&mut target, 0.0);
    let full = GlowTuning::default().target(true, 0.0, 0);
    assert!((r.sync.glow()[0] - full * 0.1).abs() < 1e-6);
    assert_eq!(r.sync.glow()[1], 0.0);

    for _ in 0..200 {
        r.sync.frame(&mut target, 0.0);
    }
    assert!((r.sync.glow()[0] - full).abs() < 1e-3);
    assert_eq!(r.sync.glow()[1], 0.0);

    // scroll away: the glow releases gradually
    scroll_to(&r.tracker, 0.1);
    r.sync.frame(&mut target, 0.0);
    let released = r.sync.glow()[0];
    assert!(released > 0.0 && released < full);
    assert!((released - full * 0.9).abs() < 1e-3);
}

#[test]
fn finished_journey_lights_every_landmark() {
    let mut r = rig(3);
    let mut target = ready();
    scroll_to(&r.tracker, 0.99);
    r.sync.frame(&mut target, 1.0);
    assert!(r.sync.glow().iter().all(|g| *g > 0.0));
    let slots: Vec<usize> = target.glow.iter().map(|(s, _)| *s).collect();
    assert_eq!(slots, vec![0, 1, 2]);
}

#[test]
fn glow_target_pulses_around_base() {
    let tuning = GlowTuning::default();
    assert_eq!(tuning.target(false, 3.7, 1), 0.0);
    assert_eq!(tuning.target(true, 0.0, 0), 1.5);
    assert!((tuning.target(true, 0.0, 1) - (1.5 + 0.5 * 1f32.sin())).abs() < 1e-6);
    for i in 0..100 {
        let t = tuning.target(true, i as f32 * 0.07, i % 5);
        assert!((1.0..=2.0).contains(&t));
    }
}
