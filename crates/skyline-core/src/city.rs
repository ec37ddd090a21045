use crate::constants::{
    CITY_EXTENT, FILLER_BODY_HEX, FILLER_CANDIDATES, GROUND_HEX, LANDMARK_BODY_HEX,
    LANDMARK_BODY_SIZE, LANDMARK_CLEARANCE, LANDMARK_CORE_HEX, LANDMARK_CORE_SIZE,
    WINDOW_FRAME_HEX, WINDOW_GLOW_HEX, WINDOW_LIT_PROBABILITY, WINDOW_PRESENT_PROBABILITY,
};
use crate::lighting::Rgb;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const WINDOW_SIZE: [f32; 3] = [0.8, 1.2, 0.02];
const WINDOW_ROW_STEP: f32 = 4.0;
const WINDOW_COLUMN_STEP: f32 = 3.0;
const WINDOW_EDGE_INSET: f32 = 5.0;
const GROUND_THICKNESS: f32 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildingKind {
    /// Content item tower; its core glows with the item's slot.
    Landmark,
    Filler,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuildingParams {
    /// Ground-level center.
    pub origin: Vec3,
    pub glow_slot: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxPart {
    pub center: Vec3,
    pub size: Vec3,
    pub color: Rgb,
    pub emissive: Rgb,
    /// Fixed emissive strength; ignored when `glow_slot` is set.
    pub emissive_intensity: f32,
    pub glow_slot: Option<usize>,
}

impl BoxPart {
    fn solid(center: Vec3, size: Vec3, color: Rgb) -> Self {
        Self {
            center,
            size,
            color,
            emissive: Rgb([0.0; 3]),
            emissive_intensity: 0.0,
            glow_slot: None,
        }
    }
}

/// Boxes making up one building standing on `params.origin`.
pub fn describe_building<R: Rng + ?Sized>(
    kind: BuildingKind,
    params: BuildingParams,
    rng: &mut R,
) -> Vec<BoxPart> {
    match kind {
        BuildingKind::Landmark => landmark(params),
        BuildingKind::Filler => filler(params.origin, rng),
    }
}

fn landmark(params: BuildingParams) -> Vec<BoxPart> {
    let body = Vec3::from(LANDMARK_BODY_SIZE);
    let core = Vec3::from(LANDMARK_CORE_SIZE);
    let glow = Rgb::from_hex(LANDMARK_CORE_HEX);
    vec![
        BoxPart::solid(
            params.origin + Vec3::Y * body.y * 0.5,
            body,
            Rgb::from_hex(LANDMARK_BODY_HEX),
        ),
        BoxPart {
            center: params.origin + Vec3::Y * core.y * 0.5,
            size: core,
            color: glow,
            emissive: glow,
            emissive_intensity: 0.0,
            glow_slot: params.glow_slot,
        },
    ]
}

fn filler<R: Rng + ?Sized>(origin: Vec3, rng: &mut R) -> Vec<BoxPart> {
    let height = rng.gen_range(20.0..60.0);
    let width = rng.gen_range(4.0..10.0);
    let depth = rng.gen_range(4.0..10.0);
    let lit = rng.gen_bool(WINDOW_LIT_PROBABILITY);

    let mut parts = vec![BoxPart::solid(
        origin + Vec3::Y * height * 0.5,
        Vec3::new(width, height, depth),
        Rgb::from_hex(FILLER_BODY_HEX),
    )];

    let window = Vec3::from(WINDOW_SIZE);
    let face_z = origin.z + depth * 0.5 + window.z * 0.5;
    let mut y = WINDOW_EDGE_INSET;
    while y < height - WINDOW_EDGE_INSET {
        let mut x = -width * 0.5 + 1.0;
        while x < width * 0.5 - 1.0 {
            if rng.gen_bool(WINDOW_PRESENT_PROBABILITY) {
                let jitter: f32 = rng.gen_range(-0.5..0.5);
                parts.push(BoxPart {
                    center: Vec3::new(origin.x + x, origin.y + y + jitter, face_z),
                    size: window,
                    color: Rgb::from_hex(WINDOW_FRAME_HEX),
                    emissive: Rgb::from_hex(WINDOW_GLOW_HEX),
                    emissive_intensity: if lit { 1.0 } else { 0.0 },
                    glow_slot: None,
                });
            }
            x += WINDOW_COLUMN_STEP;
        }
        y += WINDOW_ROW_STEP;
    }
    parts
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CityLayout {
    pub parts: Vec<BoxPart>,
}

impl CityLayout {
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn glowing(&self) -> impl Iterator<Item = &BoxPart> {
        self.parts.iter().filter(|p| p.glow_slot.is_some())
    }
}

/// Ground plane, one landmark per anchor (slot = anchor index), and fillers
/// kept clear of every landmark. Same seed, same city.
pub fn generate_city(landmarks: &[Vec3], seed: u64) -> CityLayout {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut parts = vec![BoxPart::solid(
        Vec3::new(0.0, -GROUND_THICKNESS * 0.5, 0.0),
        Vec3::new(CITY_EXTENT, GROUND_THICKNESS, CITY_EXTENT),
        Rgb::from_hex(GROUND_HEX),
    )];

    for (slot, origin) in landmarks.iter().enumerate() {
        parts.extend(describe_building(
            BuildingKind::Landmark,
            BuildingParams {
                origin: *origin,
                glow_slot: Some(slot),
            },
            &mut rng,
        ));
    }

    let half = CITY_EXTENT * 0.5;
    let mut placed = 0usize;
    for _ in 0..FILLER_CANDIDATES {
        let x = rng.gen_range(-half..half);
        let z = rng.gen_range(-half..half);
        let too_close = landmarks.iter().any(|l| {
            let dx = x - l.x;
            let dz = z - l.z;
            (dx * dx + dz * dz).sqrt() < LANDMARK_CLEARANCE
        });
        if too_close {
            continue;
        }
        parts.extend(describe_building(
            BuildingKind::Filler,
            BuildingParams {
                origin: Vec3::new(x, 0.0, z),
                glow_slot: None,
            },
            &mut rng,
        ));
        placed += 1;
    }
    log::debug!(
        "[city] {} landmarks, {placed} fillers, {} boxes",
        landmarks.len(),
        parts.len()
    );

    CityLayout { parts }
}
