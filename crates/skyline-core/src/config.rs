//! Startup configuration, validated once at mount.

use crate::camera_path::{CameraPath, Waypoint};
use crate::constants::{
    DEFAULT_UTC_OFFSET_MINUTES, DEFAULT_WEATHER_URL, MAX_GLOW_SLOTS, PANEL_REVEAL_MARGIN,
};
use crate::sections::{SectionLayout, SectionThresholds};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("camera path needs at least 2 waypoints, got {0}")]
    TooFewWaypoints(usize),
    #[error("waypoint {0} has a non-finite coordinate")]
    NonFiniteWaypoint(usize),
    #[error("at least one content item is required")]
    NoContentItems,
    #[error("{count} content items exceed the {max} available glow slots")]
    TooManyContentItems { count: usize, max: usize },
    #[error("threshold {name} is out of range: {value}")]
    InvalidThreshold { name: &'static str, value: f32 },
    #[error("malformed scene config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

impl Link {
    pub fn new(label: &str, url: &str) -> Self {
        Self {
            label: label.to_string(),
            url: url.to_string(),
        }
    }
}

/// Static card shown between the intro and the content items.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub title: String,
    #[serde(default)]
    pub body: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub links: Vec<Link>,
    /// Ground anchor of the item's landmark tower.
    pub position: Vec3,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LightingSource {
    pub weather_url: String,
    /// Service returning a ready lighting report; the weather path is used
    /// when absent or failing.
    pub report_url: Option<String>,
    /// Offset of the weather location's local time from UTC.
    pub utc_offset_minutes: i32,
}

impl Default for LightingSource {
    fn default() -> Self {
        Self {
            weather_url: DEFAULT_WEATHER_URL.to_string(),
            report_url: None,
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
        }
    }
}

fn default_reveal_margin() -> f32 {
    PANEL_REVEAL_MARGIN
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneConfig {
    pub headline: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub panels: Vec<Panel>,
    pub items: Vec<ContentItem>,
    pub waypoints: Vec<Waypoint>,
    #[serde(default)]
    pub contact: Vec<Link>,
    #[serde(default)]
    pub lighting: LightingSource,
    #[serde(default)]
    pub city_seed: u64,
    #[serde(default = "default_reveal_margin")]
    pub reveal_margin: f32,
}

impl SceneConfig {
    /// Parse and validate.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.items.is_empty() {
            return Err(ConfigError::NoContentItems);
        }
        if self.items.len() > MAX_GLOW_SLOTS {
            return Err(ConfigError::TooManyContentItems {
                count: self.items.len(),
                max: MAX_GLOW_SLOTS,
            });
        }
        self.thresholds().validate()?;
        CameraPath::new(self.waypoints.clone())?;
        Ok(())
    }

    pub fn thresholds(&self) -> SectionThresholds {
        SectionThresholds {
            panel_reveal_margin: self.reveal_margin,
            ..SectionThresholds::default()
        }
    }

    pub fn section_layout(&self) -> Result<SectionLayout, ConfigError> {
        SectionLayout::new(self.items.len())?
            .with_lead_panels(self.panels.len())
            .with_thresholds(self.thresholds())
    }

    pub fn camera_path(&self) -> Result<CameraPath, ConfigError> {
        CameraPath::new(self.waypoints.clone())
    }

    pub fn landmark_anchors(&self) -> Vec<Vec3> {
        self.items.iter().map(|item| item.position).collect()
    }
}

impl Default for SceneConfig {
    /// A two-item tour over ten waypoints: wide overview, the two lead
    /// panels, each item, contact, and a final pull-back.
    fn default() -> Self {
        let panel_anchor = [40.0, 0.0, -50.0];
        let first = [-40.0, 0.0, -50.0];
        let second = [0.0, 0.0, 15.0];
        Self {
            headline: "Skyline".to_string(),
            tagline: "Scroll to explore the city".to_string(),
            panels: vec![
                Panel {
                    title: "About".to_string(),
                    body: vec!["A short introduction goes here.".to_string()],
                },
                Panel {
                    title: "Skills".to_string(),
                    body: vec!["Rust".to_string(), "WebGPU".to_string()],
                },
            ],
            items: vec![
                ContentItem {
                    title: "First project".to_string(),
                    description: "The first landmark on the tour.".to_string(),
                    links: Vec::new(),
                    position: Vec3::from(first),
                },
                ContentItem {
                    title: "Second project".to_string(),
                    description: "The second landmark on the tour.".to_string(),
                    links: Vec::new(),
                    position: Vec3::from(second),
                },
            ],
            waypoints: vec![
                Waypoint::new([0.0, 80.0, 100.0], [0.0, 20.0, 0.0]),
                Waypoint::new([0.0, 50.0, 80.0], [0.0, 20.0, 0.0]),
                Waypoint::new([-20.0, 40.0, -30.0], panel_anchor),
                Waypoint::new([-50.0, 25.0, -35.0], panel_anchor),
                Waypoint::new([20.0, 60.0, 0.0], first),
                Waypoint::new([-50.0, 30.0, -30.0], first),
                Waypoint::new([30.0, 40.0, 60.0], second),
                Waypoint::new([10.0, 20.0, 45.0], second),
                Waypoint::new([0.0, 10.0, 60.0], [0.0, 10.0, 0.0]),
                Waypoint::new([0.0, 100.0, 120.0], [0.0, 30.0, 0.0]),
            ],
            contact: Vec::new(),
            lighting: LightingSource::default(),
            city_seed: 0x5eed,
            reveal_margin: 0.5,
        }
    }
}
