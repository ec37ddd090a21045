pub mod bridge;
pub mod camera_path;
pub mod city;
pub mod config;
pub mod constants;
pub mod lighting;
pub mod scroll;
pub mod sections;
pub mod shared;
pub mod state;
pub mod sync;
pub mod weather;

pub static CITY_WGSL: &str = include_str!("../shaders/city.wgsl");

pub use bridge::*;
pub use camera_path::*;
pub use city::*;
pub use config::*;
pub use constants::*;
pub use lighting::*;
pub use scroll::*;
pub use sections::*;
pub use shared::*;
pub use state::*;
pub use sync::*;
pub use weather::*;
