pub mod body;
pub mod boundary;
pub mod config;
pub mod controller_message;
pub mod error;
pub mod point;
pub mod reactor;
pub mod runner;
pub mod vector;
pub mod world;

pub type V2 = nalgebra::Vector2<f32>;

pub use body::{Body, BodyShape};
pub use config::{Scenario, SimConfig};
pub use error::JellyError;
pub use world::{PointRef, World};
