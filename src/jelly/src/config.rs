use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::body::BodyShape;
use crate::boundary::Bounds;
use crate::error::{JellyError, Result};

pub const SPACING: f32 = 14.0;
pub const ITERATIONS: usize = 14;
pub const GRAVITY: f32 = 0.05;
pub const SPEED: f32 = 1.0;
pub const SLOW_SPEED: f32 = 0.2;
pub const DRAG_RADIUS: f32 = 5.0;
pub const GRAB_STIFFNESS: f32 = 0.001;
pub const GRAB_DAMPING: f32 = 0.99;
pub const WALL_DAMPING: f32 = 0.6;

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReactorCoefficients {
	pub force: f32,
	pub torque: f32,
}

impl Default for ReactorCoefficients {
	fn default() -> Self {
		Self {
			force: 0.04,
			torque: 0.02,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
	pub gravity: f32,
	pub speed: f32,
	pub iterations: usize,
	pub spacing: f32,
	// capture radius in units of spacing
	pub drag_radius: f32,
	pub grab_stiffness: f32,
	pub grab_damping: f32,
	pub wall_damping: f32,
	pub reactor: ReactorCoefficients,
}

impl Default for SimConfig {
	fn default() -> Self {
		Self {
			gravity: GRAVITY,
			speed: SPEED,
			iterations: ITERATIONS,
			spacing: SPACING,
			drag_radius: DRAG_RADIUS,
			grab_stiffness: GRAB_STIFFNESS,
			grab_damping: GRAB_DAMPING,
			wall_damping: WALL_DAMPING,
			reactor: Default::default(),
		}
	}
}

impl SimConfig {
	pub fn with_gravity(mut self, gravity: f32) -> Self {
		self.gravity = gravity;
		self
	}

	pub fn with_speed(mut self, speed: f32) -> Self {
		self.speed = speed;
		self
	}

	pub fn with_iterations(mut self, iterations: usize) -> Self {
		self.iterations = iterations;
		self
	}

	pub fn with_spacing(mut self, spacing: f32) -> Self {
		self.spacing = spacing;
		self
	}

	pub fn with_reactor(mut self, reactor: ReactorCoefficients) -> Self {
		self.reactor = reactor;
		self
	}

	/// Gravity added to a point's force accumulator per iteration.
	pub fn gravity_step(&self) -> f32 {
		self.gravity / self.iterations as f32
	}

	pub fn capture_radius(&self) -> f32 {
		self.drag_radius * self.spacing
	}

	pub fn validate(&self) -> Result<()> {
		if self.iterations == 0 {
			return Err(JellyError::InvalidConfig(
				"iterations must be at least 1".into(),
			));
		}
		if self.spacing.is_nan() || self.spacing <= 0.0 {
			return Err(JellyError::InvalidConfig(format!(
				"spacing must be positive, got {}",
				self.spacing
			)));
		}
		Ok(())
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tunable {
	Gravity,
	Speed,
}

impl FromStr for Tunable {
	type Err = JellyError;

	fn from_str(s: &str) -> Result<Self> {
		match s {
			"gravity" => Ok(Tunable::Gravity),
			"speed" => Ok(Tunable::Speed),
			_ => Err(JellyError::UnknownTunable(s.to_string())),
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct BodySpec {
	pub width: usize,
	pub height: usize,
	pub spacing: Option<f32>,
	pub hue: Option<f32>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Scenario {
	#[serde(default)]
	pub bounds: Bounds,
	#[serde(default)]
	pub seed: u64,
	#[serde(default)]
	pub hue_base: Option<f32>,
	#[serde(default)]
	pub sim: SimConfig,
	pub bodies: Vec<BodySpec>,
}

impl Default for Scenario {
	// four squares of growing size, as in the classic demo
	fn default() -> Self {
		let bodies = (0..4)
			.map(|i| BodySpec {
				width: 8 + i * 2,
				height: 8 + i * 2,
				spacing: None,
				hue: None,
			})
			.collect();
		Self {
			bounds: Bounds::default(),
			seed: 0,
			hue_base: None,
			sim: SimConfig::default(),
			bodies,
		}
	}
}

impl Scenario {
	pub fn from_yaml(text: &str) -> Result<Self> {
		let scenario: Scenario = serde_yaml::from_str(text)?;
		scenario.validate()?;
		Ok(scenario)
	}

	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let text = std::fs::read_to_string(path)?;
		Self::from_yaml(&text)
	}

	pub fn validate(&self) -> Result<()> {
		self.sim.validate()?;
		for shape in self.shapes(0.0) {
			shape.validate()?;
		}
		Ok(())
	}

	// hues step by 20 unless given
	pub fn shapes(&self, hue_base: f32) -> Vec<BodyShape> {
		self.bodies
			.iter()
			.enumerate()
			.map(|(i, spec)| BodyShape {
				width: spec.width,
				height: spec.height,
				spacing: spec.spacing.unwrap_or(self.sim.spacing),
				hue: spec.hue.unwrap_or(hue_base + 20.0 * i as f32),
			})
			.collect()
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_tunable_names() {
		assert_eq!("gravity".parse::<Tunable>().unwrap(), Tunable::Gravity);
		assert_eq!("speed".parse::<Tunable>().unwrap(), Tunable::Speed);
		assert!(matches!(
			"friction".parse::<Tunable>(),
			Err(JellyError::UnknownTunable(name)) if name == "friction"
		));
	}

	#[test]
	fn test_gravity_step() {
		let cfg = SimConfig::default().with_gravity(0.07).with_iterations(7);
		assert!((cfg.gravity_step() - 0.01).abs() < 1e-7);
		assert_eq!(SimConfig::default().capture_radius(), 70.0);
	}

	#[test]
	fn test_scenario_yaml() {
		let text = "
seed: 3
hue_base: 100.0
sim:
  gravity: 0.0
bodies:
  - { width: 3, height: 4 }
  - { width: 2, height: 2, spacing: 10.0, hue: 5.0 }
";
		let scenario = Scenario::from_yaml(text).unwrap();
		assert_eq!(scenario.seed, 3);
		assert_eq!(scenario.sim.gravity, 0.0);
		assert_eq!(scenario.sim.iterations, ITERATIONS);
		let shapes = scenario.shapes(100.0);
		assert_eq!(shapes[0].spacing, SPACING);
		assert_eq!(shapes[0].hue, 100.0);
		assert_eq!(shapes[1].spacing, 10.0);
		assert_eq!(shapes[1].hue, 5.0);
	}

	#[test]
	fn test_scenario_rejects_zero_spacing() {
		let text = "bodies: [ { width: 3, height: 3, spacing: 0.0 } ]";
		assert!(matches!(
			Scenario::from_yaml(text),
			Err(JellyError::InvalidShape(_))
		));
	}

	#[test]
	fn test_scenario_rejects_zero_iterations() {
		let text = "sim: { iterations: 0 }\nbodies: []";
		assert!(matches!(
			Scenario::from_yaml(text),
			Err(JellyError::InvalidConfig(_))
		));
	}

	#[test]
	fn test_default_scenario() {
		let scenario = Scenario::default();
		let sizes: Vec<usize> =
			scenario.bodies.iter().map(|b| b.width).collect();
		assert_eq!(sizes, vec![8, 10, 12, 14]);
	}
}
