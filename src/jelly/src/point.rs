use std::f32::consts::{FRAC_PI_4, PI};

use crate::config::SimConfig;
use crate::vector::VectorExt;
use crate::V2;

pub const MAX_SPIN: f32 = FRAC_PI_4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Drag {
	// pos - target at grab time
	pub offset: V2,
	pub target: V2,
}

/// Oriented point-mass: a tiny rigid square of side `spacing`.
#[derive(Clone, Debug)]
pub struct Point {
	pub pos: V2,
	pub velocity: V2,
	pub force: V2,
	pub angle: f32,
	pub angular_velocity: f32,
	pub torque: f32,
	// copied from the owning body
	pub spacing: f32,
	pub drag: Option<Drag>,
}

impl Point {
	pub fn new(pos: V2, spacing: f32) -> Self {
		Self {
			pos,
			velocity: V2::zeros(),
			force: V2::zeros(),
			angle: 0.0,
			angular_velocity: 0.0,
			torque: 0.0,
			spacing,
			drag: None,
		}
	}

	pub fn with_spin(mut self, w: f32) -> Self {
		self.angular_velocity = w;
		self
	}

	pub fn inertia(&self) -> f32 {
		(self.spacing / 2.0).powi(2) / 2.0
	}

	pub fn integrate(&mut self, cfg: &SimConfig) {
		let speed = cfg.speed;
		self.velocity += self.force * speed;
		self.force = V2::new(0.0, cfg.gravity_step());
		self.pos += self.velocity * speed;

		self.angular_velocity += self.torque / self.inertia();
		self.angular_velocity =
			(self.angular_velocity * speed).clamp(-MAX_SPIN, MAX_SPIN);
		self.angle += self.angular_velocity;
		self.torque = 0.0;

		if let Some(drag) = self.drag {
			self.move_to(drag.target, drag.offset, cfg);
		}
	}

	pub fn to_world(&self, local: V2) -> V2 {
		local.rotated(self.angle)
	}

	pub fn velocity_at(&self, at: V2) -> V2 {
		self.velocity + (at - self.pos).orthogonal() * self.angular_velocity
	}

	pub fn apply_force(&mut self, f: V2) {
		self.force += f;
	}

	pub fn apply_torque(&mut self, f: V2, at: V2) {
		let arm = at - self.pos;
		self.torque += arm.perp_dot(&f);
	}

	pub fn move_to(&mut self, target: V2, offset: V2, cfg: &SimConfig) {
		let pull = target + offset - self.pos;
		self.velocity += pull * (cfg.grab_stiffness * cfg.speed);
		self.velocity *= cfg.grab_damping;
	}

	pub fn grab(&mut self, target: V2) {
		self.drag = Some(Drag {
			offset: self.pos - target,
			target,
		});
		self.velocity = V2::zeros();
		self.force = V2::zeros();
	}

	// keeps the offset taken at grab time
	pub fn drag_to(&mut self, target: V2) {
		if let Some(drag) = self.drag.as_mut() {
			drag.target = target;
		}
	}

	pub fn release(&mut self) {
		self.drag = None;
	}

	pub fn is_grabbed(&self) -> bool {
		self.drag.is_some()
	}
}

// relative orientation, limited to half a turn either way
pub fn angle_delta(from: f32, to: f32) -> f32 {
	(to - from).clamp(-PI, PI)
}
