use serde::Deserialize;

use crate::point::Point;
use crate::V2;

/// Walls of the simulated area, y grows downwards.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Bounds {
	pub xmin: f32,
	pub xmax: f32,
	pub ymin: f32,
	pub ymax: f32,
}

impl Default for Bounds {
	fn default() -> Self {
		Self::from_size(1280.0, 720.0)
	}
}

impl Bounds {
	pub fn from_size(width: f32, height: f32) -> Self {
		Self {
			xmin: 0.0,
			xmax: width,
			ymin: 0.0,
			ymax: height,
		}
	}

	pub fn width(&self) -> f32 {
		self.xmax - self.xmin
	}

	pub fn height(&self) -> f32 {
		self.ymax - self.ymin
	}

	pub fn contains(&self, pos: V2) -> bool {
		pos[0] >= self.xmin
			&& pos[0] <= self.xmax
			&& pos[1] >= self.ymin
			&& pos[1] <= self.ymax
	}

	// Penalty response: a point closer than half its spacing to a wall is
	// pushed back by the penetration depth and loses tangential speed.
	// Positions are never clamped and may overshoot for a while.
	pub fn collide(&self, point: &mut Point, damping: f32) -> bool {
		let margin = point.spacing / 2.0;
		let pos = point.pos;
		let mut flag = false;
		if pos[0] < self.xmin + margin {
			point.apply_force(V2::new(self.xmin + margin - pos[0], 0.0));
			point.velocity[1] *= damping;
			flag = true;
		} else if pos[0] > self.xmax - margin {
			point.apply_force(V2::new(self.xmax - margin - pos[0], 0.0));
			point.velocity[1] *= damping;
			flag = true;
		}
		if pos[1] < self.ymin + margin {
			point.apply_force(V2::new(0.0, self.ymin + margin - pos[1]));
			point.velocity[0] *= damping;
			flag = true;
		} else if pos[1] > self.ymax - margin {
			point.apply_force(V2::new(0.0, self.ymax - margin - pos[1]));
			point.velocity[0] *= damping;
			flag = true;
		}
		flag
	}
}
