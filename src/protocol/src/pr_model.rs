// pr_model: snapshot of the world for rendering

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrBody {
	pub id: usize,
	pub hue: f32,
	// closed polygon, world space, perimeter order
	pub outline: Vec<[f32; 2]>,
}

impl PrBody {
	pub fn fill_style(&self) -> String {
		format!("hsla({}, 90%, 80%, 0.8)", self.hue)
	}

	pub fn stroke_style(&self) -> String {
		format!("hsla({}, 90%, 70%, 0.8)", self.hue)
	}
}

/// Pointer overlay, only present while a drag is active.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrDrag {
	pub center: [f32; 2],
	pub radius: f32,
	pub inner_radius: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PrModel {
	pub bodies: Vec<PrBody>,
	pub drag: Option<PrDrag>,
}

impl PrModel {
	pub fn vertex_count(&self) -> usize {
		self.bodies.iter().map(|b| b.outline.len()).sum()
	}
}
