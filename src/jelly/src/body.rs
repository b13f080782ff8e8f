use serde::Deserialize;

use crate::config::ReactorCoefficients;
use crate::error::{JellyError, Result};
use crate::point::Point;
use crate::reactor::{pair_mut, Joint};
use crate::V2;

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct BodyShape {
	pub width: usize,
	pub height: usize,
	pub spacing: f32,
	pub hue: f32,
}

impl BodyShape {
	pub fn new(width: usize, height: usize, spacing: f32, hue: f32) -> Self {
		Self {
			width,
			height,
			spacing,
			hue,
		}
	}

	// Zero spacing makes the point inertia vanish; the solver does not
	// guard against it, so it is rejected here.
	pub fn validate(&self) -> Result<()> {
		if self.width == 0 || self.height == 0 {
			return Err(JellyError::InvalidShape(format!(
				"empty lattice {}x{}",
				self.width, self.height
			)));
		}
		if self.spacing.is_nan() || self.spacing <= 0.0 {
			return Err(JellyError::InvalidShape(format!(
				"spacing must be positive, got {}",
				self.spacing
			)));
		}
		Ok(())
	}

	pub fn extent(&self) -> V2 {
		V2::new(
			self.width as f32 * self.spacing,
			self.height as f32 * self.spacing,
		)
	}
}

#[derive(Clone, Debug)]
pub struct Body {
	id: usize,
	shape: BodyShape,
	points: Vec<Point>,
	joints: Vec<Joint>,
	outline: Vec<usize>,
}

impl Body {
	pub fn new(id: usize, shape: BodyShape, origin: V2, spin: f32) -> Self {
		let BodyShape {
			width,
			height,
			spacing,
			..
		} = shape;
		let mut points = Vec::with_capacity(width * height);
		let mut joints = Vec::new();
		for idy in 0..height {
			for idx in 0..width {
				let pos =
					origin + V2::new(idx as f32, idy as f32) * spacing;
				let i = points.len();
				points.push(Point::new(pos, spacing).with_spin(spin));
				if idx > 0 {
					joints.push(Joint::new(
						i - 1,
						i,
						V2::new(spacing / 2.0, 0.0),
					));
				}
				if idy > 0 {
					joints.push(Joint::new(
						i - width,
						i,
						V2::new(0.0, spacing / 2.0),
					));
				}
			}
		}
		Self {
			id,
			shape,
			points,
			joints,
			outline: perimeter(width, height),
		}
	}

	pub fn id(&self) -> usize {
		self.id
	}

	pub fn shape(&self) -> &BodyShape {
		&self.shape
	}

	pub fn spacing(&self) -> f32 {
		self.shape.spacing
	}

	pub fn hue(&self) -> f32 {
		self.shape.hue
	}

	pub fn points(&self) -> &[Point] {
		&self.points
	}

	pub fn points_mut(&mut self) -> &mut [Point] {
		&mut self.points
	}

	pub fn point(&self, idx: usize) -> Option<&Point> {
		self.points.get(idx)
	}

	pub fn point_mut(&mut self, idx: usize) -> Option<&mut Point> {
		self.points.get_mut(idx)
	}

	pub fn grid_index(&self, x: usize, y: usize) -> usize {
		y * self.shape.width + x
	}

	pub fn joints(&self) -> &[Joint] {
		&self.joints
	}

	pub fn outline_indices(&self) -> &[usize] {
		&self.outline
	}

	pub fn outline(&self) -> impl Iterator<Item = V2> + '_ {
		self.outline.iter().map(move |&i| self.points[i].pos)
	}

	pub fn centroid(&self) -> V2 {
		let sum = self.points.iter().fold(V2::zeros(), |acc, p| acc + p.pos);
		sum / self.points.len() as f32
	}

	pub fn react(&mut self, k: &ReactorCoefficients) {
		for joint in self.joints.iter() {
			let (a, b) = pair_mut(&mut self.points, joint.a, joint.b);
			joint.react(a, b, k);
		}
	}

	pub fn separations(&self) -> Vec<f32> {
		self.joints
			.iter()
			.map(|j| j.separation(&self.points[j.a], &self.points[j.b]))
			.collect()
	}
}

// Top row left to right, right column downwards, bottom row right to left,
// left column upwards. Corners appear once.
fn perimeter(width: usize, height: usize) -> Vec<usize> {
	if width == 0 || height == 0 {
		return Vec::new();
	}
	if width == 1 || height == 1 {
		return (0..width * height).collect();
	}
	let idx = |x: usize, y: usize| y * width + x;
	let mut result = Vec::with_capacity(2 * (width + height) - 4);
	result.extend((0..width).map(|x| idx(x, 0)));
	result.extend((1..height).map(|y| idx(width - 1, y)));
	result.extend((0..width - 1).rev().map(|x| idx(x, height - 1)));
	result.extend((1..height - 1).rev().map(|y| idx(0, y)));
	result
}

#[cfg(test)]
mod test {
	use super::*;
	use std::collections::HashSet;

	#[test]
	fn test_perimeter_3x3() {
		assert_eq!(perimeter(3, 3), vec![0, 1, 2, 5, 8, 7, 6, 3]);
	}

	#[test]
	fn test_perimeter_len_and_distinct() {
		for width in 2..7 {
			for height in 2..7 {
				let outline = perimeter(width, height);
				assert_eq!(outline.len(), 2 * width + 2 * height - 4);
				let set: HashSet<usize> = outline.iter().copied().collect();
				assert_eq!(set.len(), outline.len());
				for i in outline {
					let (x, y) = (i % width, i / width);
					assert!(x == 0 || y == 0 || x == width - 1 || y == height - 1);
				}
			}
		}
	}

	#[test]
	fn test_degenerate_perimeter() {
		assert_eq!(perimeter(4, 1), vec![0, 1, 2, 3]);
		assert_eq!(perimeter(1, 1), vec![0]);
	}

	#[test]
	fn test_lattice_and_joints() {
		let shape = BodyShape::new(3, 2, 10.0, 0.0);
		let body = Body::new(0, shape, V2::new(5.0, 5.0), 0.25);
		assert_eq!(body.points().len(), 6);
		assert_eq!(body.points()[4].pos, V2::new(15.0, 15.0));
		assert!(body.points().iter().all(|p| p.angular_velocity == 0.25));
		assert!(body.points().iter().all(|p| p.spacing == 10.0));
		// (w-1)h horizontal, w(h-1) vertical
		assert_eq!(body.joints().len(), 2 * 2 + 3);
		let horizontal = body
			.joints()
			.iter()
			.filter(|j| j.offset == V2::new(5.0, 0.0))
			.count();
		assert_eq!(horizontal, 4);
		assert_eq!(body.joints()[0], Joint::new(0, 1, V2::new(5.0, 0.0)));
		assert!(body.separations().iter().all(|&s| s == 0.0));
	}

	#[test]
	fn test_centroid() {
		let body =
			Body::new(1, BodyShape::new(3, 3, 14.0, 0.0), V2::zeros(), 0.0);
		assert_eq!(body.centroid(), V2::new(14.0, 14.0));
		assert_eq!(body.grid_index(2, 1), 5);
	}

	#[test]
	fn test_shape_validation() {
		assert!(BodyShape::new(3, 3, 14.0, 0.0).validate().is_ok());
		assert!(BodyShape::new(0, 3, 14.0, 0.0).validate().is_err());
		assert!(BodyShape::new(3, 3, 0.0, 0.0).validate().is_err());
		assert!(BodyShape::new(3, 3, f32::NAN, 0.0).validate().is_err());
	}
}
