use crate::config::ReactorCoefficients;
use crate::point::{angle_delta, Point};
use crate::V2;

// anchor `offset` in a's frame meets anchor `-offset` in b's frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Joint {
	pub a: usize,
	pub b: usize,
	pub offset: V2,
}

struct Anchors {
	a: V2,
	b: V2,
}

impl Anchors {
	fn separation(&self) -> V2 {
		self.b - self.a
	}

	fn midpoint(&self) -> V2 {
		self.a + self.separation() * 0.5
	}
}

impl Joint {
	pub fn new(a: usize, b: usize, offset: V2) -> Self {
		Self { a, b, offset }
	}

	fn anchors(&self, a: &Point, b: &Point) -> Anchors {
		Anchors {
			a: a.pos + a.to_world(self.offset),
			b: b.pos + b.to_world(-self.offset),
		}
	}

	pub fn separation(&self, a: &Point, b: &Point) -> f32 {
		self.anchors(a, b).separation().magnitude()
	}

	/// Accumulates the corrective force and torque on both points and
	/// returns the separation they had before.
	pub fn react(
		&self,
		a: &mut Point,
		b: &mut Point,
		k: &ReactorCoefficients,
	) -> f32 {
		let anchors = self.anchors(a, b);
		let diff = anchors.separation();
		let mid = anchors.midpoint();

		// orientation, applied without lever arm
		let t = angle_delta(a.angle, b.angle);
		a.torque += t;
		b.torque -= t;

		let dv = b.velocity_at(mid) - a.velocity_at(mid);
		let err = diff + dv;
		let mf = err * k.force;
		let tf = err * k.torque;

		a.apply_force(mf);
		b.apply_force(-mf);
		a.apply_torque(tf, mid);
		b.apply_torque(-tf, mid);
		diff.magnitude()
	}
}

// Two distinct mutable points out of one slice.
pub fn pair_mut(points: &mut [Point], a: usize, b: usize) -> (&mut Point, &mut Point) {
	assert_ne!(a, b, "joint connects a point to itself");
	if a < b {
		let (lo, hi) = points.split_at_mut(b);
		(&mut lo[a], &mut hi[0])
	} else {
		let (lo, hi) = points.split_at_mut(a);
		(&mut hi[0], &mut lo[b])
	}
}
