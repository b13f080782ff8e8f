use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::body::{Body, BodyShape};
use crate::boundary::Bounds;
use crate::config::{Scenario, SimConfig, Tunable};
use crate::controller_message::{ControllerMessage, Toggle};
use crate::error::{JellyError, Result};
use crate::point::Point;
use crate::reactor::Joint;
use crate::vector::VectorExt;
use crate::V2;
use protocol::pr_model::{PrBody, PrDrag, PrModel};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PointRef {
	pub body: usize,
	pub index: usize,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Pointer {
	pub pos: V2,
	pub down: bool,
}

pub struct World {
	cfg: SimConfig,
	// values the toggles fall back to
	base: SimConfig,
	staged: Vec<(Tunable, f32)>,
	bounds: Bounds,
	bodies: Vec<Body>,
	pointer: Pointer,
	rng: StdRng,
	frame: u64,
}

impl World {
	pub fn new(bounds: Bounds, cfg: SimConfig, seed: u64) -> Result<Self> {
		cfg.validate()?;
		Ok(Self {
			base: cfg.clone(),
			cfg,
			staged: Vec::new(),
			bounds,
			bodies: Vec::new(),
			pointer: Pointer::default(),
			rng: StdRng::seed_from_u64(seed),
			frame: 0,
		})
	}

	pub fn from_scenario(scenario: &Scenario) -> Result<Self> {
		scenario.validate()?;
		let mut world =
			Self::new(scenario.bounds, scenario.sim.clone(), scenario.seed)?;
		let hue_base = match scenario.hue_base {
			Some(h) => h,
			None => world.rng.gen_range(0.0..360.0),
		};
		for shape in scenario.shapes(hue_base) {
			world.spawn_body(shape)?;
		}
		Ok(world)
	}

	pub fn config(&self) -> &SimConfig {
		&self.cfg
	}

	pub fn bounds(&self) -> &Bounds {
		&self.bounds
	}

	pub fn bodies(&self) -> &[Body] {
		&self.bodies
	}

	pub fn body(&self, id: usize) -> Option<&Body> {
		self.bodies.get(id)
	}

	pub fn body_mut(&mut self, id: usize) -> Option<&mut Body> {
		self.bodies.get_mut(id)
	}

	pub fn pointer(&self) -> &Pointer {
		&self.pointer
	}

	pub fn frame(&self) -> u64 {
		self.frame
	}

	pub fn point_len(&self) -> usize {
		self.bodies.iter().map(|b| b.points().len()).sum()
	}

	pub fn joint_len(&self) -> usize {
		self.bodies.iter().map(|b| b.joints().len()).sum()
	}

	pub fn joints(&self) -> impl Iterator<Item = (usize, &Joint)> + '_ {
		self.bodies
			.iter()
			.flat_map(|b| b.joints().iter().map(move |j| (b.id(), j)))
	}

	pub fn create_body(
		&mut self,
		width: usize,
		height: usize,
		spacing: f32,
		hue: f32,
	) -> Result<usize> {
		self.spawn_body(BodyShape::new(width, height, spacing, hue))
	}

	/// Random placement in the upper part of the bounds, one random spin
	/// shared by every point of the body.
	pub fn spawn_body(&mut self, shape: BodyShape) -> Result<usize> {
		shape.validate()?;
		let extent = shape.extent();
		let b = &self.bounds;
		let xspan = (b.width() - 10.0 - extent[0]).max(0.0);
		let yspan = (b.height() - 300.0 - extent[1]).max(0.0);
		let x = b.xmin + 10.0 + self.rng.gen::<f32>() * xspan;
		let y = b.ymax - (200.0 + self.rng.gen::<f32>() * yspan);
		let origin = V2::new(
			x.min(b.xmax - extent[0]).max(b.xmin),
			y.min(b.ymax - extent[1]).max(b.ymin),
		);
		let spin = self.rng.gen::<f32>() - 0.5;
		Ok(self.add_body(shape, origin, spin))
	}

	pub fn add_body(&mut self, shape: BodyShape, origin: V2, spin: f32) -> usize {
		let id = self.bodies.len();
		eprintln!(
			"INFO: add body {}: {}x{} spacing {} at ({:.1}, {:.1})",
			id, shape.width, shape.height, shape.spacing, origin[0], origin[1],
		);
		self.bodies.push(Body::new(id, shape, origin, spin));
		id
	}

	pub fn point(&self, p: PointRef) -> Option<&Point> {
		self.bodies.get(p.body)?.point(p.index)
	}

	fn point_mut(&mut self, p: PointRef) -> Result<&mut Point> {
		self.bodies
			.get_mut(p.body)
			.and_then(|b| b.point_mut(p.index))
			.ok_or(JellyError::NoSuchPoint {
				body: p.body,
				index: p.index,
			})
	}

	pub fn set_tunable(&mut self, name: &str, value: f32) -> Result<()> {
		let tunable = name.parse()?;
		self.stage(tunable, value);
		Ok(())
	}

	// takes effect when the next frame starts
	pub fn stage(&mut self, tunable: Tunable, value: f32) {
		self.staged.push((tunable, value));
	}

	fn apply_staged(&mut self) {
		for (tunable, value) in self.staged.drain(..) {
			eprintln!("INFO: {:?} = {}", tunable, value);
			match tunable {
				Tunable::Gravity => self.cfg.gravity = value,
				Tunable::Speed => self.cfg.speed = value,
			}
		}
	}

	pub fn hold(&mut self, toggle: Toggle) {
		let value = toggle.held(&self.base);
		self.stage(toggle.tunable(), value);
	}

	pub fn unhold(&mut self, toggle: Toggle) {
		let value = toggle.released(&self.base);
		self.stage(toggle.tunable(), value);
	}

	pub fn grab(&mut self, p: PointRef, target: V2) -> Result<()> {
		self.point_mut(p)?.grab(target);
		Ok(())
	}

	pub fn release(&mut self, p: PointRef) -> Result<()> {
		self.point_mut(p)?.release();
		Ok(())
	}

	pub fn release_all(&mut self) {
		for body in self.bodies.iter_mut() {
			for p in body.points_mut() {
				p.release();
			}
		}
	}

	pub fn grabbed(&self) -> Vec<PointRef> {
		let mut result = Vec::new();
		for body in self.bodies.iter() {
			for (index, p) in body.points().iter().enumerate() {
				if p.is_grabbed() {
					result.push(PointRef {
						body: body.id(),
						index,
					});
				}
			}
		}
		result
	}

	/// Grabs every free point within the capture radius of `pos`.
	pub fn pointer_down(&mut self, pos: V2) -> usize {
		self.pointer = Pointer { pos, down: true };
		let radius = self.cfg.capture_radius();
		let mut count = 0;
		for body in self.bodies.iter_mut() {
			for p in body.points_mut() {
				if !p.is_grabbed() && p.pos.distance(&pos) < radius {
					p.grab(pos);
					count += 1;
				}
			}
		}
		count
	}

	/// Moves the drag target of every held point.
	pub fn pointer_move(&mut self, pos: V2) {
		self.pointer.pos = pos;
		for body in self.bodies.iter_mut() {
			for p in body.points_mut() {
				p.drag_to(pos);
			}
		}
	}

	pub fn pointer_up(&mut self) {
		self.pointer.down = false;
		self.release_all();
	}

	pub fn apply(&mut self, msg: ControllerMessage) {
		use ControllerMessage::*;
		match msg {
			PointerDown(pos) => {
				let n = self.pointer_down(pos.into());
				eprintln!("INFO: grabbed {} points", n);
			}
			PointerMove(pos) => self.pointer_move(pos.into()),
			PointerUp => self.pointer_up(),
			Hold(toggle) => self.hold(toggle),
			Unhold(toggle) => self.unhold(toggle),
			SetTunable(tunable, value) => self.stage(tunable, value),
			// handled by the runner
			TogglePause | FrameForward => {}
		}
	}

	pub fn step(&mut self) {
		self.apply_staged();
		for _ in 0..self.cfg.iterations {
			for body in self.bodies.iter_mut() {
				body.react(&self.cfg.reactor);
			}
			integrate(&mut self.bodies, &self.cfg, &self.bounds);
		}
		self.frame += 1;
	}

	pub fn render(&self) -> PrModel {
		let bodies = self
			.bodies
			.iter()
			.map(|b| PrBody {
				id: b.id(),
				hue: b.hue(),
				outline: b.outline().map(|v| [v[0], v[1]]).collect(),
			})
			.collect();
		let drag = self.pointer.down.then(|| PrDrag {
			center: [self.pointer.pos[0], self.pointer.pos[1]],
			radius: self.cfg.capture_radius(),
			inner_radius: self.cfg.spacing,
		});
		PrModel { bodies, drag }
	}
}

fn integrate_body(body: &mut Body, cfg: &SimConfig, bounds: &Bounds) {
	for p in body.points_mut() {
		bounds.collide(p, cfg.wall_damping);
		p.integrate(cfg);
	}
}

#[cfg(not(feature = "parallel"))]
fn integrate(bodies: &mut [Body], cfg: &SimConfig, bounds: &Bounds) {
	for body in bodies.iter_mut() {
		integrate_body(body, cfg, bounds);
	}
}

// points do not interact during this pass
#[cfg(feature = "parallel")]
fn integrate(bodies: &mut [Body], cfg: &SimConfig, bounds: &Bounds) {
	use rayon::prelude::*;
	bodies
		.par_iter_mut()
		.for_each(|body| integrate_body(body, cfg, bounds));
}
