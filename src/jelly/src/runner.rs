use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::time::{Duration, Instant};

use crate::controller_message::ControllerMessage;
use crate::world::World;
use protocol::user_event::{UpdateInfo, UserEvent};

pub struct Runner {
	world: World,
	// seconds per frame
	pub frame_time: f32,

	// -1: always play
	// 0: pause
	// n: play n frames
	forward_frames: i32,
}

impl Runner {
	pub fn new(world: World) -> Self {
		Self {
			world,
			frame_time: 1.0 / 60.0,
			forward_frames: -1,
		}
	}

	pub fn with_frame_time(mut self, frame_time: f32) -> Self {
		self.frame_time = frame_time;
		self
	}

	pub fn with_paused(mut self) -> Self {
		self.forward_frames = 0;
		self
	}

	pub fn world(&self) -> &World {
		&self.world
	}

	pub fn is_paused(&self) -> bool {
		self.forward_frames == 0
	}

	pub fn run(&mut self, frames: usize) {
		for _ in 0..frames {
			self.world.step();
		}
	}

	pub fn handle(&mut self, msg: ControllerMessage) {
		match msg {
			ControllerMessage::TogglePause => {
				if self.forward_frames == 0 {
					self.forward_frames = -1;
				} else {
					self.forward_frames = 0;
				}
			}
			ControllerMessage::FrameForward => {
				if self.forward_frames == 0 {
					self.forward_frames += 1;
				}
			}
			msg => self.world.apply(msg),
		}
	}

	fn info(&self, load: f32) -> UpdateInfo {
		UpdateInfo {
			load,
			frame: self.world.frame(),
			point_len: self.world.point_len(),
			joint_len: self.world.joint_len(),
		}
	}

	// Controller messages are only applied between frames, so a frame
	// always sees one consistent set of tunables.
	pub fn run_thread(
		&mut self,
		tx: Sender<UserEvent>,
		rx: Receiver<ControllerMessage>,
	) {
		let rtime = Duration::from_secs_f32(self.frame_time);
		let mut load = 0.0;
		let mut reported = 0u64;
		loop {
			let start_time = Instant::now();
			loop {
				match rx.try_recv() {
					Ok(msg) => self.handle(msg),
					Err(TryRecvError::Empty) => break,
					Err(TryRecvError::Disconnected) => {
						eprintln!("INFO: controller gone, stopping");
						return;
					}
				}
			}
			if self.forward_frames != 0 {
				if self.forward_frames > 0 {
					self.forward_frames -= 1;
				}
				self.world.step();
				load = start_time.elapsed().as_secs_f32() / self.frame_time;
				if load > 1.0 {
					eprintln!("WARN: frame {} over budget", self.world.frame());
				}
				let event =
					UserEvent::Update(self.world.render(), self.info(load));
				if tx.send(event).is_err() {
					eprintln!("INFO: renderer gone, stopping");
					return;
				}
			}
			let frame = self.world.frame();
			if frame >= reported + 600 {
				reported = frame;
				eprintln!("INFO: frame {} load {:.2}%", frame, load * 100.0);
			}
			let elapsed = start_time.elapsed();
			if elapsed < rtime {
				std::thread::sleep(rtime - elapsed);
			}
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::boundary::Bounds;
	use crate::config::SimConfig;
	use crate::controller_message::Toggle;
	use std::sync::mpsc::channel;

	fn runner() -> Runner {
		let mut world =
			World::new(Bounds::default(), SimConfig::default(), 3).unwrap();
		world.create_body(3, 3, 14.0, 0.0).unwrap();
		Runner::new(world).with_frame_time(0.001)
	}

	#[test]
	fn test_pause_and_forward() {
		let mut r = runner().with_paused();
		assert!(r.is_paused());
		r.handle(ControllerMessage::FrameForward);
		assert!(!r.is_paused());
		r.handle(ControllerMessage::TogglePause);
		assert!(r.is_paused());
		r.handle(ControllerMessage::TogglePause);
		assert!(!r.is_paused());
	}

	#[test]
	fn test_messages_reach_world() {
		let mut r = runner();
		r.handle(ControllerMessage::Hold(Toggle::ZeroGravity));
		r.run(1);
		assert_eq!(r.world().config().gravity, 0.0);
		assert_eq!(r.world().frame(), 1);
	}

	#[test]
	fn test_thread_emits_frames() {
		let (tx, rx) = channel();
		let (ctx, crx) = channel();
		let handle = std::thread::spawn(move || {
			let mut r = runner();
			r.run_thread(tx, crx);
			r.world().frame()
		});
		for _ in 0..3 {
			match rx.recv().unwrap() {
				UserEvent::Update(model, info) => {
					assert_eq!(model.bodies.len(), 1);
					assert_eq!(info.point_len, 9);
					assert_eq!(info.joint_len, 12);
				}
			}
		}
		ctx.send(ControllerMessage::TogglePause).unwrap();
		drop(ctx);
		let frames = handle.join().unwrap();
		assert!(frames >= 3);
	}
}
