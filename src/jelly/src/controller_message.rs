use crate::config::{SimConfig, Tunable, SLOW_SPEED};

/// Switches that stay active while their key is held down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
	SlowMotion,
	ZeroGravity,
	InvertGravity,
}

impl Toggle {
	pub fn from_key(key: u8) -> Option<Self> {
		match key {
			b'1' => Some(Toggle::SlowMotion),
			b'2' => Some(Toggle::ZeroGravity),
			b'3' => Some(Toggle::InvertGravity),
			_ => None,
		}
	}

	pub fn tunable(self) -> Tunable {
		match self {
			Toggle::SlowMotion => Tunable::Speed,
			Toggle::ZeroGravity | Toggle::InvertGravity => Tunable::Gravity,
		}
	}

	pub fn held(self, base: &SimConfig) -> f32 {
		match self {
			Toggle::SlowMotion => SLOW_SPEED,
			Toggle::ZeroGravity => 0.0,
			Toggle::InvertGravity => -base.gravity,
		}
	}

	pub fn released(self, base: &SimConfig) -> f32 {
		match self.tunable() {
			Tunable::Speed => base.speed,
			Tunable::Gravity => base.gravity,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControllerMessage {
	TogglePause,
	FrameForward,
	PointerDown([f32; 2]),
	PointerMove([f32; 2]),
	PointerUp,
	Hold(Toggle),
	Unhold(Toggle),
	SetTunable(Tunable, f32),
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_key_bindings() {
		let base = SimConfig::default();
		let slow = Toggle::from_key(b'1').unwrap();
		assert_eq!(slow.held(&base), 0.2);
		assert_eq!(slow.released(&base), 1.0);
		let inv = Toggle::from_key(b'3').unwrap();
		assert_eq!(inv.tunable(), Tunable::Gravity);
		assert_eq!(inv.held(&base), -0.05);
		assert_eq!(inv.released(&base), 0.05);
		assert_eq!(Toggle::from_key(b'2').unwrap().held(&base), 0.0);
		assert_eq!(Toggle::from_key(b'q'), None);
	}
}
