use crate::pr_model::PrModel;

#[derive(Debug)]
pub enum UserEvent {
	Update(PrModel, UpdateInfo),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateInfo {
	// step time / frame time
	pub load: f32,
	pub frame: u64,
	pub point_len: usize,
	pub joint_len: usize,
}
