pub mod pr_model;
pub mod sock;
pub mod user_event;

use pr_model::PrModel;

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
	#[error("codec: {0}")]
	Codec(#[from] bincode::Error),
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	#[error("frame of {0} bytes exceeds the read buffer")]
	Oversized(usize),
}

pub type Result<T> = std::result::Result<T, ProtocolError>;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub enum Message {
	WorldUpdate(PrModel),
	Nop,
}

impl Message {
	pub fn to_bytes(&self) -> Result<Vec<u8>> {
		Ok(bincode::serialize(&self)?)
	}

	pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
		Ok(bincode::deserialize(bytes)?)
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::pr_model::{PrBody, PrDrag};

	#[test]
	fn test_world_update_bytes() {
		let model = PrModel {
			bodies: vec![PrBody {
				id: 3,
				hue: 42.0,
				outline: vec![[0., 0.], [14., 0.], [14., 14.], [0., 14.]],
			}],
			drag: Some(PrDrag {
				center: [5., 5.],
				radius: 70.,
				inner_radius: 14.,
			}),
		};
		let msg = Message::WorldUpdate(model);
		let bytes = msg.to_bytes().unwrap();
		assert_eq!(Message::from_bytes(&bytes).unwrap(), msg);
	}

	#[test]
	fn test_garbage_is_error() {
		assert!(Message::from_bytes(&[0xff, 0xff, 0xff, 0xff, 0xff]).is_err());
	}
}
