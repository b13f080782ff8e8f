use std::io::{Read, Write};
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::{Path, PathBuf};

use crate::{Message, ProtocolError, Result};

pub const DEFAULT_SOCKET: &str = "jelly.socket";
const MAX_FRAME: usize = 10_000_000;

// frames are a little-endian u32 length followed by a bincode message
fn write_frame(stream: &mut UnixStream, payload: &[u8]) -> std::io::Result<()> {
	let len = payload.len() as u32;
	stream.write_all(&len.to_le_bytes())?;
	stream.write_all(payload)
}

pub struct SockServer {
	path: PathBuf,
	listener: UnixListener,
	stream: Option<UnixStream>,
}

impl SockServer {
	pub fn bind(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref().to_path_buf();
		let _ = std::fs::remove_file(&path);
		let listener = UnixListener::bind(&path)?;
		eprintln!("INFO: listening on {}", path.display());
		Ok(Self {
			path,
			listener,
			stream: None,
		})
	}

	fn listen(&mut self) -> Result<()> {
		let (stream, _) = self.listener.accept()?;
		self.stream = Some(stream);
		Ok(())
	}

	pub fn is_connected(&self) -> bool {
		self.stream.is_some()
	}

	/// Blocks until a client is connected and the message is written.
	pub fn send_msg(&mut self, msg: &Message) -> Result<()> {
		let bytes = msg.to_bytes()?;
		loop {
			if let Some(stream) = self.stream.as_mut() {
				if write_frame(stream, &bytes).is_ok() {
					return Ok(());
				}
				eprintln!("WARN: client dropped");
				self.stream = None;
			}
			eprintln!("INFO: waiting for connection");
			self.listen()?;
			eprintln!("INFO: connected");
		}
	}
}

impl Drop for SockServer {
	fn drop(&mut self) {
		let _ = std::fs::remove_file(&self.path);
	}
}

pub struct SockClient {
	stream: UnixStream,
	buf: Vec<u8>,
}

impl SockClient {
	pub fn connect(path: impl AsRef<Path>) -> Result<Self> {
		let stream = UnixStream::connect(path)?;
		Ok(Self {
			stream,
			buf: Vec::new(),
		})
	}

	pub fn read_msg(&mut self) -> Result<Message> {
		let mut len = [0u8; 4];
		match self.stream.read_exact(&mut len) {
			Ok(()) => {}
			Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
				return Ok(Message::Nop)
			}
			Err(e) => return Err(e.into()),
		}
		let len = u32::from_le_bytes(len) as usize;
		if len > MAX_FRAME {
			return Err(ProtocolError::Oversized(len));
		}
		self.buf.resize(len, 0);
		self.stream.read_exact(&mut self.buf)?;
		Message::from_bytes(&self.buf)
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::pr_model::{PrBody, PrModel};

	#[test]
	fn test_send_and_read() {
		let path = std::env::temp_dir()
			.join(format!("jelly-test-{}.socket", std::process::id()));
		let mut server = SockServer::bind(&path).unwrap();
		let mut client = SockClient::connect(&path).unwrap();
		let model = PrModel {
			bodies: vec![PrBody {
				id: 0,
				hue: 10.0,
				outline: vec![[1.0, 2.0], [3.0, 4.0]],
			}],
			drag: None,
		};
		let handle = std::thread::spawn(move || {
			server.send_msg(&Message::WorldUpdate(model)).unwrap();
			server.send_msg(&Message::Nop).unwrap();
		});
		match client.read_msg().unwrap() {
			Message::WorldUpdate(m) => assert_eq!(m.vertex_count(), 2),
			Message::Nop => panic!("expected world update"),
		}
		assert_eq!(client.read_msg().unwrap(), Message::Nop);
		handle.join().unwrap();
	}
}
