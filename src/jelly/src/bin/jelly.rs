use std::path::PathBuf;
use std::sync::mpsc::channel;

use anyhow::Result;
use clap::Parser;

use jelly::runner::Runner;
use jelly::{Scenario, World};
use protocol::sock::{SockServer, DEFAULT_SOCKET};
use protocol::user_event::UserEvent;
use protocol::Message;

#[derive(Parser, Debug)]
struct Args {
	/// scenario file (YAML), the four-square demo when omitted
	#[arg(short, long)]
	scenario: Option<PathBuf>,
	/// stop after this many frames
	#[arg(short, long)]
	frames: Option<u64>,
	#[arg(long)]
	seed: Option<u64>,
	/// publish frames on a unix socket
	#[arg(long)]
	socket: Option<Option<PathBuf>>,
}

fn load_scenario(args: &Args) -> Result<Scenario> {
	let mut scenario = match &args.scenario {
		Some(path) => Scenario::load(path)?,
		None => Scenario::default(),
	};
	if let Some(seed) = args.seed {
		scenario.seed = seed;
	}
	Ok(scenario)
}

fn main() -> Result<()> {
	let args = Args::parse();
	let scenario = load_scenario(&args)?;
	let world = World::from_scenario(&scenario)?;
	eprintln!(
		"INFO: {} bodies, {} points, {} joints",
		world.bodies().len(),
		world.point_len(),
		world.joint_len()
	);

	let mut server = match &args.socket {
		Some(path) => Some(SockServer::bind(
			path.clone().unwrap_or_else(|| DEFAULT_SOCKET.into()),
		)?),
		None => None,
	};

	let (tx, rx) = channel();
	// kept alive for the lifetime of the run; input is out of scope here
	let (_ctx, crx) = channel();
	let sim = std::thread::spawn(move || {
		let mut runner = Runner::new(world);
		runner.run_thread(tx, crx);
	});

	while let Ok(UserEvent::Update(model, info)) = rx.recv() {
		if let Some(server) = server.as_mut() {
			server.send_msg(&Message::WorldUpdate(model))?;
		}
		if args.frames.map_or(false, |n| info.frame >= n) {
			eprintln!("INFO: done after {} frames", info.frame);
			break;
		}
	}
	drop(rx);
	if sim.join().is_err() {
		anyhow::bail!("simulation thread panicked");
	}
	Ok(())
}
