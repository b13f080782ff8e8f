use std::time::Instant;

use clap::Parser;
use jelly::{Scenario, World};

#[derive(Parser, Debug)]
struct Args {
	/// frames to simulate
	#[arg(short, long, default_value_t = 600)]
	frames: usize,
	/// relaxation iterations per frame
	#[arg(short, long)]
	iterations: Option<usize>,
}

fn main() -> anyhow::Result<()> {
	let args = Args::parse();
	let mut scenario = Scenario::default();
	if let Some(n) = args.iterations {
		scenario.sim.iterations = n;
	}
	let mut world = World::from_scenario(&scenario)?;
	let start = Instant::now();
	for _ in 0..args.frames {
		world.step();
	}
	let duration = start.elapsed().as_secs_f32();
	// share of a 60 Hz frame budget
	let load = duration / args.frames as f32 * 60.0;
	eprintln!(
		"{} frames, {} points, {} joints: {:.3} ms/frame, {:.3}%",
		args.frames,
		world.point_len(),
		world.joint_len(),
		duration * 1e3 / args.frames as f32,
		load * 100.0,
	);
	Ok(())
}
