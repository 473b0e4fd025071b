//! Plain-text dump of a completed trajectory
//!
//! One CSV row per particle per step. Rendering and frame-rate decisions
//! belong to whatever consumes this output.

use std::io::Write;

use trajsim_core::Trajectory;

pub const CSV_HEADER: &str = "step,time,particle,x,y,vx,vy,fx,fy";

pub fn write_csv<W: Write>(trajectory: &Trajectory, mut out: W) -> anyhow::Result<()> {
    writeln!(out, "{CSV_HEADER}")?;
    for step in 0..=trajectory.step_count() {
        let time = trajectory.time_at(step);
        for particle in 0..trajectory.particle_count() {
            let s = trajectory.read(step, particle)?;
            writeln!(
                out,
                "{step},{time},{particle},{},{},{},{},{},{}",
                s.position.x, s.position.y, s.velocity.x, s.velocity.y, s.force.x, s.force.y
            )?;
        }
    }
    out.flush()?;
    Ok(())
}
