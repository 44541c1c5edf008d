//! Headless cloth driver: drapes a cloth against a moving sphere and logs
//! frame statistics.

use std::path::PathBuf;

use clap::Parser;
use drape::{
    ClothConfig, ClothSimulation, FrameReport, Obstacle, Orientation, StepObserver, Vec3,
};
use ftlog::{appender::FileAppender, LevelFilter, LoggerGuard};

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum Layout {
    Vertical,
    Horizontal,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of node rows.
    #[arg(short('r'), long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    rows: u32,

    /// Number of node columns.
    #[arg(short('c'), long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    cols: u32,

    /// Spring stiffness `ks`.
    #[arg(short('k'), long, default_value_t = 50.0, value_parser = positive)]
    stiffness: f64,

    /// Spring damping `kd`.
    #[arg(short('d'), long, default_value_t = 10.0, value_parser = positive)]
    damping: f64,

    /// Number of frames to simulate.
    #[arg(short('f'), long, default_value_t = 600)]
    frames: usize,

    /// Frames per simulated second.
    #[arg(long, default_value_t = 60.0, value_parser = positive)]
    fps: f64,

    /// Initial layout of the cloth.
    #[arg(short('o'), long, value_enum, default_value_t = Layout::Vertical)]
    orientation: Layout,

    /// Enable aerodynamic drag.
    #[arg(long)]
    drag: bool,

    /// Wind speed along +Z.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true, value_parser = finite)]
    wind: f64,

    /// Radius of the moving sphere.
    #[arg(long, default_value_t = 0.5, value_parser = positive)]
    sphere_radius: f64,

    /// Log a summary every this many frames.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
    report_every: u32,

    /// Write logs to this file instead of stderr.
    #[arg(short('l'), long)]
    log_file: Option<PathBuf>,
}

fn finite(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|e| format!("`{s}` is not a number: {e}"))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("`{s}` is not finite"))
    }
}

fn positive(s: &str) -> Result<f64, String> {
    let v = finite(s)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(format!("`{s}` must be greater than zero"))
    }
}

/// Configures the logger.
///
/// # Errors
///
/// - If the logger could not be initialized.
fn configure_logger(log_file: Option<&PathBuf>) -> Result<LoggerGuard, String> {
    let mut builder = ftlog::Builder::new().max_log_level(LevelFilter::Info);
    if let Some(path) = log_file {
        builder = builder.root(FileAppender::new(path));
    }
    builder.try_init().map_err(|e| e.to_string())
}

/// Tallies work between periodic reports.
#[derive(Default)]
struct FrameStats {
    frames: usize,
    sub_steps: usize,
    dropped: usize,
    contacts: usize,
    deepest: f64,
}

impl StepObserver for FrameStats {
    fn on_frame_complete(&mut self, report: &FrameReport) {
        self.frames += 1;
        self.sub_steps += report.sub_steps;
        self.dropped += report.dropped_sub_steps;
        self.contacts += report.contacts;
        self.deepest = self.deepest.max(report.max_penetration);
    }
}

fn main() -> Result<(), String> {
    let args = Args::parse();
    let _guard = configure_logger(args.log_file.as_ref())?;

    let config = ClothConfig::new()
        .with_stiffness(args.stiffness)
        .with_damping(args.damping)
        .with_drag(args.drag)
        .with_wind(Vec3::new(0.0, 0.0, args.wind));
    let (rows, cols) = (args.rows as usize, args.cols as usize);
    let lattice = config.lattice();
    let mut sim = ClothSimulation::new(rows, cols, config).map_err(|e| e.to_string())?;

    let orientation = match args.orientation {
        Layout::Vertical => Orientation::Vertical,
        Layout::Horizontal => Orientation::Horizontal,
    };
    sim.reset_layout(orientation);

    let mid_x = (cols - 1) as f64 * lattice.dx / 2.0;
    let mut ball = match orientation {
        // Sweeps back and forth through the hanging sheet.
        Orientation::Vertical => {
            let mid_y = lattice.top - (rows - 1) as f64 * lattice.dy / 2.0;
            Obstacle::new(Vec3::new(mid_x, mid_y, -2.0), args.sphere_radius)
                .with_velocity(Vec3::new(0.0, 0.0, 1.0))
        }
        // Waits under the middle of the falling sheet.
        Orientation::Horizontal => {
            let mid_z = (rows - 1) as f64 * lattice.dy / 2.0;
            Obstacle::new(Vec3::new(mid_x, lattice.top - 1.0, mid_z), args.sphere_radius)
        }
    };

    ftlog::info!(
        "simulating {rows}x{cols} cloth for {} frames (ks={}, kd={}, {orientation:?})",
        args.frames, args.stiffness, args.damping,
    );

    let dt = 1.0 / args.fps;
    let mut stats = FrameStats::default();
    for frame in 1..=args.frames {
        ball.advance(dt);
        if ball.center.z.abs() > 2.0 {
            ball.velocity = -ball.velocity;
        }
        sim.step(dt, std::slice::from_ref(&ball), &mut stats);

        if frame % args.report_every as usize == 0 {
            let energy = sim.energy();
            ftlog::info!(
                "frame {frame}: {} sub-steps over {} frames ({} dropped), {} contacts (deepest {:.4}), energy {:.4}",
                stats.sub_steps, stats.frames, stats.dropped, stats.contacts, stats.deepest, energy.total(),
            );
            stats = FrameStats::default();
        }
    }

    let frame = sim.render_frame();
    let lowest = frame.positions.iter().map(|p| p[1]).fold(f32::INFINITY, f32::min);
    ftlog::info!("done: lowest node at y={lowest:.4}, {} triangles", sim.topology().triangles().len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_parameters_must_be_positive() {
        for flag in ["--stiffness", "--damping"] {
            assert!(Args::try_parse_from(["drape", flag, "0"]).is_err(), "{flag} accepted 0");
            assert!(Args::try_parse_from(["drape", flag, "abc"]).is_err());
        }
        assert!(Args::try_parse_from(["drape", "--rows", "0"]).is_err());
        let args = Args::try_parse_from(["drape", "--damping", "2.5", "--cols", "4"]).unwrap();
        assert_eq!((args.damping, args.cols), (2.5, 4));
    }
}
