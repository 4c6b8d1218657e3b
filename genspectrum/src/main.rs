use anyhow::bail;
use clap::Parser;
use log::info;
use output::csv::CsvLayout;
use spectrumcore::color::ColorMode;
use spectrumcore::model::KeyframeBlend;
use std::path::PathBuf;
use workflow::config::RunConfig;
use workflow::runner::{OutputTargets, Runner};

mod output;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Render keyframed spectral peaks to CSV, PNG and GIF")]
struct Args {
    /// Keyframe table describing the animated peaks
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,
    /// Load rendering settings from YAML instead of the flags below
    #[arg(long)]
    config: Option<PathBuf>,
    /// Shortest wavelength in nm
    #[arg(short = 'a', long, default_value_t = 380.0)]
    nm_start: f64,
    /// Longest wavelength in nm
    #[arg(short = 'b', long, default_value_t = 750.0)]
    nm_stop: f64,
    /// Duration of the render in seconds
    #[arg(short = 'd', long, default_value_t = 10.0)]
    duration: f64,
    #[arg(long, default_value_t = 15.0)]
    fps: f64,
    /// Number of frames; 0 derives it from duration and fps
    #[arg(long, default_value_t = 0)]
    frames: usize,
    #[arg(long, default_value_t = 800)]
    xreso: u32,
    #[arg(long, default_value_t = 600)]
    yreso: u32,
    /// Simulate visible colors instead of luma-encoded gray
    #[arg(long, default_value_t = false)]
    rgb: bool,
    /// Standard deviation of per-channel pixel noise
    #[arg(long, default_value_t = 0.0)]
    noise: f64,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Replace the peaks with a calibration triangle
    #[arg(long, default_value_t = false)]
    test_triangle: bool,
    /// Blend keyframes with swapped fractions, as earlier releases did
    #[arg(long, default_value_t = false)]
    legacy_blend: bool,
    /// Looping GIF output
    #[arg(short = 'o', long)]
    animation: Option<PathBuf>,
    /// Prefix for per-frame PNG output
    #[arg(long)]
    pic: Option<String>,
    /// CSV output
    #[arg(short = 'c', long)]
    csv: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = CsvLayout::Grid)]
    csv_layout: CsvLayout,
    /// JSON summary of the brightest sample per frame
    #[arg(long)]
    summary: Option<PathBuf>,
}

impl Args {
    fn to_run_config(&self) -> RunConfig {
        RunConfig {
            nm_start: self.nm_start,
            nm_stop: self.nm_stop,
            duration_s: self.duration,
            fps: self.fps,
            frames: self.frames,
            xreso: self.xreso,
            yreso: self.yreso,
            color_mode: ColorMode::from_rgb_flag(self.rgb),
            noise_amplitude: self.noise,
            seed: self.seed,
            test_triangle: self.test_triangle,
            blend: if self.legacy_blend {
                KeyframeBlend::LegacyCrossed
            } else {
                KeyframeBlend::Independent
            },
        }
    }

    fn output_targets(&self) -> OutputTargets {
        OutputTargets {
            csv: self.csv.clone(),
            csv_layout: self.csv_layout,
            animation: self.animation.clone(),
            image_prefix: self.pic.clone(),
            summary: self.summary.clone(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let run_config = if let Some(path) = &args.config {
        RunConfig::load(path)?
    } else {
        args.to_run_config()
    };

    let runner = Runner::new(run_config);
    let frames = runner.render(args.input.as_deref())?;
    info!(
        "rendered {} frames over {}..{}nm",
        frames.len(),
        runner.config().nm_start,
        runner.config().nm_stop
    );

    let metrics = runner.write_outputs(&frames, &args.output_targets());
    println!(
        "frames {}, outputs written {}, failed {}",
        metrics.frames_rendered, metrics.outputs_written, metrics.outputs_failed
    );
    if metrics.outputs_failed > 0 {
        bail!("{} output(s) failed", metrics.outputs_failed);
    }

    Ok(())
}
