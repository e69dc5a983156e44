use clap::{Parser, ValueEnum};
use instant::Instant;
use vision_core::{RgbModel, RgbParams, SingleBulbModel, SingleBulbParams};

mod frame;

use frame::{FrameContext, Screen, DEFAULT_FIXED_DT};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ScreenKind {
    /// Three channel beams mixed into one perceived color
    Rgb,
    /// One bulb with an optional wavelength filter
    Single,
}

#[derive(Parser, Debug)]
#[command(name = "vision-native")]
#[command(about = "Run the color-vision photon model headless with a scripted scenario")]
#[command(version)]
struct Args {
    /// Screen to simulate
    #[arg(value_enum, default_value = "single")]
    screen: ScreenKind,

    /// Number of frames to run
    #[arg(default_value_t = 600)]
    frames: u64,

    /// Seed for the model's random number generator
    #[arg(default_value_t = 42)]
    seed: u64,

    /// Step with measured wall-clock time and sleep between frames
    #[arg(long)]
    realtime: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let screen = match args.screen {
        ScreenKind::Rgb => Screen::Rgb(RgbModel::new(RgbParams::default(), args.seed)?),
        ScreenKind::Single => Screen::SingleBulb(SingleBulbModel::new(
            SingleBulbParams::default(),
            args.seed,
        )?),
    };
    log::info!(
        "vision-native starting: screen={:?} frames={} seed={}",
        args.screen,
        args.frames,
        args.seed
    );

    let fixed_dt = (!args.realtime).then_some(DEFAULT_FIXED_DT);
    let mut ctx = FrameContext::new(screen, args.frames, fixed_dt);
    let started = Instant::now();
    while ctx.frame() {
        if args.realtime {
            std::thread::sleep(std::time::Duration::from_secs_f32(DEFAULT_FIXED_DT));
        }
    }

    let c = ctx.screen.perceived_color();
    log::info!(
        "done: {} frames in {:.1} ms, final perceived=({}, {}, {}, {:.2}), snapshot={} bytes",
        ctx.frame,
        started.elapsed().as_secs_f64() * 1000.0,
        c.r,
        c.g,
        c.b,
        c.a,
        ctx.screen.snapshot_bytes()
    );
    Ok(())
}
