use instant::Instant;
use vision_core::{
    BeamMode, Channel, Color, LightType, RgbModel, SingleBulbModel, MANUAL_STEP_DT,
};

pub const DEFAULT_FIXED_DT: f32 = MANUAL_STEP_DT; // headless runs step at a nominal 60 fps

/// Which screen the driver runs.
pub enum Screen {
    Rgb(RgbModel),
    SingleBulb(SingleBulbModel),
}

impl Screen {
    fn step(&mut self, dt: f32) {
        match self {
            Screen::Rgb(m) => m.step(dt),
            Screen::SingleBulb(m) => m.step(dt),
        }
    }

    pub fn perceived_color(&self) -> Color {
        match self {
            Screen::Rgb(m) => m.perceived_color(),
            Screen::SingleBulb(m) => m.perceived_color(),
        }
    }

    /// Photons a renderer would paint this frame.
    pub fn renderable_count(&self) -> usize {
        match self {
            Screen::Rgb(m) => m
                .beams()
                .iter()
                .map(|b| b.renderable_photons().count())
                .sum(),
            Screen::SingleBulb(m) => m.beam().renderable_photons().count(),
        }
    }

    /// Size in bytes of a flat snapshot of all live photons.
    pub fn snapshot_bytes(&self) -> usize {
        match self {
            Screen::Rgb(m) => m
                .snapshot()
                .iter()
                .map(|records| bytemuck::cast_slice::<_, u8>(records.as_slice()).len())
                .sum(),
            Screen::SingleBulb(m) => bytemuck::cast_slice::<_, u8>(m.snapshot().as_slice()).len(),
        }
    }
}

/// Scripted control changes, standing in for the UI layer.
fn apply_script(screen: &mut Screen, frame: u64, total: u64) {
    let phase = total / 4;
    match screen {
        Screen::Rgb(m) => {
            if frame == 0 {
                m.set_intensity(Channel::Red, 255.0);
                m.set_intensity(Channel::Green, 128.0);
            } else if frame == phase * 2 {
                m.set_intensity(Channel::Blue, 200.0);
                log::info!("[script] blue on");
            } else if frame == phase * 3 {
                m.set_intensity(Channel::Red, 0.0);
                log::info!("[script] red off");
            }
        }
        Screen::SingleBulb(m) => {
            if frame == 0 {
                m.set_display_mode(BeamMode::Photon);
                m.set_source_wavelength(565.0);
                m.set_source_on(true);
            } else if frame == phase {
                m.set_filter_wavelength(550.0);
                m.set_filter_enabled(true);
                log::info!("[script] filter on at 550nm");
            } else if frame == phase * 2 {
                m.set_light_type(LightType::White);
                log::info!("[script] white light");
            } else if frame == phase * 3 {
                m.set_source_on(false);
                log::info!("[script] source off");
            }
        }
    }
}

/// Per-run driver state: the model plus frame bookkeeping.
pub struct FrameContext {
    pub screen: Screen,
    pub frame: u64,
    pub total_frames: u64,
    pub log_every: u64,
    pub fixed_dt: Option<f32>,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn new(screen: Screen, total_frames: u64, fixed_dt: Option<f32>) -> Self {
        Self {
            screen,
            frame: 0,
            total_frames,
            log_every: 30,
            fixed_dt,
            last_instant: Instant::now(),
        }
    }

    /// Run one frame. Returns false once every frame has run.
    pub fn frame(&mut self) -> bool {
        if self.frame >= self.total_frames {
            return false;
        }
        let now = Instant::now();
        let wall_dt = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;
        let dt = self.fixed_dt.unwrap_or(wall_dt);

        apply_script(&mut self.screen, self.frame, self.total_frames);
        self.screen.step(dt);

        if self.frame % self.log_every == 0 {
            let c = self.screen.perceived_color();
            log::info!(
                "[frame {}] perceived=({}, {}, {}, {:.2}) photons={}",
                self.frame,
                c.r,
                c.g,
                c.b,
                c.a,
                self.screen.renderable_count()
            );
        }
        self.frame += 1;
        true
    }
}
