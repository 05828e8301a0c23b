use std::time::Duration;

pub const DEFAULT_WIDTH: u32 = 640;
pub const DEFAULT_HEIGHT: u32 = 480;
/// Sleep after each frame; ~50 Hz
pub const FRAME_DELAY: Duration = Duration::from_millis(20);
pub const FPS_REPORT_INTERVAL: Duration = Duration::from_secs(1);
pub const TITLE: &str = "DOOM Fire";

/// Startup settings. Everything but the seed is fixed at compile time.
#[derive(Debug, Clone)]
pub struct FireConfig {
    pub width: u32,
    pub height: u32,
    pub frame_delay: Duration,
    pub fps_interval: Duration,
    pub title: &'static str,
    pub seed: u64,
}

impl Default for FireConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            frame_delay: FRAME_DELAY,
            fps_interval: FPS_REPORT_INTERVAL,
            title: TITLE,
            seed: rand::random(),
        }
    }
}
