//! Render loop
//!
//! Steps the fire, colorizes it and hands each finished frame to a
//! [`DisplaySurface`], pacing itself with a fixed sleep between frames.

use std::thread;
use std::time::Duration;

use log::debug;

use crate::display::PixelBuffer;
use crate::effects::Flicker;
use crate::session::{FireSession, Ignition};
use crate::util::FpsCounter;

/// Where finished frames go. Implemented by the SDL glue and by test doubles.
pub trait DisplaySurface {
    /// Present one full frame; dimensions match the surface's
    fn submit_frame(&mut self, frame: &PixelBuffer);

    /// Update the human-readable status line
    fn set_title(&mut self, text: &str);
}

/// Status line shown in the window title
pub fn status_text(prefix: &str, ignition: Ignition, fps: u32) -> String {
    format!("{}[{}]    FPS: {}", prefix, ignition, fps)
}

pub struct Presenter<S> {
    surface: S,
    frame: PixelBuffer,
    fps: FpsCounter,
    frame_delay: Duration,
    title: String,
}

impl<S: DisplaySurface> Presenter<S> {
    pub fn new(
        surface: S,
        frame: PixelBuffer,
        fps: FpsCounter,
        frame_delay: Duration,
        title: &str,
    ) -> Self {
        Self {
            surface,
            frame,
            fps,
            frame_delay,
            title: title.to_string(),
        }
    }

    /// One iteration without the trailing sleep: lock, step, colorize,
    /// unlock, then submit and maybe publish a status line
    pub fn present_once<F: Flicker>(&mut self, session: &FireSession<F>) {
        let ignition = session.advance(&mut self.frame);
        self.surface.submit_frame(&self.frame);

        if let Some(fps) = self.fps.tick() {
            self.surface.set_title(&status_text(&self.title, ignition, fps));
        }
    }

    /// Loop until the session asks to exit, then hand the surface back
    pub fn run<F: Flicker>(mut self, session: &FireSession<F>) -> S {
        debug!("render loop started ({:?} per frame)", self.frame_delay);

        let mut frames: u64 = 0;
        while !session.exit_requested() {
            self.present_once(session);
            frames += 1;
            thread::sleep(self.frame_delay);
        }

        debug!("render loop stopped after {} frames", frames);
        self.surface
    }
}
