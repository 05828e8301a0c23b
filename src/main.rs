mod config;
mod display;
mod effects;
mod error;
mod presenter;
mod session;
mod util;

use std::sync::Arc;
use std::thread;

use anyhow::Context;
use log::{error, info};
use sdl2::keyboard::Keycode;

use config::FireConfig;
use display::{Display, FrameMailbox, InputEvent, PixelBuffer, RenderTarget};
use effects::FireSimulator;
use presenter::Presenter;
use session::FireSession;
use util::FpsCounter;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = FireConfig::default();
    let (width, height) = (config.width, config.height);

    info!("=== {} ===", config.title);
    info!("Resolution: {}x{}", width, height);
    info!("Frame delay: {:?}, seed: {:#018x}", config.frame_delay, config.seed);
    info!("Controls: Space - toggle fire, Escape - quit");

    // Drop order releases these in reverse: texture, renderer/window, SDL
    let (mut display, texture_creator) = Display::open(config.title, width, height)
        .inspect_err(|e| error!("{}", e))
        .context("failed to open display")?;
    let mut target = RenderTarget::with_size(&texture_creator, width, height)
        .inspect_err(|e| error!("{}", e))
        .context("failed to create fire texture")?;

    let mailbox = Arc::new(FrameMailbox::new(width, height));
    let session = Arc::new(FireSession::new(FireSimulator::seeded(
        width as usize,
        height as usize,
        config.seed,
    )));

    let presenter = Presenter::new(
        display.surface(Arc::clone(&mailbox)),
        PixelBuffer::with_size(width, height),
        FpsCounter::new(config.fps_interval),
        config.frame_delay,
        config.title,
    );
    let render_thread = {
        let session = Arc::clone(&session);
        thread::Builder::new()
            .name("render".to_string())
            .spawn(move || {
                presenter.run(&session);
            })
            .context("failed to spawn render thread")?
    };

    loop {
        match display.wait_event() {
            InputEvent::Quit | InputEvent::KeyDown(Keycode::Escape) => break,
            InputEvent::KeyDown(Keycode::Space) => {
                let ignition = session.toggle_ignition();
                if ignition.is_on() {
                    info!("Fire lit");
                } else {
                    info!("Fire extinguished");
                }
            },
            InputEvent::FrameReady => display.present(&mut target, &mailbox),
            InputEvent::KeyDown(_) | InputEvent::Other => {},
        }
    }

    session.request_exit();
    if render_thread.join().is_err() {
        error!("Render thread panicked");
    }

    info!("Bye");
    Ok(())
}
