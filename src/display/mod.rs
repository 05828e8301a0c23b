mod pixel_buffer;

pub use pixel_buffer::PixelBuffer;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::warn;
use sdl2::event::{Event, EventSender};
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::{EventPump, EventSubsystem, Sdl};

use crate::error::InitError;
use crate::presenter::DisplaySurface;

/// Window, renderer and event queue. Lives on the main thread.
pub struct Display {
    canvas: Canvas<Window>,
    event_pump: EventPump,
    events: EventSubsystem,
    _sdl: Sdl,
}

pub struct RenderTarget<'a> {
    texture: Texture<'a>,
}

#[derive(Debug, Clone)]
pub enum InputEvent {
    Quit,
    KeyDown(Keycode),
    /// The render thread left a new frame in the mailbox
    FrameReady,
    Other,
}

/// Custom SDL user event used to wake the event loop
struct FrameReady;

impl Display {
    pub fn open(
        title: &str,
        width: u32,
        height: u32,
    ) -> Result<(Self, TextureCreator<WindowContext>), InitError> {
        let sdl_context = sdl2::init().map_err(InitError::Sdl)?;
        let video_subsystem = sdl_context.video().map_err(InitError::Video)?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .build()
            .map_err(|e| InitError::Window(e.to_string()))?;

        let canvas = window
            .into_canvas()
            .accelerated()
            .build()
            .map_err(|e| InitError::Renderer(e.to_string()))?;

        let texture_creator = canvas.texture_creator();
        let events = sdl_context.event().map_err(InitError::Events)?;
        events
            .register_custom_event::<FrameReady>()
            .map_err(InitError::Events)?;
        let event_pump = sdl_context.event_pump().map_err(InitError::Events)?;

        Ok((
            Self {
                canvas,
                event_pump,
                events,
                _sdl: sdl_context,
            },
            texture_creator,
        ))
    }

    /// Handle the render thread uses to submit frames
    pub fn surface(&self, mailbox: Arc<FrameMailbox>) -> SdlSurface {
        SdlSurface {
            mailbox,
            sender: self.events.event_sender(),
        }
    }

    /// Block until the next event of interest
    pub fn wait_event(&mut self) -> InputEvent {
        let event = self.event_pump.wait_event();
        if event.is_user_event() {
            return match event.as_user_event_type::<FrameReady>() {
                Some(FrameReady) => InputEvent::FrameReady,
                None => InputEvent::Other,
            };
        }

        match event {
            Event::Quit { .. } => InputEvent::Quit,
            Event::KeyDown {
                keycode: Some(k),
                repeat: false,
                ..
            } => InputEvent::KeyDown(k),
            _ => InputEvent::Other,
        }
    }

    /// Upload the latest mailbox frame and show it. Upload failures are
    /// logged and the frame is dropped.
    pub fn present(&mut self, target: &mut RenderTarget, mailbox: &FrameMailbox) {
        let mut pending = mailbox.lock();
        pending.fresh = false;

        if let Some(title) = pending.title.take() {
            if let Err(e) = self.canvas.window_mut().set_title(&title) {
                warn!("Failed to set window title: {}", e);
            }
        }

        let frame = &pending.frame;
        if let Err(e) = target
            .texture
            .update(None, frame.as_bytes(), frame.pitch())
        {
            warn!("Texture upload failed: {}", e);
            return;
        }
        drop(pending);

        self.canvas.clear();
        if let Err(e) = self.canvas.copy(&target.texture, None, None) {
            warn!("Texture copy failed: {}", e);
            return;
        }
        self.canvas.present();
    }
}

impl<'a> RenderTarget<'a> {
    pub fn with_size(
        texture_creator: &'a TextureCreator<WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<Self, InitError> {
        let texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::RGBA8888, width, height)
            .map_err(|e| InitError::Texture(e.to_string()))?;
        Ok(Self { texture })
    }
}

struct Pending {
    frame: PixelBuffer,
    title: Option<String>,
    fresh: bool,
}

/// Latest frame handed from the render thread to the main thread
pub struct FrameMailbox {
    pending: Mutex<Pending>,
}

impl FrameMailbox {
    pub fn new(width: u32, height: u32) -> Self {
        let mut frame = PixelBuffer::with_size(width, height);
        frame.clear(0x000000FF);
        Self {
            pending: Mutex::new(Pending {
                frame,
                title: None,
                fresh: false,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Pending> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a frame. Returns true if the main thread needs waking,
    /// false if an unpresented frame was simply replaced.
    fn post_frame(&self, frame: &PixelBuffer) -> bool {
        let mut pending = self.lock();
        if !pending.frame.copy_from(frame) {
            warn!(
                "Dropping {}x{} frame for {}x{} surface",
                frame.width(),
                frame.height(),
                pending.frame.width(),
                pending.frame.height()
            );
            return false;
        }
        !std::mem::replace(&mut pending.fresh, true)
    }

    fn post_title(&self, text: &str) {
        self.lock().title = Some(text.to_string());
    }
}

/// `Send` side of the display: fills the mailbox and pokes the event loop
pub struct SdlSurface {
    mailbox: Arc<FrameMailbox>,
    sender: EventSender,
}

impl DisplaySurface for SdlSurface {
    fn submit_frame(&mut self, frame: &PixelBuffer) {
        if self.mailbox.post_frame(frame) {
            if let Err(e) = self.sender.push_custom_event(FrameReady) {
                warn!("Failed to queue frame event: {}", e);
            }
        }
    }

    fn set_title(&mut self, text: &str) {
        self.mailbox.post_title(text);
    }
}
