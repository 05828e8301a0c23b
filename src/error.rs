use std::error::Error;
use std::fmt;

/// Startup failures. Each one is fatal; nothing can fail once the window is up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitError {
    Sdl(String),
    Video(String),
    Window(String),
    Renderer(String),
    Texture(String),
    Events(String),
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::Sdl(e) => write!(f, "SDL_Init error: {}", e),
            InitError::Video(e) => write!(f, "SDL video subsystem error: {}", e),
            InitError::Window(e) => write!(f, "SDL_CreateWindow error: {}", e),
            InitError::Renderer(e) => write!(f, "SDL_CreateRenderer error: {}", e),
            InitError::Texture(e) => write!(f, "SDL_CreateTexture error: {}", e),
            InitError::Events(e) => write!(f, "SDL event setup error: {}", e),
        }
    }
}

impl Error for InitError {}
