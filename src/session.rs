//! Shared fire state
//!
//! The render loop and the input loop both hold an `Arc<FireSession>`.
//! A single mutex guards the intensity grid together with the ignition
//! state, so a toggle never lands in the middle of a step/colorize pass.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use rand_chacha::ChaCha8Rng;

use crate::display::PixelBuffer;
use crate::effects::color::MAX_INTENSITY;
use crate::effects::{FireSimulator, Flicker};

/// Whether the source row is burning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ignition {
    #[default]
    Off,
    On,
}

impl Ignition {
    pub fn toggled(self) -> Self {
        match self {
            Ignition::Off => Ignition::On,
            Ignition::On => Ignition::Off,
        }
    }

    /// Value written across the source row on entering this state
    pub fn source_intensity(self) -> u8 {
        match self {
            Ignition::Off => 0,
            Ignition::On => MAX_INTENSITY,
        }
    }

    pub fn is_on(self) -> bool {
        self == Ignition::On
    }
}

impl fmt::Display for Ignition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ignition::Off => write!(f, "Fire Off"),
            Ignition::On => write!(f, "Fire On"),
        }
    }
}

struct FireState<F> {
    simulator: FireSimulator<F>,
    ignition: Ignition,
}

pub struct FireSession<F = ChaCha8Rng> {
    state: Mutex<FireState<F>>,
    exit: AtomicBool,
}

impl<F: Flicker> FireSession<F> {
    /// Wrap a simulator; the fire starts extinguished
    pub fn new(simulator: FireSimulator<F>) -> Self {
        Self {
            state: Mutex::new(FireState {
                simulator,
                ignition: Ignition::Off,
            }),
            exit: AtomicBool::new(false),
        }
    }

    // A panic elsewhere can't leave the grid out of range, so poisoning is ignored
    fn lock(&self) -> MutexGuard<'_, FireState<F>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Flip ignition and reseed the source row to match. Returns the new state.
    pub fn toggle_ignition(&self) -> Ignition {
        let mut state = self.lock();
        let next = state.ignition.toggled();
        let source = state.simulator.source_row();
        state.simulator.fill_row(source, next.source_intensity());
        state.ignition = next;
        next
    }

    #[cfg(test)]
    pub fn ignition(&self) -> Ignition {
        self.lock().ignition
    }

    /// One critical section: step the grid once and colorize it into `frame`.
    /// Returns the ignition state seen during the step.
    pub fn advance(&self, frame: &mut PixelBuffer) -> Ignition {
        let mut state = self.lock();
        state.simulator.step();
        state.simulator.colorize_into(frame);
        state.ignition
    }

    /// Run `f` against the grid while holding the lock
    #[cfg(test)]
    pub fn inspect<T>(&self, f: impl FnOnce(&FireSimulator<F>) -> T) -> T {
        f(&self.lock().simulator)
    }

    /// Ask the render loop to stop after its current iteration
    pub fn request_exit(&self) {
        self.exit.store(true, Ordering::Release);
    }

    pub fn exit_requested(&self) -> bool {
        self.exit.load(Ordering::Acquire)
    }
}
