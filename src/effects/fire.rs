//! DOOM-style fire propagation
//!
//! Each step pulls every cell one row up from the cell below it, with a
//! one-in-five chance of losing a unit of intensity and a random one-column
//! sideways drift. The bottom row is the fire source and is only ever changed
//! by ignition, never by the propagation itself.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::color::{colorize, MAX_INTENSITY};
use crate::display::PixelBuffer;

/// Decay picks are drawn uniformly from `0..=DECAY_PICK_MAX`
pub const DECAY_PICK_MAX: u8 = 4;
/// A decay pick equal to this value costs the cell one unit of intensity
pub const DECAY_SENTINEL: u8 = 0;

/// Source of the per-cell random draws used by [`FireSimulator::step`]
pub trait Flicker {
    /// Uniform pick in `0..=DECAY_PICK_MAX`
    fn decay_pick(&mut self) -> u8;

    /// Uniform horizontal drift in `-1..=1`
    fn drift(&mut self) -> i8;
}

impl<R: Rng> Flicker for R {
    #[inline]
    fn decay_pick(&mut self) -> u8 {
        self.gen_range(0..=DECAY_PICK_MAX)
    }

    #[inline]
    fn drift(&mut self) -> i8 {
        self.gen_range(-1..=1)
    }
}

/// Intensity grid plus the generator that drives it
pub struct FireSimulator<F = ChaCha8Rng> {
    cells: Vec<u8>,
    /// Previous generation, read by `step`
    prev: Vec<u8>,
    width: usize,
    height: usize,
    flicker: F,
}

impl FireSimulator<ChaCha8Rng> {
    /// Create a cold grid driven by a ChaCha generator seeded with `seed`
    pub fn seeded(width: usize, height: usize, seed: u64) -> Self {
        Self::with_flicker(width, height, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<F: Flicker> FireSimulator<F> {
    /// Create a cold grid driven by an injected draw source
    pub fn with_flicker(width: usize, height: usize, flicker: F) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            cells: vec![0; width * height],
            prev: vec![0; width * height],
            width,
            height,
            flicker,
        }
    }

    /// All cells, row-major, row 0 at the top
    #[cfg(test)]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// One row of cells
    #[cfg(test)]
    pub fn row(&self, y: usize) -> &[u8] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    /// Overwrite one row, clamping the value to the palette range
    pub fn fill_row(&mut self, y: usize, value: u8) {
        let value = value.min(MAX_INTENSITY);
        let start = y * self.width;
        self.cells[start..start + self.width].fill(value);
    }

    /// Overwrite one row from a slice, clamping each value
    #[cfg(test)]
    pub fn set_row(&mut self, y: usize, values: &[u8]) {
        let start = y * self.width;
        for (cell, &v) in self.cells[start..start + self.width]
            .iter_mut()
            .zip(values)
        {
            *cell = v.min(MAX_INTENSITY);
        }
    }

    /// Index of the source row
    #[inline]
    pub fn source_row(&self) -> usize {
        self.height - 1
    }

    /// Advance the whole grid by one generation.
    ///
    /// Column-major, rows ascending from 1: each cell at `(x, y)` is copied,
    /// possibly decayed and drifted, into row `y - 1`. Sources are read from
    /// the grid as it was before the call, so a value moves at most one row
    /// per step even when a drift lands it in a column not yet visited.
    pub fn step(&mut self) {
        let width = self.width;
        self.prev.copy_from_slice(&self.cells);
        for x in 0..width {
            for y in 1..self.height {
                let decay = u8::from(self.flicker.decay_pick() == DECAY_SENTINEL);
                let drift = match self.flicker.drift().signum() {
                    -1 if x == 0 => 0,
                    1 if x + 1 == width => 0,
                    d => d,
                };

                let src = self.prev[y * width + x];
                let dst_x = x.saturating_add_signed(isize::from(drift));
                self.cells[(y - 1) * width + dst_x] = src.max(decay) - decay;
            }
        }
    }

    /// Map every cell through the palette into `frame`
    pub fn colorize_into(&self, frame: &mut PixelBuffer) {
        colorize(&self.cells, frame);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Same pick and drift for every draw
    pub(crate) struct Forced {
        pub pick: u8,
        pub drift: i8,
    }

    impl Flicker for Forced {
        fn decay_pick(&mut self) -> u8 {
            self.pick
        }

        fn drift(&mut self) -> i8 {
            self.drift
        }
    }

    /// Replays fixed sequences, wrapping around at the end
    struct Scripted {
        picks: Vec<u8>,
        drifts: Vec<i8>,
        pick_at: usize,
        drift_at: usize,
    }

    impl Scripted {
        fn new(picks: Vec<u8>, drifts: Vec<i8>) -> Self {
            Self {
                picks,
                drifts,
                pick_at: 0,
                drift_at: 0,
            }
        }
    }

    impl Flicker for Scripted {
        fn decay_pick(&mut self) -> u8 {
            let v = self.picks[self.pick_at % self.picks.len()];
            self.pick_at += 1;
            v
        }

        fn drift(&mut self) -> i8 {
            let v = self.drifts[self.drift_at % self.drifts.len()];
            self.drift_at += 1;
            v
        }
    }

    const STILL: Forced = Forced { pick: 3, drift: 0 };

    fn ignited(width: usize, height: usize, seed: u64) -> FireSimulator {
        let mut sim = FireSimulator::seeded(width, height, seed);
        let source = sim.source_row();
        sim.fill_row(source, MAX_INTENSITY);
        sim
    }

    #[test]
    fn test_end_to_end_single_step() {
        let mut sim = FireSimulator::with_flicker(4, 3, STILL);
        sim.set_row(2, &[31, 31, 31, 31]);
        sim.step();

        assert_eq!(sim.row(0), &[0, 0, 0, 0]);
        assert_eq!(sim.row(1), &[31, 31, 31, 31]);
        assert_eq!(sim.row(2), &[31, 31, 31, 31]);
    }

    #[test]
    fn test_decay_drops_one_unit() {
        let mut sim = FireSimulator::with_flicker(
            4,
            2,
            Forced {
                pick: DECAY_SENTINEL,
                drift: 0,
            },
        );
        sim.set_row(1, &[31, 10, 1, 0]);
        sim.step();
        assert_eq!(sim.row(0), &[30, 9, 0, 0]);
    }

    #[test]
    fn test_new_value_never_exceeds_source() {
        let picks: Vec<u8> = (0..37).map(|i| (i * 7 % 5) as u8).collect();
        let drifts: Vec<i8> = (0..23).map(|i| (i % 3) as i8 - 1).collect();
        let mut sim = FireSimulator::with_flicker(1, 2, Scripted::new(picks, drifts));

        for src in 0..=MAX_INTENSITY {
            sim.fill_row(0, MAX_INTENSITY);
            sim.fill_row(1, src);
            sim.step();
            let new = sim.row(0)[0];
            assert!(new <= src, "wrote {} from source {}", new, src);
            assert!(src - new <= 1);
        }
    }

    #[test]
    fn test_left_edge_drift_is_clamped() {
        let mut sim = FireSimulator::with_flicker(4, 2, Forced { pick: 3, drift: -1 });
        sim.set_row(1, &[10, 20, 30, 31]);
        sim.step();
        // x=0 stays in column 0, x=1 then overwrites it
        assert_eq!(sim.row(0), &[20, 30, 31, 0]);
        assert_eq!(sim.row(1), &[10, 20, 30, 31]);
    }

    #[test]
    fn test_right_edge_drift_is_clamped() {
        let mut sim = FireSimulator::with_flicker(4, 2, Forced { pick: 3, drift: 1 });
        sim.set_row(1, &[10, 20, 30, 31]);
        sim.step();
        assert_eq!(sim.row(0), &[0, 10, 20, 31]);
        assert_eq!(sim.row(1), &[10, 20, 30, 31]);
    }

    #[test]
    fn test_rightward_drift_moves_one_row_per_step() {
        let mut sim = FireSimulator::with_flicker(3, 3, Forced { pick: 3, drift: 1 });
        sim.fill_row(2, MAX_INTENSITY);
        sim.step();

        assert_eq!(sim.row(0), &[0, 0, 0]);
        assert_eq!(sim.row(1), &[0, 31, 31]);
        assert_eq!(sim.row(2), &[31, 31, 31]);

        sim.step();
        assert_eq!(sim.row(0), &[0, 0, 31]);
    }

    #[test]
    fn test_leftward_drift_moves_one_row_per_step() {
        let mut sim = FireSimulator::with_flicker(4, 4, Forced { pick: 3, drift: -1 });
        sim.fill_row(3, MAX_INTENSITY);
        sim.step();

        assert_eq!(sim.row(0), &[0, 0, 0, 0]);
        assert_eq!(sim.row(1), &[0, 0, 0, 0]);
        assert_eq!(sim.row(2), &[31, 31, 31, 0]);
    }

    #[test]
    fn test_single_column_grid_survives_any_drift() {
        for drift in [-1, 0, 1] {
            for pick in 0..=DECAY_PICK_MAX {
                let mut sim = FireSimulator::with_flicker(1, 3, Forced { pick, drift });
                sim.fill_row(2, MAX_INTENSITY);
                sim.step();
                sim.step();
                assert!(sim.cells().iter().all(|&v| v <= MAX_INTENSITY));
            }
        }
    }

    #[test]
    fn test_cold_grid_stays_cold() {
        let mut sim = FireSimulator::seeded(16, 12, 99);
        sim.step();
        assert!(sim.cells().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_extinguished_grid_converges_to_zero() {
        let mut sim = ignited(8, 6, 1234);
        for _ in 0..50 {
            sim.step();
        }
        assert!(sim.cells().iter().any(|&v| v > 0));

        let source = sim.source_row();
        sim.fill_row(source, 0);
        for _ in 0..500 {
            sim.step();
        }
        assert!(sim.cells().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_values_stay_in_palette_range() {
        let mut sim = ignited(32, 24, 7);
        for _ in 0..200 {
            sim.step();
            assert!(sim.cells().iter().all(|&v| v <= MAX_INTENSITY));
        }
    }

    #[test]
    fn test_source_row_untouched_by_step() {
        let mut sim = ignited(20, 10, 42);
        for _ in 0..100 {
            sim.step();
        }
        assert!(sim.row(9).iter().all(|&v| v == MAX_INTENSITY));
    }

    #[test]
    fn test_replay_with_same_draws_is_identical() {
        let mut a = ignited(24, 16, 0xF1E3);
        let mut b = ignited(24, 16, 0xF1E3);
        for _ in 0..40 {
            a.step();
            b.step();
        }
        assert_eq!(a.cells(), b.cells());

        let script = || {
            Scripted::new(
                vec![0, 4, 2, 0, 1, 3, 0],
                vec![-1, 0, 1, 1, -1, 0, 0, 1],
            )
        };
        let mut c = FireSimulator::with_flicker(6, 5, script());
        let mut d = FireSimulator::with_flicker(6, 5, script());
        c.fill_row(4, MAX_INTENSITY);
        d.fill_row(4, MAX_INTENSITY);
        for _ in 0..10 {
            c.step();
            d.step();
        }
        assert_eq!(c.cells(), d.cells());
    }

    #[test]
    fn test_rng_draws_cover_expected_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let draws = 20_000;
        let mut decays = 0;
        let mut drift_seen = [false; 3];

        for _ in 0..draws {
            let pick = rng.decay_pick();
            assert!(pick <= DECAY_PICK_MAX);
            if pick == DECAY_SENTINEL {
                decays += 1;
            }
            let drift = rng.drift();
            assert!((-1..=1).contains(&drift));
            drift_seen[(drift + 1) as usize] = true;
        }

        let rate = decays as f64 / draws as f64;
        assert!((0.18..0.22).contains(&rate), "decay rate {}", rate);
        assert!(drift_seen.iter().all(|&seen| seen));
    }

    #[test]
    fn test_set_row_clamps_to_palette() {
        let mut sim = FireSimulator::with_flicker(3, 2, STILL);
        sim.set_row(1, &[200, 31, 32]);
        assert_eq!(sim.row(1), &[31, 31, 31]);
    }
}
