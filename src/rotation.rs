//! Timed rotators: the "Trusted By" logo grid and the goal hero carousel
//!
//! Both are advanced with elapsed milliseconds from the host, and the logo
//! grid draws from a seeded RNG so a run can be replayed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Logo slots shown at once
pub const GRID_SIZE: usize = 6;
/// Time between logo swaps
pub const LOGO_SWAP_INTERVAL_MS: f64 = 2000.0;
/// Time between carousel images
pub const CAROUSEL_INTERVAL_MS: f64 = 4000.0;

/// Grid of client logos that swaps one slot at a time
#[derive(Debug, Clone)]
pub struct LogoGrid {
    /// Client index shown in each slot
    slots: Vec<usize>,
    client_count: usize,
    last_swapped: Option<usize>,
    elapsed_ms: f64,
    rng: Pcg32,
}

impl LogoGrid {
    pub fn new(client_count: usize, seed: u64) -> Self {
        Self {
            slots: (0..client_count.min(GRID_SIZE)).collect(),
            client_count,
            last_swapped: None,
            elapsed_ms: 0.0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn slots(&self) -> &[usize] {
        &self.slots
    }

    /// Accumulate time; performs one swap attempt per elapsed interval.
    /// Returns the slots that changed.
    pub fn advance(&mut self, dt_ms: f64) -> Vec<usize> {
        self.elapsed_ms += dt_ms.max(0.0);
        let mut changed = Vec::new();
        while self.elapsed_ms >= LOGO_SWAP_INTERVAL_MS {
            self.elapsed_ms -= LOGO_SWAP_INTERVAL_MS;
            if let Some(slot) = self.swap_once() {
                changed.push(slot);
            }
        }
        changed
    }

    /// One swap attempt. The same slot is never swapped twice in a row,
    /// and a logo never appears in two slots.
    pub fn swap_once(&mut self) -> Option<usize> {
        if self.slots.is_empty() {
            return None;
        }
        let slot = self.rng.random_range(0..GRID_SIZE);
        if slot >= self.slots.len() || Some(slot) == self.last_swapped {
            return None;
        }

        let available: Vec<usize> = (0..self.client_count)
            .filter(|i| !self.slots.contains(i))
            .collect();
        if available.is_empty() {
            return None;
        }
        let pick = available[self.rng.random_range(0..available.len())];
        self.slots[slot] = pick;
        self.last_swapped = Some(slot);
        Some(slot)
    }
}

/// What the carousel should display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselView {
    /// No images: show the "No images available" panel
    Placeholder,
    Image(usize),
}

/// Cycles through a fixed list of images
#[derive(Debug, Clone)]
pub struct Carousel {
    len: usize,
    index: usize,
    interval_ms: f64,
    elapsed_ms: f64,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self::with_interval(len, CAROUSEL_INTERVAL_MS)
    }

    pub fn with_interval(len: usize, interval_ms: f64) -> Self {
        Self {
            len,
            index: 0,
            interval_ms: interval_ms.max(1.0),
            elapsed_ms: 0.0,
        }
    }

    pub fn view(&self) -> CarouselView {
        if self.len == 0 {
            CarouselView::Placeholder
        } else {
            CarouselView::Image(self.index)
        }
    }

    /// A single image never rotates
    pub fn advance(&mut self, dt_ms: f64) -> CarouselView {
        if self.len > 1 {
            self.elapsed_ms += dt_ms.max(0.0);
            while self.elapsed_ms >= self.interval_ms {
                self.elapsed_ms -= self.interval_ms;
                self.index = (self.index + 1) % self.len;
            }
        }
        self.view()
    }
}
