//! Falling confetti drawn over the checklist.
//!
//! Each particle gets a random size, column, fall time, start delay and
//! palette color when a run starts. Where a particle is on screen is a pure
//! function of the time since the run started.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};

use crate::celebration::CelebrationPlayer;

pub const PALETTE: [Color; 6] = [
    Color::Rgb(0x0E, 0xA5, 0xE9),
    Color::Rgb(0x22, 0xC5, 0x5E),
    Color::Rgb(0xF5, 0x9E, 0x0B),
    Color::Rgb(0xEF, 0x44, 0x44),
    Color::Rgb(0xA7, 0x8B, 0xFA),
    Color::Rgb(0x06, 0xB6, 0xD4),
];

/// One piece of confetti
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Width in pixels, 6..14
    pub size: f32,
    /// Height as a multiple of width, 0.4..1.6
    pub aspect: f32,
    /// Horizontal position as a fraction of the screen width
    pub left: f32,
    pub fall: Duration,
    pub delay: Duration,
    pub color: Color,
}

impl Particle {
    fn random(rng: &mut impl Rng) -> Self {
        Particle {
            size: rng.gen_range(6.0..14.0),
            aspect: rng.gen_range(0.4..1.6),
            left: rng.gen_range(0.0..1.0),
            fall: Duration::from_secs_f32(rng.gen_range(2.8..4.0)),
            delay: Duration::from_secs_f32(rng.gen_range(0.0..0.6)),
            color: PALETTE[rng.gen_range(0..PALETTE.len())],
        }
    }

    /// Fraction of the fall completed at `elapsed`, or None when the
    /// particle has not started or has already left the screen.
    pub fn progress(&self, elapsed: Duration) -> Option<f32> {
        let t = elapsed.checked_sub(self.delay)?;
        let p = t.as_secs_f32() / self.fall.as_secs_f32();
        (p < 1.0).then_some(p)
    }

    fn glyph(&self) -> &'static str {
        if self.aspect > 1.0 {
            "\u{258C}" // ▌ tall strip
        } else if self.size >= 10.0 {
            "\u{2580}" // ▀ wide flake
        } else {
            "\u{2584}" // ▄ small flake
        }
    }

    /// Wide particles take two cells
    fn width(&self) -> u16 {
        if self.size >= 12.0 { 2 } else { 1 }
    }
}

#[derive(Debug, Clone)]
struct Run {
    started: Instant,
    duration: Duration,
    particles: Vec<Particle>,
}

/// Confetti overlay. At most one run is on screen at a time.
#[derive(Debug)]
pub struct Confetti {
    rng: StdRng,
    run: Option<Run>,
}

impl Default for Confetti {
    fn default() -> Self {
        Confetti {
            rng: StdRng::from_entropy(),
            run: None,
        }
    }
}

impl Confetti {
    /// Deterministic particles, for tests
    pub fn seeded(seed: u64) -> Self {
        Confetti {
            rng: StdRng::seed_from_u64(seed),
            run: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.run.is_some()
    }

    pub fn particles(&self) -> &[Particle] {
        self.run
            .as_ref()
            .map(|r| r.particles.as_slice())
            .unwrap_or_default()
    }

    /// Start a run at an explicit instant
    pub fn play_at(&mut self, started: Instant, duration: Duration, particle_count: usize) {
        let particles = (0..particle_count)
            .map(|_| Particle::random(&mut self.rng))
            .collect();
        self.run = Some(Run {
            started,
            duration,
            particles,
        });
    }

    /// Cells to paint at `now`: (x, y, glyph, color), clipped to `area`.
    pub fn cells(&self, area: Rect, now: Instant) -> Vec<(u16, u16, &'static str, Color)> {
        let Some(run) = &self.run else {
            return Vec::new();
        };
        let elapsed = now.saturating_duration_since(run.started);
        if elapsed >= run.duration || area.width == 0 || area.height == 0 {
            return Vec::new();
        }

        let mut cells = Vec::new();
        for p in &run.particles {
            let Some(progress) = p.progress(elapsed) else {
                continue;
            };
            let x = area.x + ((p.left * area.width as f32) as u16).min(area.width - 1);
            let y = area.y + ((progress * area.height as f32) as u16).min(area.height - 1);
            for dx in 0..p.width() {
                if x + dx < area.x + area.width {
                    cells.push((x + dx, y, p.glyph(), p.color));
                }
            }
        }
        cells
    }
}

impl CelebrationPlayer for Confetti {
    fn play(&mut self, duration: Duration, particle_count: usize) {
        self.play_at(Instant::now(), duration, particle_count);
    }

    fn clear(&mut self) {
        self.run = None;
    }
}

/// Paint the confetti on top of whatever is already in the frame buffer.
pub fn render_confetti(frame: &mut Frame, confetti: &Confetti, area: Rect, now: Instant) {
    let buf = frame.buffer_mut();
    for (x, y, glyph, color) in confetti.cells(area, now) {
        if let Some(cell) = buf.cell_mut((x, y)) {
            cell.set_symbol(glyph).set_style(Style::default().fg(color));
        }
    }
}
