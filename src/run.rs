use anyhow::Result;
use clap::ValueEnum;
use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

use crate::patterns::Pattern;
use crate::renderer::Renderer;

/// Shared stop signal and frame pacing for the render loop
#[derive(Debug, Clone)]
pub struct RunControl {
    running: Arc<AtomicBool>,
    frames: Arc<AtomicU64>,
    frame_limit: Option<u64>,
    paced: bool,
}

impl Default for RunControl {
    fn default() -> Self {
        RunControl::new()
    }
}

impl RunControl {
    pub fn new() -> Self {
        RunControl {
            running: Arc::new(AtomicBool::new(true)),
            frames: Arc::new(AtomicU64::new(0)),
            frame_limit: None,
            paced: true,
        }
    }

    /// Stop after `limit` frames; 0 means no limit
    pub fn with_frame_limit(mut self, limit: u64) -> Self {
        self.frame_limit = (limit > 0).then_some(limit);
        self
    }

    /// Skip the sleeps between frames
    pub fn unpaced(mut self) -> Self {
        self.paced = false;
        self
    }

    /// Get a clone of the running flag for signal handlers
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }

    /// Record a drawn frame, then wait `delay`.
    ///
    /// Returns false once the loop should stop.
    pub fn frame_done(&self, delay: Duration) -> bool {
        let frames = self.frames.fetch_add(1, Ordering::Relaxed) + 1;
        if self.frame_limit.is_some_and(|limit| frames >= limit) {
            self.stop();
        }

        if !self.is_running() {
            return false;
        }

        if self.paced {
            thread::sleep(delay);
        }

        self.is_running()
    }
}

/// What the render loop plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Program {
    /// Slow hue drift over the whole panel
    Ambient,
    /// Cycle through the sweep, chase, rainbow and bounce patterns
    Showcase,
    ColumnSweep,
    RowSweep,
    Chase,
    Rainbow,
    Bounce,
    Breathe,
    Sparkle,
}

const SHOWCASE: &[Pattern] = &[
    Pattern::ColumnSweep,
    Pattern::RowSweep,
    Pattern::Chase,
    Pattern::Rainbow,
    Pattern::Bounce,
];

impl Program {
    pub fn playlist(self) -> &'static [Pattern] {
        match self {
            Program::Ambient => &[Pattern::Ambient],
            Program::Showcase => SHOWCASE,
            Program::ColumnSweep => &[Pattern::ColumnSweep],
            Program::RowSweep => &[Pattern::RowSweep],
            Program::Chase => &[Pattern::Chase],
            Program::Rainbow => &[Pattern::Rainbow],
            Program::Bounce => &[Pattern::Bounce],
            Program::Breathe => &[Pattern::Breathe],
            Program::Sparkle => &[Pattern::Sparkle],
        }
    }
}

/// Play the program's patterns in order, repeating until stopped.
///
/// A failed draw ends the loop with that error.
pub fn run_program<W: Write>(
    program: Program,
    renderer: &mut Renderer<W>,
    control: &RunControl,
) -> Result<()> {
    info!("Running {:?}", program);

    while control.is_running() {
        for pattern in program.playlist() {
            if !control.is_running() {
                break;
            }
            debug!("Pattern {:?}", pattern);
            pattern.play(renderer, control)?;
        }
    }

    info!("Render loop stopped after {} frames", control.frames());
    Ok(())
}
