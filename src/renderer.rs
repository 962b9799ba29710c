use anyhow::{Context, Result};
use std::io::Write;
use tracing::{debug, trace};

use crate::color::Color;
use crate::mapping::IndexMapping;
use crate::matrix::Frame;
use crate::protocol::{build_draw_frame, encode_frame, hex_dump};

/// Owns the frame buffer and the write side of the device channel
pub struct Renderer<W: Write> {
    frame: Frame,
    mapping: IndexMapping,
    port: W,
    frames_sent: u64,
}

impl<W: Write> Renderer<W> {
    /// Create a renderer with a black frame sized to the mapping
    pub fn new(mapping: IndexMapping, port: W) -> Self {
        Renderer {
            frame: Frame::new(mapping.width(), mapping.height()),
            mapping,
            port,
            frames_sent: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.frame.width()
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Fill the whole frame with one color
    pub fn clear(&mut self, color: Color) {
        self.frame.clear(color);
    }

    /// Panics if (row, col) is outside the frame.
    pub fn set(&mut self, row: usize, col: usize, color: Color) {
        self.frame.set(row, col, color);
    }

    /// Clear to black
    pub fn blank(&mut self) {
        self.frame.clear(Color::BLACK);
    }

    /// Encode the current frame and send it in a single write.
    ///
    /// Nothing is read back from the device.
    pub fn draw(&mut self) -> Result<()> {
        let payload = encode_frame(&self.frame, &self.mapping);
        let frame = build_draw_frame(&payload);

        debug!("Sending frame: {} bytes ({} LEDs)", frame.len(), self.mapping.led_count());
        trace!("Complete serial frame: {}", hex_dump(&frame));

        self.port
            .write_all(&frame)
            .context("Failed to write frame to device")?;
        self.port.flush().context("Failed to flush frame to device")?;

        self.frames_sent += 1;
        Ok(())
    }

    pub fn frames_sent(&self) -> u64 {
        self.frames_sent
    }

    pub fn port(&self) -> &W {
        &self.port
    }
}
