//! Animation patterns.
//!
//! Each pattern draws a finite run of frames through the renderer and paces
//! itself with fixed sleeps. They bail out early once the run control says
//! to stop.

use anyhow::Result;
use rand::Rng;
use std::f64::consts::PI;
use std::io::Write;
use std::time::Duration;

use crate::color::Color;
use crate::renderer::Renderer;
use crate::run::RunControl;

const HUE_STEP: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Ambient,
    ColumnSweep,
    RowSweep,
    Chase,
    Rainbow,
    Bounce,
    Breathe,
    Sparkle,
}

impl Pattern {
    pub fn play<W: Write>(self, renderer: &mut Renderer<W>, control: &RunControl) -> Result<()> {
        match self {
            Pattern::Ambient => ambient(renderer, control),
            Pattern::ColumnSweep => column_sweep(renderer, control),
            Pattern::RowSweep => row_sweep(renderer, control),
            Pattern::Chase => chase(renderer, control),
            Pattern::Rainbow => rainbow(renderer, control),
            Pattern::Bounce => bounce(renderer, control),
            Pattern::Breathe => breathe(renderer, control),
            Pattern::Sparkle => sparkle(renderer, control),
        }
    }
}

/// Draw, then wait. Ok(false) means stop.
fn show<W: Write>(renderer: &mut Renderer<W>, control: &RunControl, delay_ms: u64) -> Result<bool> {
    renderer.draw()?;
    Ok(control.frame_done(Duration::from_millis(delay_ms)))
}

/// One full turn of a dim, desaturated hue drift
fn ambient<W: Write>(renderer: &mut Renderer<W>, control: &RunControl) -> Result<()> {
    for hue in (0..360).step_by(2) {
        renderer.clear(Color::from_hsv(hue as f64 / 360.0, 0.6, 0.4));
        if !show(renderer, control, 20)? {
            break;
        }
    }
    Ok(())
}

/// A lit column travels right, then back left
fn column_sweep<W: Write>(renderer: &mut Renderer<W>, control: &RunControl) -> Result<()> {
    let width = renderer.width();
    let mut hue = 0;

    let cols = (0..width).chain((0..width).rev());
    for col in cols {
        renderer.blank();
        for row in 0..renderer.height() {
            renderer.set(row, col, Color::from_hue_degrees(hue));
        }
        if !show(renderer, control, 20)? {
            break;
        }
        hue = (hue + HUE_STEP) % 360;
    }
    Ok(())
}

/// A lit row travels down, then back up
fn row_sweep<W: Write>(renderer: &mut Renderer<W>, control: &RunControl) -> Result<()> {
    let height = renderer.height();
    let mut hue = 0;

    let rows = (0..height).chain((0..height).rev());
    for row in rows {
        renderer.blank();
        for col in 0..renderer.width() {
            renderer.set(row, col, Color::from_hue_degrees(hue));
        }
        if !show(renderer, control, 20)? {
            break;
        }
        hue = (hue + HUE_STEP) % 360;
    }
    Ok(())
}

/// Single pixel visiting every cell in reading order
fn chase<W: Write>(renderer: &mut Renderer<W>, control: &RunControl) -> Result<()> {
    let mut hue = 0;

    for row in 0..renderer.height() {
        for col in 0..renderer.width() {
            renderer.blank();
            renderer.set(row, col, Color::from_hue_degrees(hue));
            if !show(renderer, control, 10)? {
                return Ok(());
            }
            hue = (hue + HUE_STEP) % 360;
        }
    }
    Ok(())
}

/// Horizontal hue gradient scrolling across the panel
fn rainbow<W: Write>(renderer: &mut Renderer<W>, control: &RunControl) -> Result<()> {
    let mut offset: i64 = 360;

    for _ in 0..100 {
        for row in 0..renderer.height() {
            for col in 0..renderer.width() {
                let hue = (offset - col as i64 * 10).rem_euclid(360) as u32;
                renderer.set(row, col, Color::from_hue_degrees(hue));
            }
        }
        if !show(renderer, control, 50)? {
            break;
        }
        offset += 10;
    }
    Ok(())
}

/// Ball thrown sideways under gravity, bouncing off the walls and floor.
///
/// Positions live in a space ten times the panel resolution.
fn bounce<W: Write>(renderer: &mut Renderer<W>, control: &RunControl) -> Result<()> {
    const DT: f32 = 0.02;
    const GRAVITY: f32 = -4000.0;

    let mut rng = rand::rng();
    let max_x = renderer.width() as f32 * 10.0;
    let max_row = renderer.height() - 1;
    let max_col = renderer.width() - 1;

    let (mut x, mut y) = (0.0f32, 50.0f32);
    let (mut vx, mut vy) = (200.0f32, 0.0f32);
    let mut color = Color::WHITE;

    for _ in 0..200 {
        x += vx * DT;
        vy += GRAVITY * DT;
        y += vy * DT;

        if x >= max_x {
            x = max_x - (x - max_x);
            vx = -vx;
            color = Color::new(rng.random(), rng.random(), rng.random());
        } else if x < 0.0 {
            x = -x;
            vx = -vx;
            color = Color::new(rng.random(), rng.random(), rng.random());
        }

        if y < 0.0 {
            y = -y;
            vy = -vy;
        }

        let col = ((x / 10.0) as usize).min(max_col);
        let height = ((y / 10.0) as usize).min(max_row);

        renderer.blank();
        renderer.set(max_row - height, col, color);
        if !show(renderer, control, (DT * 1000.0) as u64)? {
            break;
        }
    }
    Ok(())
}

/// White sine breath, then random-hue breaths
fn breathe<W: Write>(renderer: &mut Renderer<W>, control: &RunControl) -> Result<()> {
    let mut rng = rand::rng();

    for degrees in (0..=360).step_by(10) {
        let level = 0.5 + 0.5 * (degrees as f64 * PI / 180.0).sin();
        let v = level * 255.0;
        renderer.clear(Color::from_f64(v, v, v));
        if !show(renderer, control, 20)? {
            return Ok(());
        }
    }

    let mut degrees = 0;
    let mut hue: f64 = rng.random();
    for _ in 0..100 {
        if degrees > 360 {
            hue = rng.random();
            degrees -= 360;
        }
        let level = 0.5 + 0.5 * (degrees as f64 * PI / 180.0).cos();
        renderer.clear(Color::from_hsv(hue, 1.0, level));
        if !show(renderer, control, 50)? {
            break;
        }
        degrees += 10;
    }
    Ok(())
}

/// Every cell a random hue, every frame
fn sparkle<W: Write>(renderer: &mut Renderer<W>, control: &RunControl) -> Result<()> {
    let mut rng = rand::rng();

    for _ in 0..500 {
        for row in 0..renderer.height() {
            for col in 0..renderer.width() {
                renderer.set(row, col, Color::from_hsv(rng.random(), 1.0, 1.0));
            }
        }
        if !show(renderer, control, 20)? {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::IndexMapping;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::io;

    fn play(pattern: Pattern, control: &RunControl) -> Renderer<io::Sink> {
        let mut renderer = Renderer::new(IndexMapping::matrix_12x6(), io::sink());
        pattern.play(&mut renderer, control).unwrap();
        renderer
    }

    #[rstest]
    #[case(Pattern::Ambient, 180)]
    #[case(Pattern::ColumnSweep, 24)]
    #[case(Pattern::RowSweep, 12)]
    #[case(Pattern::Chase, 72)]
    #[case(Pattern::Rainbow, 100)]
    #[case(Pattern::Bounce, 200)]
    #[case(Pattern::Breathe, 137)]
    #[case(Pattern::Sparkle, 500)]
    fn test_pattern_frame_counts(#[case] pattern: Pattern, #[case] frames: u64) {
        let renderer = play(pattern, &RunControl::new().unpaced());
        assert_eq!(renderer.frames_sent(), frames);
    }

    #[rstest]
    #[case(Pattern::Ambient)]
    #[case(Pattern::ColumnSweep)]
    #[case(Pattern::RowSweep)]
    #[case(Pattern::Chase)]
    #[case(Pattern::Rainbow)]
    #[case(Pattern::Bounce)]
    #[case(Pattern::Breathe)]
    #[case(Pattern::Sparkle)]
    fn test_pattern_stops_early(#[case] pattern: Pattern) {
        let control = RunControl::new().with_frame_limit(5).unpaced();
        assert_eq!(play(pattern, &control).frames_sent(), 5);
    }

    #[test]
    fn test_column_sweep_ends_on_first_column() {
        let renderer = play(Pattern::ColumnSweep, &RunControl::new().unpaced());
        let frame = renderer.frame();
        assert!((0..6).all(|row| frame.get(row, 0) != Color::BLACK));
        assert!((0..6).all(|row| frame.get(row, 1) == Color::BLACK));
    }

    #[test]
    fn test_chase_leaves_single_pixel() {
        let renderer = play(Pattern::Chase, &RunControl::new().unpaced());
        let lit: Vec<_> = renderer
            .frame()
            .cells()
            .filter(|(_, _, c)| *c != Color::BLACK)
            .map(|(r, c, _)| (r, c))
            .collect();
        assert_eq!(lit, vec![(5, 11)]);
    }

    #[test]
    fn test_rainbow_gradient() {
        let control = RunControl::new().with_frame_limit(1).unpaced();
        let renderer = play(Pattern::Rainbow, &control);
        assert_eq!(renderer.frame().get(0, 0), Color::from_hue_degrees(0));
        assert_eq!(renderer.frame().get(3, 6), Color::from_hue_degrees(300));
    }
}
