//! Driver for a 12x6 addressable LED matrix attached over USB serial.
//!
//! Discovery and handshake live in [`session`], the wire format in
//! [`protocol`], and [`renderer::Renderer`] ties a frame buffer, the wiring
//! map and an open port together for the [`patterns`].

pub mod color;
pub mod config;
pub mod mapping;
pub mod matrix;
pub mod monitor;
pub mod patterns;
pub mod protocol;
pub mod renderer;
pub mod run;
pub mod session;

pub use color::Color;
pub use mapping::IndexMapping;
pub use matrix::Frame;
pub use renderer::Renderer;
