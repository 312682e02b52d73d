//! Endless drag-and-momentum carousel.
//!
//! [`carousel::Carousel`] is the motion engine. It runs against any
//! [`carousel::host::SlideContainer`]; [`app::App`] hosts it in a winit window
//! with a wgpu renderer.

pub mod animation;
pub mod app;
pub mod carousel;
pub mod config;
pub mod input;
pub mod renderer;
pub mod stage;
