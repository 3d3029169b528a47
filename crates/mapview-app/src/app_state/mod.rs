//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop: one window hosting one map view.

mod bounds;
mod core;
mod demo;
mod event_handler;
mod init;
mod polling;
mod types;

pub use core::MapViewApp;
