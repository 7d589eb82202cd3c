//! Presentation logic for the Nexus Link marketing site.
//!
//! The crate is compiled to WebAssembly and loaded by the site's pages. It
//! owns the theme preference (light/dark, persisted to `localStorage` and
//! mirrored into `<html data-theme>`) and the decorative particle background
//! drawn onto `<canvas id="bg-canvas">`. Everything that needs a browser sits
//! behind the `web` feature; the rest is plain Rust and is tested natively.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`theme`] | Theme resolution, toggling and observers ([`theme::ThemeState`]) |
//! | [`particles`] | Particle kinematics, palettes and the particle field |
//! | [`animator`] | Session lifecycle and per-frame tick ([`animator::AnimatorCore`]) |
//! | [`listener`] | One-at-a-time event listener registration ([`listener::ListenerSlot`]) |
//! | [`nav`] | Navbar scroll state and in-page link targets |
//! | [`config`] | Typed site configuration parsed from JSON |
//! | [`consts`] | Default constants (storage key, particle count, thresholds) |
//! | [`error`] | Crate error type |
//! | `web` | Browser shell: storage, canvas, frame loop, DOM wiring (`web` feature) |

pub mod animator;
pub mod config;
pub mod consts;
pub mod error;
pub mod listener;
pub mod nav;
pub mod particles;
pub mod theme;

#[cfg(feature = "web")]
pub mod web;

pub use error::Error;
