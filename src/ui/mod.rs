//! Peripheral layer: keypad input, screen output and the session loop.
//!
//! - [`keypad`]: keypress codes and the polled [`keypad::KeypressSource`].
//! - [`display`]: the pixel-space [`display::Scene`] and the
//!   [`display::DisplaySurface`] it is drawn on.
//! - [`renderer`]: a ratatui surface emulating the handheld LCD.
//! - [`chat_loop`]: the cooperative loop tying them to a
//!   [`crate::core::app::ChatSession`].
//!
//! Ownership boundary: this layer presents and captures interaction state,
//! while [`crate::core`] owns the session logic.

pub mod chat_loop;
pub mod display;
pub mod keypad;
pub mod renderer;
