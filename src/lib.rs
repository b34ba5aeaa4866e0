//! # qrtext
//!
//! A Rust library for encoding short text into QR codes and printing them on a
//! terminal.
//!
//! `qrtext` encodes up to 520 bytes in byte mode at error correction level L,
//! adhering to the QR Code Model 2 specification (versions 1 to 15). Symbols are
//! rendered with Unicode half-block glyphs so that every printed line holds two
//! module rows, letting fairly large codes fit on a single screen.
//!
//! ## Features
//!
//! - Automatic version selection from the input length.
//! - Reed-Solomon error correction with block interleaving.
//! - Penalty-based mask selection, evaluated in parallel and deterministic.
//! - Rendering for dark or light terminal backgrounds.
//! - Safe Rust implementation with no unsafe code.
//!
//! ## Installation
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! qrtext = "0.1" # Replace with the latest version
//! ```
//!
//! ## Example
//!
//! ```rust
//! use qrtext::{encode_text, render_lines, Background};
//!
//! let qr = encode_text("https://example.com").unwrap();
//! for line in render_lines(&qr, Background::Dark) {
//!     println!("{}", line);
//! }
//! ```
//!
//! Rendering for a light terminal, with the mode taken from an argument:
//!
//! ```rust
//! use qrtext::{encode_text, render_to_string, Background};
//!
//! let background = Background::from_arg("light");
//! let text = render_to_string(&encode_text("Hello, World!").unwrap(), background);
//! assert_eq!(text.lines().count(), 13);
//! ```
//!
//! ## Modules
//!
//! - [`qrcode`]: Core QR code encoding functionality.
//! - [`render`]: Half-block text rendering.
//! - [`segment`], [`reed_solomon`], [`galois`]: The encoding stages.

#![forbid(unsafe_code)]

pub mod bits;
pub mod error;
pub mod galois;
pub mod mask;
pub(crate) mod matrix;
pub mod qrcode;
pub mod reed_solomon;
pub mod render;
pub mod segment;
pub mod version;

pub use bits::BitBuffer;
pub use error::{QrError, Result};
pub use mask::Mask;
pub use qrcode::QrCode;
pub use render::{print_qr, render_lines, render_to_string, Background};
pub use version::Version;

/// Encodes `text` (as UTF-8 bytes) into a QR code at the smallest fitting version.
///
/// # Errors
///
/// Returns [`QrError::Capacity`] if the text is longer than 520 bytes.
pub fn encode_text(text: &str) -> Result<QrCode> {
    QrCode::encode_text(text)
}
