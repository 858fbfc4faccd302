//! # qrforge
//!
//! A Rust library for generating ISO/IEC 18004 QR code symbols with Reed-Solomon error correction.
//!
//! ## Features
//!
//! - **Mode detection**: Numeric, Alphanumeric, Byte (ISO-8859-1) and Kanji (Shift JIS) packing
//! - **Reed-Solomon Error Correction**: GF(256) codewords with multi-block interleaving for
//!   all levels (L, M, Q, H)
//! - **Layout**: Finder, timing and alignment patterns, BCH coded format & version info,
//!   zigzag data placement
//! - **Masking**: All eight masks scored with the four penalty rules, lowest penalty wins
//! - **Rendering**: 4-module quiet zone, grayscale images through the `image` crate,
//!   terminal strings
//!
//! ## Quick Start
//!
//! ### Simple QR Code Generation
//!
//! ```rust
//! use qrforge::{generate, GenerateOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Defaults: version 4, error correction level L, auto-detected mode
//! let matrix = generate("1234567890", &GenerateOptions::default())?;
//! assert_eq!(matrix.width(), 33 + 8);
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust,no_run
//! use qrforge::{ECLevel, MaskPattern, Mode, QRBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = QRBuilder::new("HELLO WORLD")
//!     .version(Version::new(2)?)     // QR version (size), defaults to 4
//!     .ec_level(ECLevel::M)          // Error correction level, defaults to ECLevel::L
//!     .mode(Mode::Alphanumeric)      // Encoding mode, detected from the text if not provided
//!     .mask(MaskPattern::new(3)?)    // Mask pattern, chosen by penalty score if not provided
//!     .build()?;
//!
//! let img = qr.to_matrix().to_image(4); // 4 pixels per module
//! img.save("configured_qr.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## QR Code Components
//!
//! ### Versions
//! - Versions 1-40, with sizes from 21x21 to 177x177 modules
//!
//! ### Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub(crate) mod common;

pub use builder::{GenerateOptions, ModuleMatrix, QRBuilder, QUIET_ZONE};
pub use common::codec::{detect_best_mode, Mode};
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{format_info, format_info_string, Color, ECLevel, Version};

/// Generates the module matrix for `text`, quiet zone included. The result is
/// `width + 8` modules wide with 1 for dark and 0 for light.
pub fn generate(text: &str, opts: &GenerateOptions) -> QRResult<ModuleMatrix> {
    let qr = QRBuilder::new(text).options(opts).build()?;
    Ok(qr.to_matrix())
}
