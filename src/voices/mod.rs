//! Pre-built voices.
//!
//! # Example
//!
//! ```
//! use hat606::voices::hat606::{Hat606, HatParams};
//!
//! let mut hat = Hat606::new(HatParams::new(0.5, 0.2, 0.8, 0.0), 48_000.0);
//! let mut buffer = vec![0.0f32; 4_800];
//! hat.render(&mut buffer);
//! ```

pub mod hat606;

pub use hat606::{Hat606, HatParams, HatShape};
