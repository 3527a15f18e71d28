//! Save format for Celsius thermal state.
//!
//! Encodes a [`MapThermalState`](celsius_core::MapThermalState) to any
//! `Write` sink and back, and hashes states for quick equality checks.
//!
//! # Format
//!
//! ```text
//! [MAGIC "CELS"] [VERSION u8] [width u32] [height u32]
//! [temperatures: width*height × f32 bits]
//! [terrain flag u8] [terrain temperatures: width*height × f32 bits]?
//! [under-terrain count u32] [(cell index u32, terrain name)...]
//! ```
//!
//! Integers are little-endian. Floats are written as their raw bits, so
//! NaN payloads survive. Terrains are stored by name and resolved against
//! the registry given at load time.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod error;
pub mod hash;

pub use codec::{check_dimensions, decode_state, encode_state};
pub use error::PersistError;
pub use hash::state_hash;

/// Magic bytes at the start of every save blob.
pub const MAGIC: [u8; 4] = *b"CELS";

/// Current binary format version.
pub const FORMAT_VERSION: u8 = 1;
