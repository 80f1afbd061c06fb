//! Codec Module
//!
//! Byte encodings used to build workloads.
//!
//! ## Key Format
//! ```text
//! ┌───────────────────────────────────────┐
//! │   u64 sequence number, big-endian (8) │
//! └───────────────────────────────────────┘
//! ```
//! Big-endian keeps byte-wise ordering identical to numeric ordering, so
//! sequential counters produce sequentially ordered keys.
//!
//! ## Item Format
//! Structured chunk-metadata records, serialized with either JSON or bincode.
//! The harness treats the result as an opaque value blob.

mod key;
mod item;

pub use key::{encode_key, decode_key, KEY_SIZE};
pub use item::{Item, ItemCodec, ADDRESS_SIZE};
