//! Item records
//!
//! Chunk-metadata records used by the structured workload. Only the address
//! and the postage stamp fields carry data; the rest stay at their zero
//! values, which keeps every encoded item the same shape.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{BenchError, Result};

/// Width of a random chunk address in bytes
pub const ADDRESS_SIZE: usize = 8;

/// Chunk metadata as stored by a content-addressed chunk store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub address: Vec<u8>,
    pub data: Vec<u8>,
    pub access_timestamp: i64,
    pub store_timestamp: i64,
    pub bin_id: u64,

    /// Number of times the chunk is pinned
    pub pin_counter: u64,
    pub tag: u32,

    // -------------------------------------------------------------------------
    // Postage stamp
    // -------------------------------------------------------------------------
    pub batch_id: Vec<u8>,

    /// Index of the stamp within its batch
    pub index: Vec<u8>,

    /// Stamp validity
    pub timestamp: Vec<u8>,
    pub sig: Vec<u8>,

    /// Batch bucket depth (collision sets)
    pub bucket_depth: u8,

    /// Batch depth (size)
    pub depth: u8,

    /// Reserve radius; chunks below it are unpinned
    pub radius: u8,

    /// Whether the batch is immutable (cannot be diluted or drained)
    pub immutable: bool,
}

impl Item {
    /// Build an item whose address and stamp fields all carry `address`
    pub fn from_address(address: [u8; ADDRESS_SIZE]) -> Self {
        let bytes = address.to_vec();
        Self {
            address: bytes.clone(),
            batch_id: bytes.clone(),
            index: bytes.clone(),
            timestamp: bytes.clone(),
            sig: bytes,
            ..Self::default()
        }
    }
}

/// Serialization format for items
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ItemCodec {
    /// Self-describing JSON
    #[default]
    Json,

    /// Compact bincode
    Bincode,
}

impl ItemCodec {
    /// Encode an item to bytes
    pub fn encode(&self, item: &Item) -> Result<Vec<u8>> {
        match self {
            ItemCodec::Json => serde_json::to_vec(item)
                .map_err(|e| BenchError::Serialization(format!("JSON encode failed: {}", e))),
            ItemCodec::Bincode => bincode::serialize(item)
                .map_err(|e| BenchError::Serialization(format!("bincode encode failed: {}", e))),
        }
    }

    /// Decode an item from bytes
    pub fn decode(&self, bytes: &[u8]) -> Result<Item> {
        match self {
            ItemCodec::Json => serde_json::from_slice(bytes)
                .map_err(|e| BenchError::Serialization(format!("JSON decode failed: {}", e))),
            ItemCodec::Bincode => bincode::deserialize(bytes)
                .map_err(|e| BenchError::Serialization(format!("bincode decode failed: {}", e))),
        }
    }
}

impl fmt::Display for ItemCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemCodec::Json => write!(f, "json"),
            ItemCodec::Bincode => write!(f, "bincode"),
        }
    }
}
