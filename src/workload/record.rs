//! Record definition

use bytes::Bytes;

/// An immutable key/value pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    key: Bytes,
    value: Bytes,
}

impl Record {
    pub fn new(key: impl Into<Bytes>, value: impl Into<Bytes>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &Bytes {
        &self.key
    }

    pub fn value(&self) -> &Bytes {
        &self.value
    }

    /// Key plus value length in bytes
    pub fn size(&self) -> usize {
        self.key.len() + self.value.len()
    }
}
