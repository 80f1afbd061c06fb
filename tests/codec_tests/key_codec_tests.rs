//! Key Codec Tests
//!
//! Tests for fixed-width big-endian key encoding.

use storebench::codec::{decode_key, encode_key, KEY_SIZE};

// =============================================================================
// Encoding Tests
// =============================================================================

#[test]
fn test_encode_fixed_width() {
    assert_eq!(encode_key(0).len(), KEY_SIZE);
    assert_eq!(encode_key(u64::MAX).len(), KEY_SIZE);
}

#[test]
fn test_encode_zero_and_max() {
    assert_eq!(encode_key(0), [0u8; 8]);
    assert_eq!(encode_key(u64::MAX), [0xff; 8]);
}

#[test]
fn test_encode_most_significant_byte_first() {
    assert_eq!(
        encode_key(0x0102_0304_0506_0708),
        [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]
    );
}

// =============================================================================
// Ordering Tests
// =============================================================================

#[test]
fn test_sequential_keys_strictly_increasing() {
    for i in 0..2000u64 {
        assert!(encode_key(i) < encode_key(i + 1), "encode({}) >= encode({})", i, i + 1);
    }
}

#[test]
fn test_ordering_across_byte_boundaries() {
    let pairs = [
        (255u64, 256u64),
        (65_535, 65_536),
        (u32::MAX as u64, u32::MAX as u64 + 1),
        (1, u64::MAX),
    ];
    for (i, j) in pairs {
        assert!(encode_key(i) < encode_key(j), "encode({}) >= encode({})", i, j);
    }
}

#[test]
fn test_sorting_bytes_matches_sorting_numbers() {
    let numbers = [42u64, 7, 1 << 40, 0, 300, 255, 1 << 8];
    let mut by_bytes: Vec<[u8; 8]> = numbers.iter().map(|n| encode_key(*n)).collect();
    by_bytes.sort();

    let mut sorted = numbers.to_vec();
    sorted.sort();
    let expected: Vec<[u8; 8]> = sorted.iter().map(|n| encode_key(*n)).collect();

    assert_eq!(by_bytes, expected);
}

// =============================================================================
// Decoding Tests
// =============================================================================

#[test]
fn test_decode_inverts_encode() {
    for n in [0u64, 1, 999, 1 << 33, u64::MAX] {
        assert_eq!(decode_key(&encode_key(n)).unwrap(), n);
    }
}

#[test]
fn test_decode_wrong_width() {
    assert!(decode_key(&[]).is_err());
    assert!(decode_key(&[0u8; 7]).is_err());
    assert!(decode_key(&[0u8; 9]).is_err());
}
