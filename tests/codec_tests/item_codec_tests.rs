//! Item Codec Tests
//!
//! Tests for structured item records and their encodings.

use storebench::codec::{Item, ItemCodec};

const ADDRESS: [u8; 8] = [0xde, 0xad, 0xbe, 0xef, 0x01, 0x02, 0x03, 0x04];

#[test]
fn test_from_address_fills_stamp_fields() {
    let item = Item::from_address(ADDRESS);

    assert_eq!(item.address, ADDRESS);
    assert_eq!(item.batch_id, ADDRESS);
    assert_eq!(item.index, ADDRESS);
    assert_eq!(item.timestamp, ADDRESS);
    assert_eq!(item.sig, ADDRESS);
}

#[test]
fn test_from_address_leaves_other_fields_zero() {
    let item = Item::from_address(ADDRESS);

    assert!(item.data.is_empty());
    assert_eq!(item.access_timestamp, 0);
    assert_eq!(item.store_timestamp, 0);
    assert_eq!(item.bin_id, 0);
    assert_eq!(item.pin_counter, 0);
    assert_eq!(item.tag, 0);
    assert_eq!(item.bucket_depth, 0);
    assert_eq!(item.depth, 0);
    assert_eq!(item.radius, 0);
    assert!(!item.immutable);
}

#[test]
fn test_json_decodes_what_it_encodes() {
    let item = Item::from_address(ADDRESS);
    let bytes = ItemCodec::Json.encode(&item).unwrap();

    assert_eq!(ItemCodec::Json.decode(&bytes).unwrap(), item);
}

#[test]
fn test_json_output_is_an_object() {
    let bytes = ItemCodec::Json.encode(&Item::from_address(ADDRESS)).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert!(value.is_object());
    assert_eq!(value["address"].as_array().unwrap().len(), 8);
}

#[test]
fn test_bincode_decodes_what_it_encodes() {
    let item = Item::from_address(ADDRESS);
    let bytes = ItemCodec::Bincode.encode(&item).unwrap();

    assert_eq!(ItemCodec::Bincode.decode(&bytes).unwrap(), item);
}

#[test]
fn test_bincode_smaller_than_json() {
    let item = Item::from_address(ADDRESS);
    let json = ItemCodec::Json.encode(&item).unwrap();
    let bincode = ItemCodec::Bincode.encode(&item).unwrap();

    assert!(bincode.len() < json.len());
}

#[test]
fn test_encoded_size_independent_of_address_bytes() {
    let a = ItemCodec::Bincode.encode(&Item::from_address([0; 8])).unwrap();
    let b = ItemCodec::Bincode.encode(&Item::from_address([0xff; 8])).unwrap();

    assert_eq!(a.len(), b.len());
}

#[test]
fn test_decode_garbage_fails() {
    assert!(ItemCodec::Json.decode(b"not json").is_err());
    assert!(ItemCodec::Bincode.decode(&[1, 2]).is_err());
}
