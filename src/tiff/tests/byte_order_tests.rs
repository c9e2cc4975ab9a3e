//! Tests for the byte order module

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};

use crate::io::byte_order::{BigEndianHandler, ByteOrder, ByteOrderHandler, LittleEndianHandler};

#[test]
fn test_byte_order_detection_little_endian() {
    assert_eq!(ByteOrder::detect(b"II*\0\x08\0\0\0"), Some(ByteOrder::LittleEndian));
}

#[test]
fn test_byte_order_detection_big_endian() {
    assert_eq!(ByteOrder::detect(b"MM\0*\0\0\0\x08"), Some(ByteOrder::BigEndian));
}

#[test]
fn test_byte_order_detection_invalid() {
    // Byte order marker alone is not enough, the version must match it
    assert_eq!(ByteOrder::detect(b"II\0*"), None);
    assert_eq!(ByteOrder::detect(b"MM*\0"), None);
    // BigTIFF
    assert_eq!(ByteOrder::detect(b"II+\0"), None);
    assert_eq!(ByteOrder::detect(b"\x89PNG"), None);
}

#[test]
fn test_byte_order_detection_short_buffer() {
    assert_eq!(ByteOrder::detect(b""), None);
    assert_eq!(ByteOrder::detect(b"II*"), None);
}

#[test]
fn test_little_endian_handler() {
    let mut buffer = Vec::new();
    buffer.write_u16::<LittleEndian>(0x1234).unwrap();
    buffer.write_i16::<LittleEndian>(-2).unwrap();
    buffer.write_u32::<LittleEndian>(0x12345678).unwrap();
    buffer.write_i32::<LittleEndian>(-70000).unwrap();
    buffer.write_f32::<LittleEndian>(1.5).unwrap();
    buffer.write_f64::<LittleEndian>(-0.25).unwrap();

    let handler = LittleEndianHandler;
    let mut p = &buffer[..];

    assert_eq!(handler.read_u16(&mut p).unwrap(), 0x1234);
    assert_eq!(handler.read_i16(&mut p).unwrap(), -2);
    assert_eq!(handler.read_u32(&mut p).unwrap(), 0x12345678);
    assert_eq!(handler.read_i32(&mut p).unwrap(), -70000);
    assert_eq!(handler.read_f32(&mut p).unwrap(), 1.5);
    assert_eq!(handler.read_f64(&mut p).unwrap(), -0.25);
    assert!(p.is_empty());
}

#[test]
fn test_big_endian_handler() {
    let mut buffer = Vec::new();
    buffer.write_u16::<BigEndian>(0x1234).unwrap();
    buffer.write_i16::<BigEndian>(-2).unwrap();
    buffer.write_u32::<BigEndian>(0x12345678).unwrap();
    buffer.write_i32::<BigEndian>(-70000).unwrap();
    buffer.write_f32::<BigEndian>(1.5).unwrap();
    buffer.write_f64::<BigEndian>(-0.25).unwrap();

    let handler = BigEndianHandler;
    let mut p = &buffer[..];

    assert_eq!(handler.read_u16(&mut p).unwrap(), 0x1234);
    assert_eq!(handler.read_i16(&mut p).unwrap(), -2);
    assert_eq!(handler.read_u32(&mut p).unwrap(), 0x12345678);
    assert_eq!(handler.read_i32(&mut p).unwrap(), -70000);
    assert_eq!(handler.read_f32(&mut p).unwrap(), 1.5);
    assert_eq!(handler.read_f64(&mut p).unwrap(), -0.25);
    assert!(p.is_empty());
}

#[test]
fn test_handler_short_input_is_an_error() {
    let handler = ByteOrder::LittleEndian.create_handler();
    let data = [0x01u8, 0x02, 0x03];
    let mut p = &data[..];

    assert!(handler.read_u32(&mut p).is_err());
    assert!(handler.read_f64(&mut &data[..]).is_err());
}

#[test]
fn test_u32_from_bytes() {
    let bytes = [0x01, 0x02, 0x03, 0x04];
    assert_eq!(ByteOrder::LittleEndian.u32_from_bytes(bytes), 0x04030201);
    assert_eq!(ByteOrder::BigEndian.u32_from_bytes(bytes), 0x01020304);
}
