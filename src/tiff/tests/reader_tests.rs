//! Tests for header detection and the directory walk

use crate::io::byte_order::ByteOrder;
use crate::tiff::constants::field_types;
use crate::tiff::errors::{ErrorKind, TiffError};
use crate::tiff::reader::{TiffReader, TiffReaderBuilder};
use crate::tiff::tests::test_utils::*;

fn read(data: Vec<u8>) -> Result<crate::tiff::types::TIFF, TiffError> {
    TiffReader::new().read(data)
}

#[test]
fn test_minimal_file_loads_in_both_orders() {
    for order in BOTH_ORDERS {
        let tiff = read(single_ifd(order, &[])).unwrap();

        assert_eq!(tiff.byte_order(), order);
        assert_eq!(tiff.directory_count(), 1);
        assert!(tiff.tags().is_empty());
        for tag in [0u16, 1, 256, 257, 270, 65535] {
            assert!(tiff.find_tag(tag).is_none());
        }
    }
}

#[test]
fn test_concrete_scenario() {
    let data = vec![
        b'I', b'I', 0x2a, 0x00, // magic
        8, 0, 0, 0,             // first IFD offset
        1, 0,                   // one entry
        0x00, 0x01,             // tag 256
        3, 0,                   // SHORT
        1, 0, 0, 0,             // count 1
        0x64, 0, 0, 0,          // value 100
        0, 0, 0, 0,             // no next IFD
    ];

    let tiff = read(data).unwrap();
    assert_eq!(tiff.get_uint(256), Some(100));
}

#[test]
fn test_unknown_magic_is_format_mismatch() {
    let err = read(b"GIF89a\0\0\0\0".to_vec()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FormatMismatch);
    assert!(matches!(err, TiffError::FormatMismatch(ref magic) if magic == b"GIF8"));
}

#[test]
fn test_tiny_buffers() {
    assert_eq!(read(Vec::new()).unwrap_err().kind(), ErrorKind::FormatMismatch);
    assert_eq!(read(b"II*".to_vec()).unwrap_err().kind(), ErrorKind::FormatMismatch);

    let err = read(b"II*\0\x08\0\0".to_vec()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Truncated);
    assert!(matches!(err, TiffError::TruncatedHeader(7)));
}

#[test]
fn test_first_ifd_past_end_is_truncated() {
    for order in BOTH_ORDERS {
        let err = read(header(order, 1000)).unwrap_err();
        assert!(matches!(err, TiffError::TruncatedDirectory { index: 0, offset: 1000 }));
    }
}

#[test]
fn test_directory_header_needs_room_for_next_pointer() {
    // Entry count of zero fits, but the next pointer is cut off
    let mut data = header(ByteOrder::LittleEndian, 8);
    data.extend_from_slice(&[0, 0, 0, 0, 0]);

    let err = read(data).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Truncated);
}

#[test]
fn test_entry_count_exceeding_buffer_by_one_byte() {
    for order in BOTH_ORDERS {
        let entries = [
            TestEntry::new(256, field_types::SHORT, 1, slot_u16(order, 10)),
            TestEntry::new(257, field_types::SHORT, 1, slot_u16(order, 20)),
        ];
        let mut data = single_ifd(order, &entries);
        assert_eq!(data.len(), 8 + ifd_size(2));
        assert!(read(data.clone()).is_ok());

        data.pop();
        let err = read(data).unwrap_err();
        assert!(matches!(err, TiffError::TruncatedDirectory { index: 0, offset: 8 }));
    }
}

#[test]
fn test_huge_entry_count_is_truncated() {
    let mut data = header(ByteOrder::BigEndian, 8);
    put_u16(&mut data, ByteOrder::BigEndian, u16::MAX);
    data.extend_from_slice(&[0; 64]);

    let err = read(data).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Truncated);
}

#[test]
fn test_three_chained_directories() {
    for order in BOTH_ORDERS {
        let second = (8 + ifd_size(1)) as u32;
        let third = second + ifd_size(1) as u32;

        let mut data = header(order, 8);
        put_ifd(&mut data, order, &[TestEntry::new(256, field_types::SHORT, 1, slot_u16(order, 1))], second);
        put_ifd(&mut data, order, &[TestEntry::new(257, field_types::SHORT, 1, slot_u16(order, 2))], third);
        put_ifd(&mut data, order, &[TestEntry::new(258, field_types::SHORT, 1, slot_u16(order, 3))], 0);

        let tiff = read(data).unwrap();
        assert_eq!(tiff.directory_count(), 3);
        assert_eq!(tiff.tags().len(), 3);
        assert_eq!(tiff.get_uint(256), Some(1));
        assert_eq!(tiff.get_uint(257), Some(2));
        assert_eq!(tiff.get_uint(258), Some(3));

        let offsets: Vec<u64> = tiff.tags().directories().iter().map(|d| d.offset).collect();
        assert_eq!(offsets, vec![8, second as u64, third as u64]);
        assert_eq!(tiff.find_tag(257).unwrap().directory(), 1);
    }
}

#[test]
fn test_directory_entries_follow_directory_spans() {
    let order = ByteOrder::BigEndian;
    let second = (8 + ifd_size(2)) as u32;

    let mut data = header(order, 8);
    put_ifd(&mut data, order, &[
        TestEntry::new(256, field_types::SHORT, 1, slot_u16(order, 1)),
        TestEntry::new(257, field_types::SHORT, 1, slot_u16(order, 2)),
    ], second);
    put_ifd(&mut data, order, &[TestEntry::new(256, field_types::SHORT, 1, slot_u16(order, 3))], 0);

    let tiff = read(data).unwrap();
    let tags = tiff.tags();
    for dir in tags.directories() {
        let entries = tags.directory_entries(dir.number).unwrap();
        assert_eq!(entries.len(), dir.entry_count());
        assert!(entries.iter().all(|e| e.directory() == dir.number));
    }

    let first: Vec<u16> = tags.directory_entries(0).unwrap().iter().map(|e| e.tag()).collect();
    assert_eq!(first, vec![256, 257]);
    assert_eq!(tags.directory_entries(1).unwrap()[0].value(), slot_u16(order, 3));
    assert!(tags.directory_entries(2).is_none());
}

#[test]
fn test_single_directory_holds_only_its_entries() {
    let order = ByteOrder::LittleEndian;
    // A second, unreferenced directory trails the first one
    let mut data = header(order, 8);
    put_ifd(&mut data, order, &[TestEntry::new(256, field_types::SHORT, 1, slot_u16(order, 1))], 0);
    put_ifd(&mut data, order, &[TestEntry::new(257, field_types::SHORT, 1, slot_u16(order, 2))], 0);

    let tiff = read(data).unwrap();
    assert_eq!(tiff.directory_count(), 1);
    assert_eq!(tiff.tags().len(), 1);
    assert!(tiff.find_tag(257).is_none());
}

#[test]
fn test_truncated_later_directory_reports_its_index() {
    let order = ByteOrder::LittleEndian;
    let mut data = header(order, 8);
    put_ifd(&mut data, order, &[], 5000);

    let err = read(data).unwrap_err();
    assert!(matches!(err, TiffError::TruncatedDirectory { index: 1, offset: 5000 }));
}

#[test]
fn test_self_referencing_directory_is_a_loop() {
    let order = ByteOrder::LittleEndian;
    let mut data = header(order, 8);
    put_ifd(&mut data, order, &[], 8);

    let err = read(data).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DirectoryChain);
    assert!(matches!(err, TiffError::DirectoryLoop { index: 1, offset: 8 }));
}

#[test]
fn test_loop_back_to_earlier_directory() {
    let order = ByteOrder::BigEndian;
    let second = (8 + ifd_size(0)) as u32;
    let mut data = header(order, 8);
    put_ifd(&mut data, order, &[], second);
    put_ifd(&mut data, order, &[], 8);

    let err = read(data).unwrap_err();
    assert!(matches!(err, TiffError::DirectoryLoop { index: 2, offset: 8 }));
}

#[test]
fn test_directory_limit() {
    let order = ByteOrder::LittleEndian;
    let mut data = header(order, 8);
    let mut next = 8;
    for i in 0..5 {
        next += ifd_size(0) as u32;
        put_ifd(&mut data, order, &[], if i == 4 { 0 } else { next });
    }

    let reader = TiffReaderBuilder::new().max_directories(5).build();
    assert_eq!(reader.read(data.clone()).unwrap().directory_count(), 5);

    let reader = TiffReaderBuilder::new().max_directories(4).build();
    let err = reader.read(data).unwrap_err();
    assert!(matches!(err, TiffError::TooManyDirectories(4)));
}

#[test]
fn test_duplicate_tags_return_first() {
    let order = ByteOrder::LittleEndian;
    let second = (8 + ifd_size(2)) as u32;
    let mut data = header(order, 8);
    put_ifd(&mut data, order, &[
        TestEntry::new(256, field_types::SHORT, 1, slot_u16(order, 7)),
        TestEntry::new(256, field_types::SHORT, 1, slot_u16(order, 8)),
    ], second);
    put_ifd(&mut data, order, &[TestEntry::new(256, field_types::SHORT, 1, slot_u16(order, 9))], 0);

    let tiff = read(data).unwrap();
    assert_eq!(tiff.tags().len(), 3);
    assert_eq!(tiff.get_uint(256), Some(7));
    assert_eq!(tiff.find_tag_in(1, 256).and_then(|e| tiff.uint_value(e)), Some(9));
    assert!(tiff.find_tag_in(2, 256).is_none());
}

#[test]
fn test_entries_keep_raw_fields() {
    let order = ByteOrder::BigEndian;
    let data = single_ifd(order, &[TestEntry::new(0x8765, 99, 3, [1, 2, 3, 4])]);

    let tiff = read(data).unwrap();
    let entry = tiff.find_tag(0x8765).unwrap();
    assert_eq!(entry.field_type(), 99);
    assert_eq!(entry.count(), 3);
    assert_eq!(entry.value(), [1, 2, 3, 4]);
    assert_eq!(entry.directory(), 0);
}

#[test]
fn test_reader_default_limit() {
    assert_eq!(TiffReader::new().max_directories(), 1024);
}
