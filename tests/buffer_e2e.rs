//! End-to-end verification for the buffer surface.
//!
//! Walks the full API the way a host caller would: construct, write, fill,
//! slice, search, concatenate, export. Each test covers one workflow rather
//! than one method.

mod common;

use common::init_test_logging;
use fixbuf::{Buffer, BufferRecord, Encoding, Error, Source};

#[test]
fn e2e_build_write_and_read_back() {
    init_test_logging();

    let mut buf = Buffer::alloc(16);
    buf.write("hello", 0)
        .and_then(|b| b.write(" ", 5))
        .and_then(|b| b.write("world", 6))
        .expect("writes");

    assert_eq!(
        buf.decode_range(Encoding::Utf8, 0, Some(11)).expect("decode"),
        "hello world"
    );
    assert_eq!(buf.size(), 11); // the zero tail does not count
    assert_eq!(buf.len(), 16);
}

#[test]
fn e2e_hex_pipeline() {
    init_test_logging();

    // hex in, bytes through, hex out (lowercased)
    let buf = Buffer::from_source("CAFEBABE", Encoding::Hex).expect("from hex");
    assert_eq!(&buf[..], &[0xCA, 0xFE, 0xBA, 0xBE]);
    assert_eq!(buf.decode(Encoding::Hex).expect("to hex"), "cafebabe");

    // searching with a hex needle
    assert_eq!(buf.index_of("babe", 0, Encoding::Hex).expect("found"), 2);
}

#[test]
fn e2e_fill_clear_cycle() {
    init_test_logging();

    let mut buf = Buffer::alloc_filled(8, "ab", Encoding::Utf8).expect("alloc");
    assert_eq!(buf.decode(Encoding::Utf8).expect("decode"), "abababab");

    buf.clear_range(2, Some(6)).expect("clear range");
    assert_eq!(&buf[..], &[0x61, 0x62, 0, 0, 0, 0, 0x61, 0x62]);
    assert_eq!(buf.size(), 4);

    buf.clear();
    assert_eq!(buf.size(), 0);
}

#[test]
fn e2e_slice_and_copy_between_buffers() {
    init_test_logging();

    let src = Buffer::from_source("0123456789", Encoding::Utf8).expect("src");
    let mut dst = Buffer::alloc(4);

    src.copy_into(&mut dst, 0, 3, Some(7)).expect("copy");
    assert_eq!(dst.decode(Encoding::Utf8).expect("decode"), "3456");

    // the copy landed in dst's own storage
    let slice = src.slice(3, Some(7));
    assert_eq!(slice, dst);
    dst[0] = b'x';
    assert_eq!(slice.decode(Encoding::Utf8).expect("decode"), "3456");
}

#[test]
fn e2e_concat_workflows() {
    init_test_logging();

    let a = Buffer::from_source("ab", Encoding::Utf8).expect("a");
    let b = Buffer::from_source("cd", Encoding::Utf8).expect("b");
    let c = Buffer::from_source("ef", Encoding::Utf8).expect("c");

    let joined = Buffer::concat([&a, &b, &c]);
    assert_eq!(joined.decode(Encoding::Utf8).expect("decode"), "abcdef");

    // explicit truncating length: no error, later bytes silently dropped
    let cut = Buffer::concat_sized([&a, &b, &c], 3);
    assert_eq!(cut.decode(Encoding::Utf8).expect("decode"), "abc");

    // operator form
    assert_eq!((&a + &b).decode(Encoding::Utf8).expect("decode"), "abcd");
}

#[test]
fn e2e_search_policies() {
    init_test_logging();

    let buf = Buffer::from_source("to be or not to be", Encoding::Utf8).expect("buf");

    assert_eq!(buf.index_of("be", 0, Encoding::Utf8).expect("first"), 3);
    assert_eq!(buf.last_index_of("be", 0, Encoding::Utf8).expect("last"), 16);
    // relative to the sub-range starting at 4
    assert_eq!(buf.index_of("be", 4, Encoding::Utf8).expect("relative"), 12);

    assert_eq!(
        buf.index_of("question", 0, Encoding::Utf8).expect_err("absent"),
        Error::NotFound
    );

    // legacy truthiness: a hit at relative index 0 reads as absent
    assert!(buf.includes("be", 0, Encoding::Utf8));
    assert!(!buf.includes("to", 0, Encoding::Utf8));
    assert!(!buf.includes("question", 0, Encoding::Utf8));
}

#[test]
fn e2e_export_record() {
    init_test_logging();

    let buf = Buffer::alloc_filled(3, 1u8, Encoding::Utf8).expect("alloc");
    let json = serde_json::to_string(&buf.to_record()).expect("serialize");
    assert_eq!(json, r#"{"type":"Buffer","data":[1,1,1]}"#);

    let record: BufferRecord = serde_json::from_str(&json).expect("deserialize");
    let back = Buffer::try_from(record).expect("rebuild");
    assert_eq!(back, buf);
}

#[test]
fn e2e_settle_shapes() {
    init_test_logging();

    // every value shape a buffer accepts, resolved at the call site
    let donor = Buffer::from_source("zz", Encoding::Utf8).expect("donor");
    let mut buf = Buffer::alloc(8);
    buf.write("ab", 0)
        .and_then(|b| b.write(300i64, 2)) // 300 % 256 == 44
        .and_then(|b| b.write([9u8, 8].as_slice(), 3))
        .and_then(|b| b.write(&donor, 5))
        .expect("writes");
    assert_eq!(&buf[..], &[0x61, 0x62, 44, 9, 8, 0x7A, 0x7A, 0]);

    assert!(Source::from(&donor).is_buffer());
    assert!(!Source::from("text").is_buffer());
}

#[test]
fn e2e_display_preview() {
    init_test_logging();

    let buf = Buffer::from_source_sized("ab", Encoding::Utf8, 40).expect("buf");
    let rendered = format!("{buf}");
    assert!(rendered.starts_with("<Buffer 61 62 00"));
    assert!(rendered.ends_with("... 5 more bytes>"));
}
