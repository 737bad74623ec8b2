// zlib 容器测试

mod common;

use rstest::rstest;
use zlib_adler::zlib::HEADER;
use zlib_adler::{
    checksum, compress, compress_with, decompress, frame, CompressionLevel, Container, Deflate,
    Result, ZlibBuilder, ZlibError,
};

use common::random_bytes;

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect::<Vec<_>>().join(" ")
}

#[test]
fn test_frame_bytes() {
    insta::assert_snapshot!(hex(&frame(&[0x0b, 0xcf, 0xcc], 0x11E6_0398)), @"78 5e 0b cf cc 11 e6 03 98");
}

#[test]
fn test_frame_empty_input() {
    insta::assert_snapshot!(hex(&frame(&[0x03, 0x00], checksum(b""))), @"78 5e 03 00 00 00 00 01");
}

#[rstest]
#[case::empty(0)]
#[case::small(9)]
#[case::nmax(5552)]
#[case::large(200_000)]
fn test_compress_inflates_with_zlib_decoder(#[case] len: usize) {
    let data = random_bytes(len, len as u64);
    let container = compress(&data).unwrap();

    assert_eq!(&container[..2], &HEADER);
    assert_eq!(&container[container.len() - 4..], &checksum(&data).to_be_bytes());

    // zlib 解码器会校验 adler32 尾部
    let inflated = miniz_oxide::inflate::decompress_to_vec_zlib(&container).unwrap();
    assert_eq!(inflated, data);
    assert_eq!(decompress(&container).unwrap(), data);
}

#[test]
fn test_stored_level() {
    let data = b"no compression at all".to_vec();
    let container = compress_with(&Deflate::new(CompressionLevel::NoCompression), &data).unwrap();
    assert_eq!(decompress(&container).unwrap(), data);
}

#[test]
fn test_custom_compressor_body_is_opaque() {
    let identity = |data: &[u8]| -> Result<Vec<u8>> { Ok(data.to_vec()) };
    let container = compress_with(&identity, b"Wikipedia").unwrap();
    insta::assert_snapshot!(hex(&container), @"78 5e 57 69 6b 69 70 65 64 69 61 11 e6 03 98");

    let parsed = Container::parse(&container).unwrap();
    assert_eq!(parsed.header, HEADER);
    assert_eq!(parsed.body, b"Wikipedia");
    assert_eq!(parsed.checksum, 0x11E6_0398);
}

#[test]
fn test_compressor_failure_yields_no_container() {
    let failing = |_: &[u8]| -> Result<Vec<u8>> { Err(ZlibError::compression("disk full")) };
    let err = compress_with(&failing, b"payload").unwrap_err();
    assert!(matches!(err, ZlibError::Compression { .. }));

    let err = ZlibBuilder::new().data(b"payload").build_with(&failing).unwrap_err();
    assert!(matches!(err, ZlibError::Compression { .. }));
}

#[test]
fn test_builder_output() {
    let out = ZlibBuilder::new()
        .compression_level(CompressionLevel::Level1)
        .data(b"Hello ")
        .data(b"world!")
        .build()
        .unwrap();
    assert_eq!(out.checksum, 0x1D09_045E);
    assert_eq!(out.bytes_read, 12);
    assert_eq!(out.bytes_written, out.output.len());
    assert_eq!(decompress(&out.output).unwrap(), b"Hello world!");
}

#[test]
fn test_corrupted_body() {
    let mut container = compress(&random_bytes(4096, 11)).unwrap();
    container.truncate(container.len() / 2);
    container.extend_from_slice(&[0, 0, 0, 1]);
    assert!(decompress(&container).is_err());
}
