// 各引擎一致性测试

mod common;

use proptest::prelude::*;
use zlib_adler::adler32::simd::CHUNK_SIZE;
use zlib_adler::{checksum_with, Adler32, Engine};

use common::{random_bytes, reference, BOUNDARY_LENGTHS};

#[test]
fn test_scalar_always_listed() {
    let engines = Engine::available();
    assert_eq!(engines[0], Engine::Scalar);
    assert!(engines.contains(&Engine::detect()));
}

#[test]
fn test_small_lengths_every_engine() {
    let data = random_bytes(2 * CHUNK_SIZE + 64, 1);
    for engine in Engine::available() {
        for len in 0..=160 {
            let slice = &data[..len];
            assert_eq!(checksum_with(engine, slice), reference(slice), "{engine} len {len}");
        }
    }
}

#[test]
fn test_chunk_edges_every_engine() {
    let data = random_bytes(2 * CHUNK_SIZE + 64, 2);
    for engine in Engine::available() {
        for len in (CHUNK_SIZE - 40..=CHUNK_SIZE + 40).chain(2 * CHUNK_SIZE - 8..=2 * CHUNK_SIZE + 64) {
            let slice = &data[..len];
            assert_eq!(checksum_with(engine, slice), reference(slice), "{engine} len {len}");
        }
    }
}

#[test]
fn test_worst_case_every_engine() {
    for engine in Engine::available() {
        for &len in BOUNDARY_LENGTHS.iter().chain(&[1 << 20]) {
            let data = vec![0xFFu8; len];
            assert_eq!(checksum_with(engine, &data), reference(&data), "{engine} len {len}");
        }
    }
}

#[test]
fn test_worst_case_state_every_engine() {
    // both sums at MOD - 1 before a saturated chunk
    let start = Adler32::from_checksum((65520 << 16) | 65520);
    let data = vec![0xFFu8; 3 * CHUNK_SIZE + 17];
    let mut expected = start;
    expected.update_with(Engine::Scalar, &data);
    for engine in Engine::available() {
        let mut adler = start;
        adler.update_with(engine, &data);
        assert_eq!(adler, expected, "{engine}");
    }
}

#[test]
fn test_unavailable_engine_falls_back() {
    let data = random_bytes(10_000, 3);
    for engine in Engine::ALL {
        assert_eq!(checksum_with(engine, &data), reference(&data), "{engine}");
    }
}

proptest! {
    #[test]
    fn prop_engines_agree(data in prop::collection::vec(any::<u8>(), 0..20_000)) {
        let expected = reference(&data);
        for engine in Engine::available() {
            prop_assert_eq!(checksum_with(engine, &data), expected);
        }
    }

    #[test]
    fn prop_streaming_pieces(
        data in prop::collection::vec(any::<u8>(), 0..12_000),
        piece in 1usize..7000,
    ) {
        for engine in Engine::available() {
            let mut adler = Adler32::new();
            for chunk in data.chunks(piece) {
                adler.update_with(engine, chunk);
            }
            prop_assert_eq!(adler.finish(), reference(&data));
        }
    }
}
