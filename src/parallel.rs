//! Parallel adler32 over contiguous sub-ranges.
//!
//! Each range is checksummed independently and the partial results are folded
//! left to right with [`combine`]. The result always equals the sequential
//! checksum.
//!
//! # Example
//!
//! ```
//! use zlib_adler::{checksum, parallel::checksum_chunks};
//!
//! let data = b"The quick brown fox jumps over the lazy dog";
//! let chunks: Vec<&[u8]> = data.chunks(16).collect();
//! assert_eq!(checksum_chunks(&chunks), checksum(data));
//! ```

use std::thread;

use crate::adler32::{checksum, combine, ADLER32_INIT};

/// Ranges shorter than this are not worth a thread
pub const MIN_SPLIT: usize = 64 * 1024;

/// Checksum of the concatenation of `chunks`
pub fn checksum_chunks(chunks: &[&[u8]]) -> u32 {
    chunks.iter().fold(ADLER32_INIT, |acc, chunk| {
        combine(acc, checksum(chunk), chunk.len() as u64)
    })
}

/// Fold pre-computed `(checksum, length)` pairs, in input order
pub fn combine_checksums(parts: &[(u32, u64)]) -> u32 {
    parts
        .iter()
        .fold(ADLER32_INIT, |acc, &(sum, len)| combine(acc, sum, len))
}

/// Checksum `data` on up to `threads` scoped threads.
///
/// Inputs too small to give every thread `MIN_SPLIT` bytes use fewer
/// threads; a single range runs on the calling thread.
pub fn checksum_parallel(data: &[u8], threads: usize) -> u32 {
    let ranges = threads.max(1).min(data.len() / MIN_SPLIT).max(1);
    if ranges == 1 {
        return checksum(data);
    }

    let range_len = data.len().div_ceil(ranges);
    log::trace!(
        "adler32 over {} bytes in {} ranges of {} bytes",
        data.len(),
        ranges,
        range_len
    );

    let parts: Vec<(u32, u64)> = thread::scope(|scope| {
        let handles: Vec<_> = data
            .chunks(range_len)
            .map(|range| scope.spawn(move || (checksum(range), range.len() as u64)))
            .collect();
        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(part) => part,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    });

    combine_checksums(&parts)
}
