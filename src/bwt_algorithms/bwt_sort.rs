use std::cmp::Ordering;

use super::sentinel::Sentinel;
use crate::error::{AtError, Result};
use log::{debug, trace};

/// Buckets this small are finished with a comparison sort instead of more radix passes.
const SIMPLE_SORT_LIMIT: usize = 20;

/// Burrows-Wheeler-Transform using the default sentinel. See bwt_encode_with().
pub fn bwt_encode(block: &[u8]) -> Result<Vec<u8>> {
    bwt_encode_with(block, Sentinel::DEFAULT)
}

/// Burrows-Wheeler-Transform. Appends the sentinel, sorts every cyclic rotation and returns
/// the byte preceding each rotation in sorted order (the "last column"). The output is one
/// byte longer than the input. Fails if the sentinel occurs in the input.
pub fn bwt_encode_with(block: &[u8], sentinel: Sentinel) -> Result<Vec<u8>> {
    let anchored = sentinel.anchor(block)?;
    let end = anchored.len();

    let index = rotation_sort(&anchored);

    // The byte before rotation i is at i - 1, wrapping round to the end for rotation 0
    let bwt = index
        .iter()
        .map(|&i| anchored[(i as usize + end - 1) % end])
        .collect::<Vec<u8>>();
    debug!("BWT encoded {} bytes (with sentinel {}).", end, sentinel.byte());
    Ok(bwt)
}

/*
Rotation sort. This is a most-significant-digit radix sort over the cyclic text: the
first pass buckets every rotation by its first byte, and every bucket holding more than
one rotation is refined by the byte at the next offset. Refinement is driven by a work
stack of (start, end, offset) ranges over a single index vec, so memory stays at two
u32 per input byte no matter how deep the refinement goes, and there is no recursion.

Because the sentinel occurs exactly once, no two rotations are equal, and every bucket
splits down to a single rotation before the offset reaches the block length.

A radix pass walks three 256 entry tables whatever the bucket size, so small buckets are
finished by comparing the rotations directly from the current offset.
*/
/// Return the start positions of all cyclic rotations of `text`, in sorted order.
fn rotation_sort(text: &[u8]) -> Vec<u32> {
    let end = text.len();
    let mut index = (0_u32..end as u32).collect::<Vec<u32>>();
    let mut scratch = vec![0_u32; end];
    let mut stack = vec![(0_usize, end, 0_usize)];
    let mut passes = 0_usize;

    while let Some((start, stop, offset)) = stack.pop() {
        if stop - start < 2 || offset >= end {
            continue;
        }
        if stop - start <= SIMPLE_SORT_LIMIT {
            index[start..stop].sort_unstable_by(|&a, &b| rotation_cmp(text, a, b, offset));
            continue;
        }
        passes += 1;

        // Count the bytes found at this offset for every rotation in the range
        let mut counts = [0_usize; 256];
        for &i in &index[start..stop] {
            counts[text[(i as usize + offset) % end] as usize] += 1;
        }

        // Turn the counts into bucket starts
        let mut bucket_start = [0_usize; 256];
        let mut sum = start;
        for (b, &count) in counts.iter().enumerate() {
            bucket_start[b] = sum;
            sum += count;
        }

        // Scatter into the buckets (stable), then copy back into the index
        let mut next = bucket_start;
        for &i in &index[start..stop] {
            let b = text[(i as usize + offset) % end] as usize;
            scratch[next[b]] = i;
            next[b] += 1;
        }
        index[start..stop].copy_from_slice(&scratch[start..stop]);

        // Every bucket that still holds a tie needs the next offset
        for (b, &count) in counts.iter().enumerate() {
            if count > 1 {
                stack.push((bucket_start[b], bucket_start[b] + count, offset + 1));
            }
        }
    }
    trace!("Rotation sort of {} bytes took {} bucket passes.", end, passes);
    index
}

/// Compare the rotations starting at a and b, given that their first `offset` bytes match.
fn rotation_cmp(text: &[u8], a: u32, b: u32, offset: usize) -> Ordering {
    let end = text.len();
    let (a, b) = (a as usize, b as usize);
    for k in offset..end {
        match text[(a + k) % end].cmp(&text[(b + k) % end]) {
            Ordering::Equal => continue,
            unequal => return unequal,
        }
    }
    Ordering::Equal
}

/// Decode a Burrows-Wheeler-Transform made with the default sentinel. See bwt_decode_with().
pub fn bwt_decode(bwt_in: &[u8]) -> Result<Vec<u8>> {
    bwt_decode_with(bwt_in, Sentinel::DEFAULT)
}

/*
Inverse transform. Stable-sorting the transformed bytes gives the first column. The k-th
occurrence of a byte in the input and the k-th occurrence of the same byte in the sorted
column are the same byte of the original text, so `rank[i]` (the sorted position of input
byte i) is all we need to walk the text backwards, starting from the sentinel.
*/
/// Decode a Burrows-Wheeler-Transform. The input must hold the sentinel exactly once; the
/// result is one byte shorter and does not contain the sentinel.
pub fn bwt_decode_with(bwt_in: &[u8], sentinel: Sentinel) -> Result<Vec<u8>> {
    let end = bwt_in.len();
    let s = sentinel.byte();

    let found = bwt_in.iter().filter(|&&b| b == s).count();
    if found != 1 {
        return Err(AtError::Decode(format!(
            "transformed block must hold the sentinel {} exactly once, found it {} times",
            s, found
        )));
    }

    // Frequency count, then the cumulative sum gives where each byte's run starts
    let mut freq = [0_usize; 256];
    bwt_in.iter().for_each(|&b| freq[b as usize] += 1);
    let mut next = [0_usize; 256];
    let mut sum = 0;
    for (b, &count) in freq.iter().enumerate() {
        next[b] = sum;
        sum += count;
    }
    // The sentinel is unique, so its sorted position is the start of its run
    let mut pos = next[s as usize];

    let mut rank = vec![0_u32; end];
    for (i, &b) in bwt_in.iter().enumerate() {
        rank[i] = next[b as usize] as u32;
        next[b as usize] += 1;
    }

    // Walk backwards through the original text
    let mut orig = Vec::with_capacity(end - 1);
    for _ in 1..end {
        let byte = bwt_in[pos];
        if byte == s {
            return Err(AtError::Decode(
                "transformed block is not a valid rotation sort".to_string(),
            ));
        }
        orig.push(byte);
        pos = rank[pos] as usize;
    }
    orig.reverse();
    debug!("BWT decoded {} bytes.", orig.len());
    Ok(orig)
}
