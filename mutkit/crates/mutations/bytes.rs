use rand::{seq::SliceRandom, Rng};
use tracing::trace;

use super::{
    constants::{
        INTERESTING_16, INTERESTING_32, INTERESTING_8, INT_WIDTHS, MAX_BYTE_DELTA, MAX_DUPLICATES,
        MAX_EDIT_ATTEMPTS, MAX_SHRINK_ATTEMPTS, TOKENS,
    },
    traits::{BytesMutations, Mutable},
};
use crate::random::RandomChoice;

impl Mutable for Vec<u8> {
    fn mutate(&mut self, random: &mut impl Rng, room: usize) -> bool {
        let mut scratch = Vec::new();
        mutate_bytes(self, random, room, &mut scratch)
    }
}

/// Applies one random [`BytesMutations`] edit to `bytes`, keeping `bytes.len() <= room`.
///
/// Edits are drawn uniformly. An edit that does not apply (shrinking an empty buffer, growing
/// one with no room left) or that leaves the buffer unchanged is skipped and another one is
/// drawn, at most [`MAX_EDIT_ATTEMPTS`] times. `scratch` holds the run an edit rewrites while
/// it is compared or duplicated, and is reused across calls to avoid reallocating.
///
/// Expects `bytes.len() <= room`, see [`shrink_bytes`] for oversized buffers.
pub fn mutate_bytes(
    bytes: &mut Vec<u8>,
    random: &mut impl Rng,
    room: usize,
    scratch: &mut Vec<u8>,
) -> bool {
    for _ in 0..MAX_EDIT_ATTEMPTS {
        let mutation = random.edit::<BytesMutations>();
        if apply(bytes, mutation, random, room, scratch) {
            trace!(mutation = <&str>::from(mutation), len = bytes.len(), "bytes mutated");
            return true;
        }
    }
    false
}

/// Shrinks `bytes` to at most `room` bytes: a few random range removals first, then a
/// truncation if they were not enough.
pub fn shrink_bytes(bytes: &mut Vec<u8>, random: &mut impl Rng, room: usize) {
    for _ in 0..MAX_SHRINK_ATTEMPTS {
        if bytes.len() <= room {
            return;
        }
        remove_range(bytes, random);
    }
    bytes.truncate(room);
}

/// Applies `mutation` and returns whether `bytes` changed. A `false` return always leaves
/// `bytes` as it was.
fn apply(
    bytes: &mut Vec<u8>,
    mutation: BytesMutations,
    random: &mut impl Rng,
    room: usize,
    scratch: &mut Vec<u8>,
) -> bool {
    let free = room.saturating_sub(bytes.len());

    match mutation {
        BytesMutations::FlipBit => {
            check_not_empty!(bytes);
            let idx = random.random_range(0..bytes.len());
            bytes[idx] ^= 1 << random.random_range(0..8u32);
            true
        }
        BytesMutations::XorByte => {
            check_not_empty!(bytes);
            let idx = random.random_range(0..bytes.len());
            bytes[idx] ^= random.random_range(1..=u8::MAX);
            true
        }
        BytesMutations::SwapByte => {
            check_not_smaller!(bytes, 2);
            let idx1 = random.random_range(0..bytes.len());
            let idx2 = (idx1 + random.random_range(1..bytes.len())) % bytes.len();
            bytes.swap(idx1, idx2);
            bytes[idx1] != bytes[idx2]
        }
        BytesMutations::ArithmeticInt => {
            let width = *random.choice(&INT_WIDTHS);
            check_not_smaller!(bytes, width);
            let idx = random.random_range(0..=bytes.len() - width);
            let big_endian = random.random::<bool>();
            let delta = random.random_range(1..=MAX_BYTE_DELTA);

            let slot = &mut bytes[idx..idx + width];
            let before = read_uint(slot, big_endian);
            let value = if random.random::<bool>() {
                before.wrapping_add(delta)
            } else {
                before.wrapping_sub(delta)
            };
            write_uint(slot, value, big_endian);
            read_uint(slot, big_endian) != before
        }
        BytesMutations::SetInteresting => {
            let width = *random.choice(&INT_WIDTHS[..3]);
            check_not_smaller!(bytes, width);
            let idx = random.random_range(0..=bytes.len() - width);
            let value = match width {
                1 => *random.choice(&INTERESTING_8) as u8 as u64,
                2 => *random.choice(&INTERESTING_16) as u16 as u64,
                _ => *random.choice(&INTERESTING_32) as u32 as u64,
            };
            let big_endian = random.random::<bool>();

            let slot = &mut bytes[idx..idx + width];
            let before = read_uint(slot, big_endian);
            write_uint(slot, value, big_endian);
            before != value
        }
        BytesMutations::OverwriteRandom => {
            check_not_empty!(bytes);
            let idx = random.random_range(0..bytes.len());
            let len = choose_len(random, bytes.len() - idx);

            let run = &mut bytes[idx..idx + len];
            scratch.clear();
            scratch.extend_from_slice(run);
            random.fill_bytes(run);
            run != scratch.as_slice()
        }
        BytesMutations::OverwriteConstant => {
            check_not_empty!(bytes);
            let idx = random.random_range(0..bytes.len());
            let len = choose_len(random, bytes.len() - idx);
            let byte = random.random::<u8>();

            let run = &mut bytes[idx..idx + len];
            let changed = run.iter().any(|b| *b != byte);
            run.fill(byte);
            changed
        }
        BytesMutations::InsertRandom => {
            check_room!(free, 1);
            let len = choose_len(random, free);
            let idx = random.random_range(0..=bytes.len());
            open_gap(bytes, idx, len);
            random.fill_bytes(&mut bytes[idx..idx + len]);
            true
        }
        BytesMutations::InsertToken => {
            let token = *random.choice(&TOKENS);
            check_room!(free, token.len());
            let idx = random.random_range(0..=bytes.len());
            open_gap(bytes, idx, token.len());
            bytes[idx..idx + token.len()].copy_from_slice(token);
            true
        }
        BytesMutations::InsertConstant => {
            check_room!(free, 1);
            let len = choose_len(random, free);
            let idx = random.random_range(0..=bytes.len());
            let byte = random.random::<u8>();
            open_gap(bytes, idx, len);
            bytes[idx..idx + len].fill(byte);
            true
        }
        BytesMutations::RemoveRange => {
            check_not_smaller!(bytes, 2);
            remove_range(bytes, random);
            true
        }
        BytesMutations::DuplicateRange => {
            check_not_empty!(bytes);
            check_room!(free, 1);
            let src = random.random_range(0..bytes.len());
            let len = choose_len(random, bytes.len() - src).min(free);
            let copies = random.random_range(1..=MAX_DUPLICATES).min(free / len);
            scratch.clear();
            scratch.extend_from_slice(&bytes[src..src + len]);

            let dst = random.random_range(0..=bytes.len());
            open_gap(bytes, dst, len * copies);
            for slot in bytes[dst..dst + len * copies].chunks_exact_mut(len) {
                slot.copy_from_slice(scratch.as_slice());
            }
            true
        }
        BytesMutations::SwapRanges => {
            check_not_smaller!(bytes, 2);
            let len = choose_len(random, bytes.len() / 2);
            let first = random.random_range(0..=bytes.len() - 2 * len);
            let second = random.random_range(first + len..=bytes.len() - len);
            let (head, tail) = bytes.split_at_mut(second);
            let (left, right) = (&mut head[first..first + len], &mut tail[..len]);
            let changed = left != right;
            left.swap_with_slice(right);
            changed
        }
        BytesMutations::ShuffleRange => {
            check_not_smaller!(bytes, 2);
            let idx = random.random_range(0..bytes.len() - 1);
            let len = choose_len(random, bytes.len() - idx);

            let run = &mut bytes[idx..idx + len];
            scratch.clear();
            scratch.extend_from_slice(run);
            run.shuffle(random);
            run != scratch.as_slice()
        }
    }
}

/// Picks a run length in `1..=n`, strongly biased towards short runs: 90% of the time at most
/// 8 bytes, 9% at most 32, and 1% anything up to `n`.
///
/// `n` must be at least 1.
pub(crate) fn choose_len(random: &mut impl Rng, n: usize) -> usize {
    let max = match random.random_range(0..100) {
        x if x < 90 => n.min(8),
        x if x < 99 => n.min(32),
        _ => n,
    };
    random.random_range(1..=max)
}

fn remove_range(bytes: &mut Vec<u8>, random: &mut impl Rng) {
    if bytes.is_empty() {
        return;
    }
    let idx = random.random_range(0..bytes.len());
    let len = choose_len(random, bytes.len() - idx);
    bytes.drain(idx..idx + len);
}

/// Grows `bytes` by `len` at `idx`, shifting the tail right. The gap keeps stale contents.
fn open_gap(bytes: &mut Vec<u8>, idx: usize, len: usize) {
    let end = bytes.len();
    bytes.resize(end + len, 0);
    bytes.copy_within(idx..end, idx + len);
}

fn read_uint(slot: &[u8], big_endian: bool) -> u64 {
    let fold = |acc: u64, byte: &u8| (acc << 8) | u64::from(*byte);
    if big_endian {
        slot.iter().fold(0, fold)
    } else {
        slot.iter().rev().fold(0, fold)
    }
}

fn write_uint(slot: &mut [u8], mut value: u64, big_endian: bool) {
    if big_endian {
        for byte in slot.iter_mut().rev() {
            *byte = value as u8;
            value >>= 8;
        }
    } else {
        for byte in slot.iter_mut() {
            *byte = value as u8;
            value >>= 8;
        }
    }
}
