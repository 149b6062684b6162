use std::mem::size_of;

use rand::Rng;

use super::{
    constants::{INTERESTING_16, INTERESTING_32, INTERESTING_8, MAX_DELTA, MAX_EDIT_ATTEMPTS},
    traits::{IntMutations, Mutable},
};
use crate::random::RandomChoice;

use IntMutations::*;

const SIGNED: &[IntMutations] = &[SetInteresting, AddDelta, SubDelta, FlipBit, SwapBytes, Negate];
const SIGNED_BYTE: &[IntMutations] = &[SetInteresting, AddDelta, SubDelta, FlipBit, Negate];
const UNSIGNED: &[IntMutations] = &[SetInteresting, AddDelta, SubDelta, FlipBit, SwapBytes];
const UNSIGNED_BYTE: &[IntMutations] = &[SetInteresting, AddDelta, SubDelta, FlipBit];

/// Interesting value out of the tables that fit in `width` bytes, sign-extended.
fn afl_interesting(random: &mut impl Rng, width: usize) -> i64 {
    let tables = match width {
        1 => 1,
        2 => 2,
        _ => 3,
    };
    match random.random_range(0..tables) {
        0 => i64::from(*random.choice(&INTERESTING_8)),
        1 => i64::from(*random.choice(&INTERESTING_16)),
        _ => i64::from(*random.choice(&INTERESTING_32)),
    }
}

macro_rules! impl_mutable {
    ($type:ty, $edits:expr) => {
        impl Mutable for $type {
            fn mutate(&mut self, random: &mut impl Rng, _room: usize) -> bool {
                const BITS: u32 = <$type>::BITS;
                let original = *self;

                for _ in 0..MAX_EDIT_ATTEMPTS {
                    let value = match *random.choice($edits) {
                        SetInteresting => {
                            if random.random::<bool>() {
                                let boundary: [$type; 7] = [
                                    0,
                                    1,
                                    (0 as $type).wrapping_sub(1),
                                    <$type>::MIN,
                                    <$type>::MAX,
                                    <$type>::MIN.wrapping_add(1),
                                    <$type>::MAX.wrapping_sub(1),
                                ];
                                *random.choice(&boundary)
                            } else {
                                afl_interesting(random, size_of::<$type>()) as $type
                            }
                        }
                        AddDelta => {
                            let delta = random.random_range(1..=MAX_DELTA) as $type;
                            original.checked_add(delta).unwrap_or(original.wrapping_sub(delta))
                        }
                        SubDelta => {
                            let delta = random.random_range(1..=MAX_DELTA) as $type;
                            original.checked_sub(delta).unwrap_or(original.wrapping_add(delta))
                        }
                        FlipBit => {
                            let bit = random.random_range(0..BITS);
                            original ^ (1 as $type).wrapping_shl(bit)
                        }
                        SwapBytes => original.swap_bytes(),
                        Negate => original.wrapping_neg(),
                    };

                    if value != original {
                        *self = value;
                        return true;
                    }
                }
                false
            }
        }
    };
}

impl_mutable!(i8, SIGNED_BYTE);
impl_mutable!(i16, SIGNED);
impl_mutable!(i32, SIGNED);
impl_mutable!(i64, SIGNED);
impl_mutable!(u8, UNSIGNED_BYTE);
impl_mutable!(u16, UNSIGNED);
impl_mutable!(u32, UNSIGNED);
impl_mutable!(u64, UNSIGNED);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::PcgRand;

    #[test]
    fn every_call_changes_the_value() {
        let mut random = PcgRand::new(41);
        let mut value = 0i32;
        for _ in 0..5000 {
            let before = value;
            assert!(value.mutate(&mut random, 4));
            assert_ne!(before, value);
        }
    }

    #[test]
    fn i32_reaches_boundary_constants() {
        let mut random = PcgRand::new(42);
        let mut hits = 0;
        for _ in 0..1000 {
            let mut value = 0i32;
            value.mutate(&mut random, 4);
            if [i32::MAX, i32::MIN, -1, 1].contains(&value) {
                hits += 1;
            }
        }
        assert!(hits > 0);
    }

    #[test]
    fn deltas_do_not_overflow() {
        let mut random = PcgRand::new(43);
        for start in [i8::MIN, i8::MAX, 0] {
            for _ in 0..500 {
                let mut value = start;
                value.mutate(&mut random, 1);
                assert_ne!(value, start);
            }
        }
        for start in [u64::MIN, u64::MAX] {
            for _ in 0..500 {
                let mut value = start;
                value.mutate(&mut random, 8);
                assert_ne!(value, start);
            }
        }
    }

    #[test]
    fn unsigned_edit_tables_exclude_negate() {
        assert!(!UNSIGNED.contains(&Negate));
        assert!(!UNSIGNED_BYTE.contains(&Negate));
        assert!(!UNSIGNED_BYTE.contains(&SwapBytes));
        assert!(!SIGNED_BYTE.contains(&SwapBytes));
    }

    #[test]
    fn interesting_values_fit_the_width() {
        let mut random = PcgRand::new(44);
        for _ in 0..500 {
            let value = afl_interesting(&mut random, 1);
            assert!(i8::try_from(value).is_ok());
            let value = afl_interesting(&mut random, 2);
            assert!(i16::try_from(value).is_ok());
        }
    }
}
