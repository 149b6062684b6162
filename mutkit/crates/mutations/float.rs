use rand::Rng;

use super::{
    constants::{MAX_DELTA, MAX_EDIT_ATTEMPTS},
    traits::{FloatMutations, Mutable},
};
use crate::random::RandomChoice;

macro_rules! impl_mutable {
    ($type:ident, $bits:ty) => {
        impl Mutable for $type {
            /// NaN and infinities are ordinary inputs and outputs here, nothing is sanitized.
            /// Changes are detected on the bit pattern, so `0.0 -> -0.0` counts and
            /// `NaN -> NaN` with the same payload does not.
            fn mutate(&mut self, random: &mut impl Rng, _room: usize) -> bool {
                let original = *self;

                for _ in 0..MAX_EDIT_ATTEMPTS {
                    let value = match random.edit::<FloatMutations>() {
                        FloatMutations::SetSpecial => {
                            let specials: [$type; 12] = [
                                0.0,
                                -0.0,
                                $type::INFINITY,
                                $type::NEG_INFINITY,
                                $type::NAN,
                                $type::MIN_POSITIVE,
                                $type::from_bits(1),
                                $type::MAX,
                                $type::MIN,
                                $type::EPSILON,
                                1.0,
                                -1.0,
                            ];
                            *random.choice(&specials)
                        }
                        FloatMutations::AddDelta => {
                            let delta = $type::from(random.random_range(1..=MAX_DELTA));
                            if random.random::<bool>() {
                                original + delta
                            } else {
                                original - delta
                            }
                        }
                        FloatMutations::Scale => {
                            let factor = $type::from(random.random_range(2..=MAX_DELTA));
                            if random.random::<bool>() {
                                original * factor
                            } else {
                                original / factor
                            }
                        }
                        FloatMutations::Negate => -original,
                        FloatMutations::FlipBit => {
                            let bit = random.random_range(0..<$bits>::BITS);
                            $type::from_bits(original.to_bits() ^ (1 << bit))
                        }
                    };

                    if value.to_bits() != original.to_bits() {
                        *self = value;
                        return true;
                    }
                }
                false
            }
        }
    };
}

impl_mutable!(f32, u32);
impl_mutable!(f64, u64);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::PcgRand;

    #[test]
    fn every_call_changes_the_bits() {
        let mut random = PcgRand::new(51);
        let mut value = 0.0f64;
        for _ in 0..5000 {
            let before = value.to_bits();
            assert!(value.mutate(&mut random, 8));
            assert_ne!(before, value.to_bits());
        }
    }

    #[test]
    fn special_values_show_up_and_pass_through() {
        let mut random = PcgRand::new(52);
        let (mut nan, mut inf, mut neg_zero) = (false, false, false);
        for _ in 0..5000 {
            let mut value = 1.5f32;
            value.mutate(&mut random, 4);
            nan |= value.is_nan();
            inf |= value.is_infinite();
            neg_zero |= value == 0.0 && value.is_sign_negative();
        }
        assert!(nan && inf && neg_zero);
    }

    #[test]
    fn nan_input_is_mutated_not_rejected() {
        let mut random = PcgRand::new(53);
        let mut value = f64::NAN;
        assert!(value.mutate(&mut random, 8));
    }
}
