use rand::Rng;

use super::traits::Mutable;

impl Mutable for bool {
    /// Flipping is the only edit, so a bool always changes and never draws.
    #[inline(always)]
    fn mutate(&mut self, _random: &mut impl Rng, _room: usize) -> bool {
        *self = !*self;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::PcgRand;
    use rand::RngCore;

    #[test]
    fn flips_without_consuming_randomness() {
        let mut random = PcgRand::new(1);
        let mut value = false;
        assert!(value.mutate(&mut random, 0));
        assert!(value);
        assert!(value.mutate(&mut random, 0));
        assert!(!value);
        assert_eq!(random.next_u32(), PcgRand::new(1).next_u32());
    }
}
