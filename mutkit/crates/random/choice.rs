use rand::Rng;
use strum::VariantArray;

/// Uniform draws from the constant tables the strategies work off: edit enums, interesting
/// values, tokens and widths.
pub trait RandomChoice {
    /// Returns a uniformly drawn entry of `items`, consuming one range draw.
    ///
    /// Panics on an empty slice. Every table handed to it here is a non-empty constant.
    fn choice<'a, T>(&mut self, items: &'a [T]) -> &'a T;

    /// Returns a uniformly drawn variant of the edit enum `E`.
    fn edit<E: VariantArray + Copy>(&mut self) -> E {
        *self.choice(E::VARIANTS)
    }
}

impl<R: Rng + ?Sized> RandomChoice for R {
    #[inline]
    fn choice<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.random_range(0..items.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{mutations::BytesMutations, random::PcgRand};

    #[test]
    fn edit_draws_like_a_table_choice() {
        let mut left = PcgRand::new(8);
        let mut right = PcgRand::new(8);
        for _ in 0..100 {
            let edit = left.edit::<BytesMutations>();
            assert_eq!(edit, *right.choice(BytesMutations::VARIANTS));
        }
        assert_eq!(left.draws(), right.draws());
    }

    #[test]
    fn single_entry_table_is_always_picked() {
        let mut random = PcgRand::new(9);
        assert_eq!(*random.choice(&[42u8]), 42);
    }
}
