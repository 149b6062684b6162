use rand::Rng;
use strum::{IntoStaticStr, VariantArray};

/// A value the mutator can edit in place within a size budget.
pub trait Mutable {
    /// Applies one random edit, never growing the value's encoded size past `room` bytes.
    ///
    /// Returns `true` when the value changed. `false` means no edit could change it within
    /// `room`, and the value is left as it was.
    fn mutate(&mut self, random: &mut impl Rng, room: usize) -> bool;
}

/// Elementary edits on a byte sequence. See [`mutate_bytes`](super::mutate_bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, VariantArray, IntoStaticStr)]
pub enum BytesMutations {
    FlipBit,
    XorByte,
    SwapByte,
    ArithmeticInt,
    SetInteresting,
    OverwriteRandom,
    OverwriteConstant,
    InsertRandom,
    InsertToken,
    InsertConstant,
    RemoveRange,
    DuplicateRange,
    SwapRanges,
    ShuffleRange,
}

/// Elementary edits on a fixed-width integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
pub enum IntMutations {
    /// Boundary constant of the type, or an interesting value that fits its width
    SetInteresting,
    AddDelta,
    SubDelta,
    FlipBit,
    /// Endianness probe, only for types wider than one byte
    SwapBytes,
    /// Signed types only
    Negate,
}

/// Elementary edits on a float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, VariantArray, IntoStaticStr)]
pub enum FloatMutations {
    SetSpecial,
    AddDelta,
    Scale,
    Negate,
    FlipBit,
}
