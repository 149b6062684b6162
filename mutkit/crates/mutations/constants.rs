//! Static tables and limits shared by the strategies.

/// Interesting 8-bit values.
pub const INTERESTING_8: [i8; 9] = [-128, -1, 0, 1, 16, 32, 64, 100, 127];

/// Interesting 16-bit values.
pub const INTERESTING_16: [i16; 10] = [-32768, -129, 128, 255, 256, 512, 1000, 1024, 4096, 32767];

/// Interesting 32-bit values.
pub const INTERESTING_32: [i32; 8] =
    [-2147483648, -100663046, -32769, 32768, 65535, 65536, 100663045, 2147483647];

/// Byte runs spliced in by [`BytesMutations::InsertToken`](super::BytesMutations::InsertToken).
pub const TOKENS: [&[u8]; 28] = [
    b"\x00",
    b"\xff",
    b"\x01",
    b"\x02",
    b"\x04",
    b"\x08",
    b"\x10",
    b"\x20",
    b"\x40",
    b"\x80",
    b"\x7f",
    b" ",
    b",",
    b";",
    b":",
    b"\n",
    b"\r\n",
    b"\t",
    b"\"",
    b"'",
    b"%s",
    b"%n",
    b"{}",
    b"[]",
    b"../",
    b"\x00\x00\x00\x00",
    b"\xff\xff",
    b"\xff\xff\xff\xff",
];

/// Widths, in bytes, of the integers the byte strategies read and write in place.
pub const INT_WIDTHS: [usize; 4] = [1, 2, 4, 8];

/// Largest delta applied by in-place byte arithmetic.
pub const MAX_BYTE_DELTA: u64 = 35;

/// Largest delta applied to numeric values, also the largest float scale factor.
pub const MAX_DELTA: u8 = 100;

/// Largest number of copies [`BytesMutations::DuplicateRange`](super::BytesMutations::DuplicateRange)
/// inserts.
pub const MAX_DUPLICATES: usize = 4;

/// Picks a strategy draws before it gives up on finding an edit that applies and changes the value.
pub const MAX_EDIT_ATTEMPTS: usize = 64;

/// Random removals tried on an oversized value before it is truncated.
pub const MAX_SHRINK_ATTEMPTS: usize = 4;
