//! Text mutation.
//!
//! Text is mutated through [`mutate_bytes`] on its UTF-8 encoding. Edits routinely break the
//! encoding, and a `String` cannot hold invalid UTF-8, so what happens next is a
//! [`TextPolicy`]:
//!
//! - [`TextPolicy::Repair`] keeps the edit and replaces every invalid sequence with U+FFFD.
//! - [`TextPolicy::Reject`] throws invalid results away and draws another edit, falling back to
//!   repairing the last one after [`MAX_EDIT_ATTEMPTS`].
//!
//! A replacement character is three bytes, so a repaired string is truncated at a char boundary
//! when it no longer fits its room.

use rand::Rng;
use tracing::trace;

use super::{
    bytes::{mutate_bytes, shrink_bytes},
    constants::MAX_EDIT_ATTEMPTS,
    traits::Mutable,
};
use crate::config::TextPolicy;

impl Mutable for String {
    fn mutate(&mut self, random: &mut impl Rng, room: usize) -> bool {
        let (mut original, mut scratch) = (Vec::new(), Vec::new());
        mutate_text(self, random, room, TextPolicy::default(), &mut original, &mut scratch)
    }
}

/// Applies one byte-level edit to `text` and resolves invalid UTF-8 according to `policy`.
/// Returns whether the text changed.
///
/// `original` receives a copy of the input, needed to undo rejected edits and to tell whether
/// a repair undid an edit. `scratch` is handed to [`mutate_bytes`].
pub fn mutate_text(
    text: &mut String,
    random: &mut impl Rng,
    room: usize,
    policy: TextPolicy,
    original: &mut Vec<u8>,
    scratch: &mut Vec<u8>,
) -> bool {
    original.clear();
    original.extend_from_slice(text.as_bytes());
    let mut bytes = std::mem::take(text).into_bytes();

    match policy {
        TextPolicy::Repair => {
            let changed = mutate_bytes(&mut bytes, random, room, scratch);
            match String::from_utf8(bytes) {
                Ok(valid) => {
                    *text = valid;
                    changed
                }
                Err(err) => {
                    *text = repair(err.into_bytes(), room);
                    text.as_bytes() != original.as_slice()
                }
            }
        }
        TextPolicy::Reject => {
            for attempt in 1..=MAX_EDIT_ATTEMPTS {
                if !mutate_bytes(&mut bytes, random, room, scratch) {
                    break;
                }
                match String::from_utf8(bytes) {
                    Ok(valid) => {
                        *text = valid;
                        return true;
                    }
                    Err(err) => {
                        bytes = err.into_bytes();
                        if attempt == MAX_EDIT_ATTEMPTS {
                            trace!("no valid text edit found, repairing the last one");
                            break;
                        }
                        bytes.clear();
                        bytes.extend_from_slice(original.as_slice());
                    }
                }
            }
            *text = repair(bytes, room);
            text.as_bytes() != original.as_slice()
        }
    }
}

/// Shrinks `text` to at most `room` bytes, keeping it valid UTF-8.
pub fn shrink_text(text: &mut String, random: &mut impl Rng, room: usize) {
    let mut bytes = std::mem::take(text).into_bytes();
    shrink_bytes(&mut bytes, random, room);
    *text = repair(bytes, room);
}

/// Truncates `text` to at most `room` bytes without splitting a character.
pub fn truncate_to_room(text: &mut String, room: usize) {
    if text.len() <= room {
        return;
    }
    let mut end = room;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text.truncate(end);
}

fn repair(bytes: Vec<u8>, room: usize) -> String {
    let mut text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    };
    truncate_to_room(&mut text, room);
    text
}
