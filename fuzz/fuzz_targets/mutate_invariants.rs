#![no_main]

use libfuzzer_sys::fuzz_target;
use mutkit::{encoded_size, Kind, MutateError, Mutator, Value};
use strum::VariantArray;

/// Builds one value of `kind` out of `data`, consuming what it uses.
fn take_value(kind: Kind, data: &mut &[u8]) -> Value {
    let input: &[u8] = *data;
    let width = kind.min_size();
    if !kind.is_fixed_size() {
        let len = input.first().map_or(0, |len| usize::from(*len));
        let len = len.min(input.len().saturating_sub(1));
        let payload = input.get(1..1 + len).unwrap_or_default();
        *data = &input[(1 + len).min(input.len())..];
        return match kind {
            Kind::Text => Value::Text(String::from_utf8_lossy(payload).into_owned()),
            _ => Value::Bytes(payload.to_vec()),
        };
    }

    let mut raw = [0u8; 8];
    let n = width.min(input.len());
    raw[..n].copy_from_slice(&input[..n]);
    *data = &input[n..];
    let bits = u64::from_le_bytes(raw);

    match kind {
        Kind::Bool => Value::Bool(bits & 1 == 1),
        Kind::I8 => Value::I8(bits as i8),
        Kind::I16 => Value::I16(bits as i16),
        Kind::I32 => Value::I32(bits as i32),
        Kind::I64 => Value::I64(bits as i64),
        Kind::U8 => Value::U8(bits as u8),
        Kind::U16 => Value::U16(bits as u16),
        Kind::U32 => Value::U32(bits as u32),
        Kind::U64 => Value::U64(bits),
        Kind::F32 => Value::F32(f32::from_bits(bits as u32)),
        Kind::F64 => Value::F64(f64::from_bits(bits)),
        Kind::Bytes | Kind::Text => unreachable!(),
    }
}

fuzz_target!(|data: &[u8]| {
    // Seed (8) + budget (2) + rounds (1), then the value set
    if data.len() < 11 {
        return;
    }

    let seed = u64::from_le_bytes([
        data[0], data[1], data[2], data[3], data[4], data[5], data[6], data[7],
    ]);
    let max_size = usize::from(u16::from_le_bytes([data[8], data[9]]));
    let rounds = data[10] % 16 + 1;

    let mut rest = &data[11..];
    let mut values = Vec::new();
    while let Some((&tag, tail)) = rest.split_first() {
        rest = tail;
        let kind = Kind::VARIANTS[usize::from(tag) % Kind::VARIANTS.len()];
        values.push(take_value(kind, &mut rest));
    }

    let kinds: Vec<Kind> = values.iter().map(Value::kind).collect();
    let mut mutator = Mutator::new(Some(seed));

    for _ in 0..rounds {
        let before = values.clone();
        match mutator.mutate(&mut values, max_size) {
            Ok(idx) => {
                assert!(idx < values.len());
                assert!(encoded_size(&values) <= max_size, "size budget exceeded");
                for (i, (old, new)) in before.iter().zip(&values).enumerate() {
                    assert_eq!(old.kind(), new.kind(), "kind changed");
                    if i != idx {
                        assert!(old.bit_eq(new), "untouched value changed");
                    }
                }
            }
            Err(MutateError::EmptyInput) => assert!(values.is_empty()),
            Err(MutateError::SizeBudgetUnsatisfiable { required, .. }) => {
                assert!(required > max_size);
                assert!(before.iter().zip(&values).all(|(old, new)| old.bit_eq(new)));
                break;
            }
            Err(err) => panic!("unexpected error: {err}"),
        }
    }

    assert_eq!(values.iter().map(Value::kind).collect::<Vec<_>>(), kinds);
});
