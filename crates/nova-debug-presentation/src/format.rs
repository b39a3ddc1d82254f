//! Value text rendering.

use nova_debug_model::{JavaValue, ModelResult, ValueKind, STRING_TYPE_NAME};

use crate::attributes::RenderPolicy;
use crate::naming::qualify;
use crate::signature::{is_object_signature, PrimitiveKind, TypeSignature};
use crate::tolerate;

/// Shown instead of the value text for a `void` method result.
pub const NO_RETURN_VALUE: &str = "(No explicit return value)";

/// Renders `value` as `Type[len] text [unsigned] [hex] [char]`.
///
/// Accessors are queried best-effort: a field whose accessor fails is left
/// out of the label. Only a fault that ends the debug session is returned.
pub fn render_value(value: &dyn JavaValue, policy: &RenderPolicy) -> ModelResult<String> {
    let type_name = tolerate(value.reference_type_name())?.unwrap_or_default();
    let mut text = tolerate(value.value_string())?;
    let signature = tolerate(value.signature())?.flatten();
    let is_string = type_name == STRING_TYPE_NAME;

    if signature.as_deref() == Some("V") {
        text = Some(NO_RETURN_VALUE.to_string());
    }

    let mut out = String::new();
    if is_object_signature(signature.as_deref()) && !is_string && !type_name.is_empty() {
        let mut shown = qualify(&type_name, policy.show_qualified_names);
        if value.kind() == ValueKind::Array {
            if let Some(length) = tolerate(value.array_length())? {
                shown = splice_array_length(&shown, length);
            }
        }
        out.push_str(&shown);
        out.push(' ');
    }

    if let Some(text) = text.as_deref() {
        if is_string {
            out.push('"');
            out.push_str(text);
            out.push('"');
        } else {
            out.push_str(text);
        }
    }

    let primitive = signature
        .as_deref()
        .and_then(|signature| TypeSignature::parse(signature).primitive());
    if let (Some(kind), Some(text)) = (primitive, text.as_deref()) {
        let annotations: [(bool, fn(PrimitiveKind, &str) -> Option<String>); 3] = [
            (policy.show_unsigned_values, unsigned_text),
            (policy.show_hex_values, hex_text),
            (policy.show_char_values, char_text),
        ];
        for (enabled, annotate) in annotations {
            if !enabled {
                continue;
            }
            if let Some(annotation) = annotate(kind, text) {
                out.push_str(" [");
                out.push_str(&annotation);
                out.push(']');
            }
        }
    }

    Ok(out)
}

/// Inserts `length` into the first `[]` of an array type name
/// (`int[][]` with length 3 becomes `int[3][]`).
pub fn splice_array_length(type_name: &str, length: usize) -> String {
    match type_name.find("[]") {
        Some(idx) => format!("{}[{length}{}", &type_name[..idx], &type_name[idx + 1..]),
        None => type_name.to_string(),
    }
}

/// Decimal reading of a negative `byte` as unsigned.
pub fn unsigned_text(kind: PrimitiveKind, text: &str) -> Option<String> {
    if kind != PrimitiveKind::Byte {
        return None;
    }
    let value: i64 = text.trim().parse().ok()?;
    (value < 0).then(|| (value & 0xFF).to_string())
}

/// Hex reading masked to the type's width; `\uXXXX` for `char`.
pub fn hex_text(kind: PrimitiveKind, text: &str) -> Option<String> {
    if kind == PrimitiveKind::Char {
        let unit = text.encode_utf16().next()?;
        return Some(format!("\\u{unit:04x}"));
    }

    let value: i64 = text.trim().parse().ok()?;
    let masked = match kind {
        PrimitiveKind::Byte => value as u64 & 0xFF,
        PrimitiveKind::Short => value as u64 & 0xFFFF,
        PrimitiveKind::Int => value as u64 & 0xFFFF_FFFF,
        PrimitiveKind::Long => value as u64,
        _ => return None,
    };
    Some(format!("0x{masked:x}"))
}

/// Character reading of an integral value.
///
/// `int` and `long` values are only shown when they fall in `0..=0xFFFF`.
pub fn char_text(kind: PrimitiveKind, text: &str) -> Option<String> {
    let value: i64 = text.trim().parse().ok()?;
    let unit = match kind {
        PrimitiveKind::Byte => value & 0xFF,
        PrimitiveKind::Short => value & 0xFFFF,
        PrimitiveKind::Int => {
            let masked = value & 0xFFFF_FFFF;
            if masked > 0xFFFF {
                return None;
            }
            masked
        }
        PrimitiveKind::Long => {
            if !(0..=0xFFFF).contains(&value) {
                return None;
            }
            value
        }
        _ => return None,
    };
    Some(describe_code_unit(unit as u32))
}

fn describe_code_unit(unit: u32) -> String {
    if is_control(unit) {
        let mut out = String::from("^");
        out.push(char::from_u32(unit + 64).unwrap_or('\u{FFFD}'));
        let mnemonic = match unit {
            0 => Some("NUL"),
            8 => Some("BS"),
            9 => Some("TAB"),
            10 => Some("LF"),
            13 => Some("CR"),
            21 => Some("NL"),
            27 => Some("ESC"),
            127 => Some("DEL"),
            _ => None,
        };
        if let Some(mnemonic) = mnemonic {
            out.push_str(" (");
            out.push_str(mnemonic);
            out.push(')');
        }
        return out;
    }
    // Lone surrogates have no scalar value.
    char::from_u32(unit).unwrap_or('\u{FFFD}').to_string()
}

/// Unicode general category `Cc`.
fn is_control(unit: u32) -> bool {
    matches!(unit, 0x00..=0x1F | 0x7F..=0x9F)
}
