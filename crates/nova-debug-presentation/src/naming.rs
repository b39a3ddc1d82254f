//! Type name qualification.

use crate::signature::method_parameter_type_names;

/// Returns `name` as-is when `qualified`, otherwise its simplified form.
pub fn qualify(name: &str, qualified: bool) -> String {
    if qualified {
        name.to_string()
    } else {
        simplify_type_name(name)
    }
}

/// Strips package and outer-class qualifiers from a type name, including every
/// generic type argument (`java.util.Map<java.lang.String,java.util.List<x.Y>>[]`
/// becomes `Map<String,List<Y>>[]`).
///
/// Varargs (`...`) and array (`[]`) suffixes are kept.
pub fn simplify_type_name(name: &str) -> String {
    if let Some(base) = name.strip_suffix("...") {
        return format!("{}...", simplify_type_name(base));
    }
    if let Some(base) = name.strip_suffix("[]") {
        return format!("{}[]", simplify_type_name(base));
    }

    let Some(open) = name.find('<') else {
        return simple_name(name).to_string();
    };
    let close = if name.ends_with('>') {
        name.len() - 1
    } else {
        name.len()
    };
    let arguments = split_type_arguments(&name[open + 1..close.max(open + 1)]);

    let mut out = String::with_capacity(name.len());
    out.push_str(simple_name(&name[..open]));
    out.push('<');
    for (idx, argument) in arguments.iter().enumerate() {
        if idx > 0 {
            out.push(',');
        }
        out.push_str(&simplify_type_name(argument));
    }
    out.push('>');
    out
}

/// Part of a non-generic name after its last `.`.
pub fn simple_name(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => &name[idx + 1..],
        None => name,
    }
}

/// Type name shown in thread and breakpoint narration: only the last `.`
/// segment is dropped, generic arguments are left alone.
pub fn marker_type_name(name: &str, qualified: bool) -> String {
    if qualified {
        name.to_string()
    } else {
        simple_name(name).to_string()
    }
}

/// Renders a JVM method descriptor as `name(Simple, int[])`.
///
/// Falls back to the bare method name when the descriptor cannot be parsed.
pub fn method_signature_label(name: &str, descriptor: &str) -> String {
    let Some(parameters) = method_parameter_type_names(descriptor) else {
        return name.to_string();
    };
    let parameters: Vec<String> = parameters
        .iter()
        .map(|parameter| simplify_type_name(parameter))
        .collect();
    format!("{name}({})", parameters.join(", "))
}

/// Splits a generic argument list at the commas that are not nested inside
/// another `<...>`.
fn split_type_arguments(list: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (idx, ch) in list.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                out.push(&list[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    out.push(&list[start..]);
    out
}
