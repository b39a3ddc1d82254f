//! JNI-style type signatures (`I`, `[J`, `Ljava/lang/String;`).

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl PrimitiveKind {
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            b'Z' => PrimitiveKind::Boolean,
            b'B' => PrimitiveKind::Byte,
            b'C' => PrimitiveKind::Char,
            b'S' => PrimitiveKind::Short,
            b'I' => PrimitiveKind::Int,
            b'J' => PrimitiveKind::Long,
            b'F' => PrimitiveKind::Float,
            b'D' => PrimitiveKind::Double,
            b'V' => PrimitiveKind::Void,
            _ => return None,
        })
    }

    pub fn type_name(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Void => "void",
        }
    }

    /// Width of the two's-complement integral types; `None` for the rest.
    pub fn bit_width(self) -> Option<u32> {
        match self {
            PrimitiveKind::Byte => Some(8),
            PrimitiveKind::Short | PrimitiveKind::Char => Some(16),
            PrimitiveKind::Int => Some(32),
            PrimitiveKind::Long => Some(64),
            _ => None,
        }
    }
}

/// Shape of a type signature, as far as value rendering cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeSignature<'a> {
    /// Exactly one primitive type code.
    Primitive(PrimitiveKind),
    /// `[` followed by the component signature.
    Array(&'a str),
    /// `L...;` class or `Q...;` inline type.
    Object(&'a str),
    Unrecognized,
}

impl<'a> TypeSignature<'a> {
    pub fn parse(signature: &'a str) -> Self {
        match signature.as_bytes() {
            [code] => PrimitiveKind::from_code(*code)
                .map(TypeSignature::Primitive)
                .unwrap_or(TypeSignature::Unrecognized),
            [b'[', ..] => TypeSignature::Array(&signature[1..]),
            [b'L' | b'Q', ..] => TypeSignature::Object(signature),
            _ => TypeSignature::Unrecognized,
        }
    }

    pub fn primitive(self) -> Option<PrimitiveKind> {
        match self {
            TypeSignature::Primitive(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn is_object(self) -> bool {
        matches!(self, TypeSignature::Array(_) | TypeSignature::Object(_))
    }
}

/// Whether `signature` denotes an object or an array (of anything).
pub fn is_object_signature(signature: Option<&str>) -> bool {
    signature.is_some_and(|signature| TypeSignature::parse(signature).is_object())
}

/// Converts a field signature into a Java source type name
/// (`[Ljava/lang/String;` becomes `java.lang.String[]`).
pub fn signature_to_type_name(signature: &str) -> Option<String> {
    let (name, rest) = split_field_signature(signature)?;
    rest.is_empty().then_some(name)
}

/// Parameter type names of a method descriptor such as `(I[Ljava/lang/String;)V`.
pub fn method_parameter_type_names(descriptor: &str) -> Option<Vec<String>> {
    let mut rest = descriptor.strip_prefix('(')?;
    let mut names = Vec::new();
    loop {
        if let Some(after) = rest.strip_prefix(')') {
            // Return type must still be well formed.
            let (_, tail) = split_field_signature(after)?;
            return tail.is_empty().then_some(names);
        }
        let (name, tail) = split_field_signature(rest)?;
        names.push(name);
        rest = tail;
    }
}

/// Parses one field signature off the front of `input`, returning the type
/// name and the unparsed remainder.
fn split_field_signature(input: &str) -> Option<(String, &str)> {
    let mut dims = 0usize;
    let mut sig = input;
    while let Some(rest) = sig.strip_prefix('[') {
        dims += 1;
        sig = rest;
    }

    let (mut name, rest) = match sig.as_bytes().first().copied()? {
        b'L' | b'Q' => {
            let end = sig.find(';')?;
            let class = &sig[1..end];
            // Drop generic arguments carried by some descriptors.
            let class = class.split('<').next().unwrap_or(class);
            (class.replace('/', "."), &sig[end + 1..])
        }
        code => (
            PrimitiveKind::from_code(code)?.type_name().to_string(),
            &sig[1..],
        ),
    };

    for _ in 0..dims {
        name.push_str("[]");
    }
    Some((name, rest))
}
