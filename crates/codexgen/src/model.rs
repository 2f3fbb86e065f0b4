// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structural model of the types a run generates codecs for.
//!
//! The model is built once (usually by [`crate::provider`]) and never mutated
//! by the generators.

use std::collections::BTreeMap;
use std::fmt;

/// Annotation key selecting the wire key of a field.
pub const WIRE_KEY: &str = "wireKey";

/// Annotation key selecting the temporal strategy of a field.
pub const TEMPORAL_FORMAT: &str = "temporalFormat";

/// Which codec directions a type requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodecDirection {
    /// Encode and decode.
    Both,
    Decode,
    Encode,
}

impl CodecDirection {
    pub fn decodes(self) -> bool {
        matches!(self, Self::Both | Self::Decode)
    }

    pub fn encodes(self) -> bool {
        matches!(self, Self::Both | Self::Encode)
    }
}

/// Scalar leaf types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    String,
}

impl ScalarKind {
    // @audit-ok: Simple pattern matching - scalar to Rust type name mapping
    pub fn rust_name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::String => "String",
        }
    }
}

/// Semantic type of a field or variant argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Scalar(ScalarKind),
    /// An instant in time, subject to a temporal strategy.
    Temporal,
    Optional(Box<TypeRef>),
    Sequence(Box<TypeRef>),
    /// Heterogeneous values written as one ordered group.
    Tuple(Vec<TypeRef>),
    /// Another generated type, or any type implementing the wire traits.
    Named(String),
}

impl TypeRef {
    pub fn optional(inner: TypeRef) -> Self {
        Self::Optional(Box::new(inner))
    }

    pub fn sequence(inner: TypeRef) -> Self {
        Self::Sequence(Box::new(inner))
    }

    pub fn named(path: impl Into<String>) -> Self {
        Self::Named(path.into())
    }

    pub fn is_temporal(&self) -> bool {
        matches!(self, Self::Temporal)
    }

    /// `Temporal` or `Optional(Temporal)`: the types a temporal strategy applies to.
    pub fn accepts_temporal_strategy(&self) -> bool {
        match self {
            Self::Temporal => true,
            Self::Optional(inner) => inner.is_temporal(),
            _ => false,
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }

    /// Whether a tuple appears anywhere inside this type.
    pub fn contains_tuple(&self) -> bool {
        match self {
            Self::Tuple(_) => true,
            Self::Optional(inner) | Self::Sequence(inner) => inner.contains_tuple(),
            Self::Scalar(_) | Self::Temporal | Self::Named(_) => false,
        }
    }

    /// Render as a Rust type, addressing the runtime crate as `runtime`.
    pub fn rust_type(&self, runtime: &str) -> String {
        match self {
            Self::Scalar(kind) => kind.rust_name().to_string(),
            Self::Temporal => format!("::{runtime}::Instant"),
            Self::Optional(inner) => format!("Option<{}>", inner.rust_type(runtime)),
            Self::Sequence(inner) => format!("Vec<{}>", inner.rust_type(runtime)),
            Self::Tuple(items) => {
                let items: Vec<String> = items.iter().map(|t| t.rust_type(runtime)).collect();
                if items.len() == 1 {
                    format!("({},)", items[0])
                } else {
                    format!("({})", items.join(", "))
                }
            }
            Self::Named(path) => path.clone(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => f.write_str(kind.rust_name()),
            Self::Temporal => f.write_str("Date"),
            Self::Optional(inner) => write!(f, "Option<{inner}>"),
            Self::Sequence(inner) => write!(f, "Vec<{inner}>"),
            Self::Tuple(items) => {
                f.write_str("(")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            Self::Named(path) => f.write_str(path),
        }
    }
}

/// Free-form annotations attached to a field.
pub type Annotations = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub declared_type: TypeRef,
    pub annotations: Annotations,
    pub doc: Vec<String>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, declared_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            declared_type,
            annotations: Annotations::new(),
            doc: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_wire_key(self, key: impl Into<String>) -> Self {
        self.with_annotation(WIRE_KEY, key)
    }

    #[must_use]
    pub fn with_temporal_format(self, format: impl Into<String>) -> Self {
        self.with_annotation(TEMPORAL_FORMAT, format)
    }

    #[must_use]
    pub fn with_doc(mut self, line: impl Into<String>) -> Self {
        self.doc.push(line.into());
        self
    }

    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.annotations.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentSpec {
    /// 0-based position inside the variant.
    pub position: usize,
    pub declared_type: TypeRef,
    /// Explicit label; `None` falls back to `value{position + 1}`.
    pub body_name: Option<String>,
}

impl ArgumentSpec {
    pub fn positional(position: usize, declared_type: TypeRef) -> Self {
        Self {
            position,
            declared_type,
            body_name: None,
        }
    }

    pub fn named(position: usize, name: impl Into<String>, declared_type: TypeRef) -> Self {
        Self {
            position,
            declared_type,
            body_name: Some(name.into()),
        }
    }

    /// Name used when the argument has no explicit label.
    pub fn fallback_name(&self) -> String {
        format!("value{}", self.position + 1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariantSpec {
    /// Variant identifier, also its wire tag.
    pub name: String,
    pub arguments: Vec<ArgumentSpec>,
    pub doc: Vec<String>,
}

impl VariantSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            doc: Vec::new(),
        }
    }

    /// Append an argument at the next position.
    #[must_use]
    pub fn with_argument(mut self, name: Option<&str>, declared_type: TypeRef) -> Self {
        let position = self.arguments.len();
        self.arguments.push(ArgumentSpec {
            position,
            declared_type,
            body_name: name.map(str::to_string),
        });
        self
    }

    pub fn arity(&self) -> usize {
        self.arguments.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductSpec {
    pub name: String,
    pub fields: Vec<FieldSpec>,
    pub codec: Option<CodecDirection>,
    pub doc: Vec<String>,
    /// Overrides the configured derive list of the declaration.
    pub derives: Option<Vec<String>>,
}

impl ProductSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            codec: Some(CodecDirection::Both),
            doc: Vec::new(),
            derives: None,
        }
    }

    #[must_use]
    pub fn with_field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn with_codec(mut self, codec: Option<CodecDirection>) -> Self {
        self.codec = codec;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SumSpec {
    pub name: String,
    pub variants: Vec<VariantSpec>,
    pub codec: Option<CodecDirection>,
    pub doc: Vec<String>,
    pub derives: Option<Vec<String>>,
}

impl SumSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variants: Vec::new(),
            codec: Some(CodecDirection::Both),
            doc: Vec::new(),
            derives: None,
        }
    }

    #[must_use]
    pub fn with_variant(mut self, variant: VariantSpec) -> Self {
        self.variants.push(variant);
        self
    }

    #[must_use]
    pub fn with_codec(mut self, codec: Option<CodecDirection>) -> Self {
        self.codec = codec;
        self
    }
}

/// A product (struct) or sum (tagged union) type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeSpecification {
    Product(ProductSpec),
    Sum(SumSpec),
}

impl TypeSpecification {
    pub fn name(&self) -> &str {
        match self {
            Self::Product(spec) => &spec.name,
            Self::Sum(spec) => &spec.name,
        }
    }

    /// Requested codec directions; `None` means the type is not annotated.
    pub fn codec(&self) -> Option<CodecDirection> {
        match self {
            Self::Product(spec) => spec.codec,
            Self::Sum(spec) => spec.codec,
        }
    }
}

impl From<ProductSpec> for TypeSpecification {
    fn from(spec: ProductSpec) -> Self {
        Self::Product(spec)
    }
}

impl From<SumSpec> for TypeSpecification {
    fn from(spec: SumSpec) -> Self {
        Self::Sum(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rust_type_rendering() {
        let ty = TypeRef::optional(TypeRef::sequence(TypeRef::named("Book")));
        assert_eq!(ty.rust_type("rt"), "Option<Vec<Book>>");

        let ty = TypeRef::Tuple(vec![TypeRef::Scalar(ScalarKind::F64), TypeRef::Temporal]);
        assert_eq!(ty.rust_type("rt"), "(f64, ::rt::Instant)");

        let ty = TypeRef::Tuple(vec![TypeRef::Scalar(ScalarKind::U8)]);
        assert_eq!(ty.rust_type("rt"), "(u8,)");
    }

    #[test]
    fn test_temporal_strategy_targets() {
        assert!(TypeRef::Temporal.accepts_temporal_strategy());
        assert!(TypeRef::optional(TypeRef::Temporal).accepts_temporal_strategy());
        assert!(!TypeRef::sequence(TypeRef::Temporal).accepts_temporal_strategy());
        assert!(!TypeRef::Scalar(ScalarKind::String).accepts_temporal_strategy());
    }

    #[test]
    fn test_fallback_name_is_one_based() {
        let arg = ArgumentSpec::positional(0, TypeRef::Scalar(ScalarKind::I32));
        assert_eq!(arg.fallback_name(), "value1");
    }

    #[test]
    fn test_variant_builder_positions() {
        let variant = VariantSpec::new("Rect")
            .with_argument(Some("width"), TypeRef::Scalar(ScalarKind::F64))
            .with_argument(Some("height"), TypeRef::Scalar(ScalarKind::F64));

        assert_eq!(variant.arity(), 2);
        assert_eq!(variant.arguments[1].position, 1);
        assert_eq!(variant.arguments[1].body_name.as_deref(), Some("height"));
    }

    #[test]
    fn test_display_roundtrips_shape() {
        let ty = TypeRef::Tuple(vec![
            TypeRef::Scalar(ScalarKind::I64),
            TypeRef::optional(TypeRef::Temporal),
        ]);
        assert_eq!(ty.to_string(), "(i64, Option<Date>)");
    }
}
