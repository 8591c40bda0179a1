use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::{error, fmt};

use serde_json::Value;

// -----------------------------------------------------------------------------
// FieldPath

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// A keyed child: a property name or a map key.
    Field(Cow<'static, str>),
    /// A positional child of a sequence or fixed-size array.
    Index(usize),
}

/// The location of a failure, from the top-level record down to the
/// offending node.
///
/// Segments are collected while the error unwinds through the engines,
/// so the innermost segment is pushed first.
///
/// # Examples
///
/// ```
/// use propdoc_property::{Properties, deserialize};
/// use serde_json::json;
///
/// #[derive(Properties, Default, Debug)]
/// struct Inner { v: Vec<i32> }
///
/// #[derive(Properties, Default, Debug)]
/// struct Outer { d: Inner }
///
/// let err = deserialize::<Outer>(&json!({ "d": { "v": [3, "x"] } })).unwrap_err();
/// assert_eq!(err.path().to_string(), "d.v[1]");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath {
    reversed: Vec<PathSegment>,
}

impl FieldPath {
    /// Creates an empty path, which denotes the top-level node.
    #[inline]
    pub const fn new() -> Self {
        Self {
            reversed: Vec::new(),
        }
    }

    /// Returns `true` if the path denotes the top-level node.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.reversed.is_empty()
    }

    /// Returns the number of segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.reversed.len()
    }

    /// Iterates the segments from the outermost to the innermost.
    #[inline]
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &PathSegment> {
        self.reversed.iter().rev()
    }

    #[inline]
    fn push_outer(&mut self, segment: PathSegment) {
        self.reversed.push(segment);
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, segment) in self.segments().enumerate() {
            match segment {
                PathSegment::Field(name) if idx == 0 => f.write_str(name)?,
                PathSegment::Field(name) => write!(f, ".{name}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// PropertyErrorKind

/// What went wrong during serialization or deserialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyErrorKind {
    /// The type has no registered property list.
    ///
    /// Statically typed calls reject such types at compile time, so this is
    /// only produced by the [`PropertyRegistry`](crate::PropertyRegistry).
    MissingPropertyList { type_path: Cow<'static, str> },
    /// The document lacks a key the property list expects.
    MissingField { field: Cow<'static, str> },
    /// The document value cannot be converted to the field's type.
    TypeMismatch {
        expected: Cow<'static, str>,
        found: Cow<'static, str>,
        reason: Option<String>,
    },
    /// Two properties of one list share a name.
    DuplicateField {
        type_path: &'static str,
        field: &'static str,
    },
    /// A leaf value has no document representation (e.g. a map with non-string keys).
    Unrepresentable { reason: String },
    /// The text form is not a valid document.
    Parse { reason: String },
}

impl fmt::Display for PropertyErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPropertyList { type_path } => {
                write!(f, "type `{type_path}` has no registered property list")
            }
            Self::MissingField { field } => {
                write!(f, "missing field `{field}`")
            }
            Self::TypeMismatch {
                expected,
                found,
                reason: None,
            } => {
                write!(f, "expected `{expected}` but the document holds {found}")
            }
            Self::TypeMismatch {
                expected,
                found,
                reason: Some(reason),
            } => {
                write!(
                    f,
                    "expected `{expected}` but the document holds {found}: {reason}"
                )
            }
            Self::DuplicateField { type_path, field } => {
                write!(f, "property list of `{type_path}` declares `{field}` twice")
            }
            Self::Unrepresentable { reason } => {
                write!(f, "value has no document representation: {reason}")
            }
            Self::Parse { reason } => {
                write!(f, "invalid document text: {reason}")
            }
        }
    }
}

// -----------------------------------------------------------------------------
// PropertyError

/// The error returned by every engine entry point.
///
/// Carries the [kind](PropertyErrorKind) of failure and the [`FieldPath`]
/// at which it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyError {
    kind: PropertyErrorKind,
    path: FieldPath,
}

impl PropertyError {
    /// Creates an error at the top-level node.
    #[inline]
    pub const fn new(kind: PropertyErrorKind) -> Self {
        Self {
            kind,
            path: FieldPath::new(),
        }
    }

    /// Returns the kind of failure.
    #[inline]
    pub const fn kind(&self) -> &PropertyErrorKind {
        &self.kind
    }

    /// Returns where the failure happened.
    #[inline]
    pub const fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Consumes the error, returning its kind.
    #[inline]
    pub fn into_kind(self) -> PropertyErrorKind {
        self.kind
    }

    /// Prefixes the path with a keyed segment.
    #[inline]
    pub fn at_field(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.path.push_outer(PathSegment::Field(name.into()));
        self
    }

    /// Prefixes the path with a positional segment.
    #[inline]
    pub fn at_index(mut self, index: usize) -> Self {
        self.path.push_outer(PathSegment::Index(index));
        self
    }

    pub fn missing_property_list(type_path: impl Into<Cow<'static, str>>) -> Self {
        Self::new(PropertyErrorKind::MissingPropertyList {
            type_path: type_path.into(),
        })
    }

    pub fn missing_field(field: impl Into<Cow<'static, str>>) -> Self {
        Self::new(PropertyErrorKind::MissingField {
            field: field.into(),
        })
    }

    /// A mismatch between the `expected` type and the document `node`.
    pub fn type_mismatch(
        expected: impl Into<Cow<'static, str>>,
        node: &Value,
        reason: Option<String>,
    ) -> Self {
        Self::new(PropertyErrorKind::TypeMismatch {
            expected: expected.into(),
            found: Cow::Borrowed(node_kind(node)),
            reason,
        })
    }

    pub fn duplicate_field(type_path: &'static str, field: &'static str) -> Self {
        Self::new(PropertyErrorKind::DuplicateField { type_path, field })
    }

    pub fn unrepresentable(reason: impl Into<String>) -> Self {
        Self::new(PropertyErrorKind::Unrepresentable {
            reason: reason.into(),
        })
    }

    pub fn parse(reason: impl Into<String>) -> Self {
        Self::new(PropertyErrorKind::Parse {
            reason: reason.into(),
        })
    }

    #[inline]
    pub fn is_missing_property_list(&self) -> bool {
        matches!(self.kind, PropertyErrorKind::MissingPropertyList { .. })
    }

    #[inline]
    pub fn is_missing_field(&self) -> bool {
        matches!(self.kind, PropertyErrorKind::MissingField { .. })
    }

    #[inline]
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self.kind, PropertyErrorKind::TypeMismatch { .. })
    }
}

impl fmt::Display for PropertyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            fmt::Display::fmt(&self.kind, f)
        } else {
            write!(f, "{} at `{}`", self.kind, self.path)
        }
    }
}

impl error::Error for PropertyError {}

impl From<PropertyErrorKind> for PropertyError {
    #[inline]
    fn from(kind: PropertyErrorKind) -> Self {
        Self::new(kind)
    }
}

/// A short description of a document node's kind, used in mismatch messages.
pub(crate) fn node_kind(node: &Value) -> &'static str {
    match node {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(n) if n.is_f64() => "a floating point number",
        Value::Number(_) => "an integer",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
