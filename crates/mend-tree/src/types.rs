//! Semantic annotations attached to tree nodes by a front end's resolver.
//!
//! The rewrite core never resolves types itself; it reads the annotations a
//! front end supplied when it built the tree. Nodes without annotations are
//! simply never matched by signature-based patterns.

use std::fmt;

/// A resolved type reference.
///
/// Carries the fully qualified type name together with the names of its
/// supertypes so the matcher can answer assignability questions without a
/// symbol table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    name: String,
    supertypes: Vec<String>,
}

impl TypeRef {
    /// Creates a type reference with no recorded supertypes.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            supertypes: Vec::new(),
        }
    }

    /// Returns a copy with the given supertype names recorded.
    #[must_use]
    pub fn with_supertypes(mut self, supertypes: impl IntoIterator<Item = String>) -> Self {
        self.supertypes = supertypes.into_iter().collect();
        self
    }

    /// Returns the fully qualified type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the recorded supertype names.
    #[must_use]
    pub fn supertypes(&self) -> &[String] {
        &self.supertypes
    }

    /// Returns whether a value of this type is assignable to `other`.
    ///
    /// A type is assignable to itself and to any of its recorded
    /// supertypes. No other subtyping relation is considered.
    #[must_use]
    pub fn is_assignable_to(&self, other: &str) -> bool {
        self.name == other || self.supertypes.iter().any(|s| s == other)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A resolved method signature.
///
/// Attached to call nodes whose receiver type and method are known to the
/// front end. The owner is the type that declares the method, which for
/// the builtin table is also the receiver's type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    owner: TypeRef,
    name: String,
    parameters: Vec<TypeRef>,
    return_type: TypeRef,
}

impl MethodSignature {
    /// Creates a zero-parameter signature.
    #[must_use]
    pub fn new(owner: TypeRef, name: impl Into<String>, return_type: TypeRef) -> Self {
        Self {
            owner,
            name: name.into(),
            parameters: Vec::new(),
            return_type,
        }
    }

    /// Returns a copy with the given parameter types.
    #[must_use]
    pub fn with_parameters(mut self, parameters: impl IntoIterator<Item = TypeRef>) -> Self {
        self.parameters = parameters.into_iter().collect();
        self
    }

    /// Returns the declaring type.
    #[must_use]
    pub const fn owner(&self) -> &TypeRef {
        &self.owner
    }

    /// Returns the method name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared parameter types.
    #[must_use]
    pub fn parameters(&self) -> &[TypeRef] {
        &self.parameters
    }

    /// Returns the declared return type.
    #[must_use]
    pub const fn return_type(&self) -> &TypeRef {
        &self.return_type
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}(", self.owner, self.name)?;
        for (i, parameter) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{parameter}")?;
        }
        f.write_str(")")
    }
}

/// A semantic annotation carried by a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    /// The resolved type of an expression.
    Type(TypeRef),
    /// The resolved signature of a method call or property access.
    Method(MethodSignature),
}

impl Annotation {
    /// Returns the type reference, if this is a type annotation.
    #[must_use]
    pub const fn as_type(&self) -> Option<&TypeRef> {
        match self {
            Self::Type(type_ref) => Some(type_ref),
            Self::Method(_) => None,
        }
    }

    /// Returns the method signature, if this is a method annotation.
    #[must_use]
    pub const fn as_method(&self) -> Option<&MethodSignature> {
        match self {
            Self::Method(signature) => Some(signature),
            Self::Type(_) => None,
        }
    }
}
