use std::sync::{Arc, Weak};

use crate::metadata::{
    token::Token,
    typesystem::{CilType, CilTypeRc},
};

/// A vector that holds `CilTypeRef` instances (weak references)
pub type CilTypeRefList = Arc<boxcar::Vec<CilTypeRef>>;

/// A smart reference to a `CilType` that automatically handles weak references
/// to prevent circular reference memory leaks while providing a clean API
///
/// Enclosing-type and definition links are back-references into a graph owned by a
/// [`TypeRegistry`](crate::metadata::typesystem::TypeRegistry), so they are always weak.
#[derive(Clone, Debug)]
pub struct CilTypeRef {
    weak_ref: Weak<CilType>,
}

impl CilTypeRef {
    /// Create a new `CilTypeRef` from a strong reference
    pub fn new(strong_ref: &CilTypeRc) -> Self {
        Self {
            weak_ref: Arc::downgrade(strong_ref),
        }
    }

    /// Get a strong reference to the type, returning None if the type has been dropped
    #[must_use]
    pub fn upgrade(&self) -> Option<CilTypeRc> {
        self.weak_ref.upgrade()
    }

    /// Check if the referenced type is still alive
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.weak_ref.strong_count() > 0
    }

    /// Get the token of the referenced type (if still alive)
    #[must_use]
    pub fn token(&self) -> Option<Token> {
        self.upgrade().map(|t| t.token)
    }

    /// Get the name of the referenced type (if still alive)
    #[must_use]
    pub fn name(&self) -> Option<String> {
        self.upgrade().map(|t| t.name.clone())
    }
}

impl From<CilTypeRc> for CilTypeRef {
    fn from(strong_ref: CilTypeRc) -> Self {
        Self::new(&strong_ref)
    }
}

/// Where a type is defined
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeSource {
    /// Type is defined in the module with this name
    Module(String),
    /// Type is a reference into the assembly with this name
    AssemblyRef(String),
    /// Type is a primitive defined by the CLR runtime
    Primitive,
    /// Type source is not determined or not available
    Unknown,
}

impl TypeSource {
    /// Returns `true` if this type source refers to an external reference.
    #[must_use]
    pub fn is_external(&self) -> bool {
        matches!(self, TypeSource::AssemblyRef(_))
    }

    /// Returns `true` if this source represents a runtime primitive
    #[must_use]
    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeSource::Primitive)
    }
}

/// A reference-counted pointer to a `GenericParam`
pub type GenericParamRc = Arc<GenericParam>;
/// A vector that holds the generic parameters of a type
pub type GenericParamList = Arc<boxcar::Vec<GenericParamRc>>;

/// A generic parameter declared on a type
///
/// Constraints and variance are not modelled; type identity only depends on how many
/// generic parameters a declaration has.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericParam {
    /// Token
    pub token: Token,
    /// 2-byte index of the generic parameter, numbered left-to-right, from zero
    pub number: u32,
    /// Name of the parameter (`T`, `TKey`, ...)
    pub name: String,
}
