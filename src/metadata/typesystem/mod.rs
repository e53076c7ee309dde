//! Type declarations and the per-module graphs that own them.
//!
//! This module provides the in-memory shape the annotator works on: declarations with their
//! namespace, name, generic parameters, methods and enclosing declaration, collected per
//! module in a [`TypeRegistry`]. Declarations from two independently loaded registries are
//! matched with the [`TypeIdentityComparer`].
//!
//! # Key Components
//!
//! - [`CilType`]: A type definition or type reference
//! - [`TypeRegistry`]: Owner of all types declared or referenced by one module
//! - [`TypeIdentityComparer`]: Structural identity and hash over declarations
//! - [`EquivalentType`]: Hash-map key using that identity
//! - [`match_types`]: Pairs the declarations of two registries
//! - [`CilPrimitiveKind`]: Built-in primitive types (byte, bool, ...)
//!
//! # Examples
//!
//! ```rust
//! use refasm_annotator::metadata::typesystem::{TypeIdentityComparer, TypeRegistry, TypeSource};
//!
//! let reference = TypeRegistry::new(TypeSource::Module("Lib.Ref.dll".into()));
//! let implementation = TypeRegistry::new(TypeSource::Module("Lib.dll".into()));
//!
//! let a = reference.create_type("N", "Foo", 0)?;
//! let b = implementation.create_type("N", "Foo", 0)?;
//!
//! assert!(TypeIdentityComparer::equals(Some(&a), Some(&b)));
//! # Ok::<(), refasm_annotator::Error>(())
//! ```

mod base;
mod equivalence;
mod matching;
mod primitives;
mod registry;

use std::sync::{Arc, OnceLock};

pub use base::{
    CilTypeRef, CilTypeRefList, GenericParam, GenericParamList, GenericParamRc, TypeSource,
};
pub use equivalence::{EquivalentType, TypeIdentityComparer};
pub use matching::{match_types, TypeMatches};
pub use primitives::CilPrimitiveKind;
pub use registry::TypeRegistry;

use crate::{
    metadata::{
        customattributes::CustomAttributeList,
        method::{ConstructorLookup, ConstructorShape, MethodList, MethodRc},
        token::{Token, TABLE},
    },
    Error, Result,
};

/// Reference to a `CilType`
pub type CilTypeRc = Arc<CilType>;

/// Represents a 'Type', either a definition with a body (methods, nested types, ...) or a
/// reference to a type defined elsewhere. The `Token` tells them apart: `TypeDef`,
/// `TypeRef`, or the artificial primitive range.
pub struct CilType {
    /// Token
    pub token: Token,
    /// `TypeNamespace` (empty for nested types and the global namespace)
    pub namespace: String,
    /// `TypeName`
    pub name: String,
    /// Flags (a 4-byte bitmask of type `TypeAttributes`, §II.23.1.15)
    pub flags: u32,
    /// Where this type is defined
    pub source: TypeSource,
    /// All methods this type has
    pub methods: MethodList,
    /// All types that are 'contained' in this type
    pub nested_types: CilTypeRefList,
    /// All generic parameters this type has
    pub generic_params: GenericParamList,
    /// All custom attributes attached to this type
    pub custom_attributes: CustomAttributeList,
    /// The declaration this type is nested in
    enclosing: OnceLock<CilTypeRef>,
    /// For references, the definition they resolve to
    definition: OnceLock<CilTypeRef>,
}

impl CilType {
    /// Create a new instance of a `CilType`
    #[must_use]
    pub fn new(token: Token, namespace: &str, name: &str, source: TypeSource, flags: u32) -> Self {
        CilType {
            token,
            namespace: namespace.to_string(),
            name: name.to_string(),
            flags,
            source,
            methods: Arc::new(boxcar::Vec::new()),
            nested_types: Arc::new(boxcar::Vec::new()),
            generic_params: Arc::new(boxcar::Vec::new()),
            custom_attributes: Arc::new(boxcar::Vec::new()),
            enclosing: OnceLock::new(),
            definition: OnceLock::new(),
        }
    }

    /// Whether this type was declared inside another type
    #[must_use]
    pub fn is_nested(&self) -> bool {
        self.enclosing.get().is_some()
    }

    /// The enclosing declaration; `None` for top-level types or when it has been dropped
    #[must_use]
    pub fn enclosing(&self) -> Option<CilTypeRc> {
        self.enclosing.get().and_then(CilTypeRef::upgrade)
    }

    /// Link this type to its enclosing declaration. Can only happen once.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if the type already has an enclosing declaration.
    pub fn set_enclosing(&self, enclosing: &CilTypeRc) -> Result<()> {
        self.enclosing
            .set(CilTypeRef::new(enclosing))
            .map_err(|_| malformed_error!("Type {} is already nested", self.token))
    }

    /// Whether this is a `TypeRef` rather than a definition
    #[must_use]
    pub fn is_reference(&self) -> bool {
        self.token.table() == TABLE::TYPE_REF
    }

    /// Link a type reference to the definition it stands for. Can only happen once.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if this is not a reference or it was already linked.
    pub fn set_definition(&self, definition: &CilTypeRc) -> Result<()> {
        if !self.is_reference() {
            return Err(malformed_error!(
                "Type {} is a definition, not a reference",
                self.token
            ));
        }

        self.definition
            .set(CilTypeRef::new(definition))
            .map_err(|_| malformed_error!("Type reference {} is already resolved", self.token))
    }

    /// Resolve to the type's full definition
    ///
    /// Definitions and primitives resolve to themselves, references to their linked
    /// definition.
    ///
    /// # Errors
    /// Returns [`Error::TypeNotResolvable`] for a reference without a live definition.
    pub fn resolve(self: &Arc<Self>) -> Result<CilTypeRc> {
        if !self.is_reference() {
            return Ok(self.clone());
        }

        self.definition
            .get()
            .and_then(CilTypeRef::upgrade)
            .ok_or_else(|| Error::TypeNotResolvable(self.fullname()))
    }

    /// Number of generic parameters
    #[must_use]
    pub fn generic_param_count(&self) -> usize {
        self.generic_params.count()
    }

    /// Returns the full name of the type, `Namespace.Name` for top-level types and
    /// `Namespace.Outer/Inner` for nested ones
    #[must_use]
    pub fn fullname(&self) -> String {
        let mut segments = vec![self.name.clone()];
        let mut outermost_namespace = self.namespace.clone();

        let mut current = self.enclosing();
        while let Some(enclosing) = current {
            segments.push(enclosing.name.clone());
            outermost_namespace.clone_from(&enclosing.namespace);
            current = enclosing.enclosing();
        }

        segments.reverse();
        let path = segments.join("/");
        if outermost_namespace.is_empty() {
            path
        } else {
            format!("{outermost_namespace}.{path}")
        }
    }

    /// Search the methods of this type for the instance constructor of `shape`
    pub fn find_constructor(&self, shape: ConstructorShape) -> ConstructorLookup {
        shape.find(self.methods.iter().map(|(_, method)| method))
    }

    /// The unique instance constructor of `shape`
    ///
    /// # Errors
    /// Returns [`Error::ConstructorMismatch`] if none or more than one constructor matches.
    pub fn constructor(&self, shape: ConstructorShape) -> Result<MethodRc> {
        self.find_constructor(shape)
            .into_result(&self.fullname(), shape)
    }
}

impl std::fmt::Debug for CilType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CilType")
            .field("token", &self.token)
            .field("namespace", &self.namespace)
            .field("name", &self.name)
            .field("source", &self.source)
            .field("nested", &self.is_nested())
            .field("generic_params", &self.generic_param_count())
            .finish_non_exhaustive()
    }
}
