//! Methods declared by the types of a metadata graph.
//!
//! A [`Method`] carries just enough information for the annotator to pick attribute
//! constructors: its name, modifiers, decoded signature and a back-reference to the type that
//! declares it. Constructor selection lives in [`ConstructorShape`] and [`ConstructorLookup`].

mod constructor;
mod types;

use std::sync::{Arc, OnceLock};

pub use constructor::{ConstructorLookup, ConstructorShape};
pub use types::*;

use crate::metadata::{
    signatures::SignatureMethod,
    token::Token,
    typesystem::{CilTypeRc, CilTypeRef},
};

/// Name of instance constructors
pub const CONSTRUCTOR_NAME: &str = ".ctor";
/// Name of type initializers (static constructors)
pub const TYPE_INITIALIZER_NAME: &str = ".cctor";

/// A reference-counted pointer to a `Method`
pub type MethodRc = Arc<Method>;
/// A vector that holds the methods owned by a type
pub type MethodList = Arc<boxcar::Vec<MethodRc>>;

/// A method definition
pub struct Method {
    /// Token
    pub token: Token,
    /// Name of the method
    pub name: String,
    /// Accessibility
    pub flags_access: MethodAccessFlags,
    /// Static, special-name and other modifiers
    pub flags_modifiers: MethodModifiers,
    /// Decoded signature
    pub signature: SignatureMethod,
    /// The type declaring this method (weak, the type owns its methods)
    pub declaring_type: OnceLock<CilTypeRef>,
}

impl Method {
    /// Create a new method from raw `MethodAttributes` flags
    #[must_use]
    pub fn new(token: Token, name: &str, flags: u32, signature: SignatureMethod) -> Self {
        Method {
            token,
            name: name.to_string(),
            flags_access: MethodAccessFlags::from_method_flags(flags),
            flags_modifiers: MethodModifiers::from_method_flags(flags),
            signature,
            declaring_type: OnceLock::new(),
        }
    }

    /// `.ctor` or `.cctor` marked as special and runtime-special
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.flags_modifiers
            .contains(MethodModifiers::SPECIAL_NAME | MethodModifiers::RTSPECIAL_NAME)
            && (self.name == CONSTRUCTOR_NAME || self.name == TYPE_INITIALIZER_NAME)
    }

    /// Whether the method is defined on the type rather than per instance
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.flags_modifiers.contains(MethodModifiers::STATIC)
    }

    /// Number of declared parameters
    #[must_use]
    pub fn param_count(&self) -> usize {
        self.signature.params.len()
    }

    /// The declaring type, if it was linked and is still alive
    #[must_use]
    pub fn declaring_type(&self) -> Option<CilTypeRc> {
        self.declaring_type.get().and_then(CilTypeRef::upgrade)
    }
}

impl std::fmt::Debug for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Method")
            .field("token", &self.token)
            .field("name", &self.name)
            .field("flags_modifiers", &self.flags_modifiers)
            .field("params", &self.signature.params.len())
            .finish_non_exhaustive()
    }
}
