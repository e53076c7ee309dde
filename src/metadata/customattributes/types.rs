//! CustomAttribute-specific types and data structures.
//!
//! This module contains the types used to represent synthesized custom attribute records:
//! argument values, their declared types, named arguments, and the record itself. Records are
//! built fresh for every request and handed to the caller, who decides where to attach them.

use std::sync::Arc;

use crate::metadata::{module::MethodReference, typesystem::CilTypeRc};

/// A reference-counted pointer to a `CustomAttribute`
pub type CustomAttributeRc = Arc<CustomAttribute>;
/// A vector that holds a list of `CustomAttribute` instances for storage on parent objects
pub type CustomAttributeList = Arc<boxcar::Vec<CustomAttributeRc>>;

/// An attribute application: constructor, positional and named arguments
#[derive(Debug, Clone)]
pub struct CustomAttribute {
    /// The attribute constructor, referenceable from the target module
    pub constructor: MethodReference,
    /// Fixed arguments, in constructor parameter order
    pub fixed_args: Vec<CustomAttributeTypedArgument>,
    /// Named arguments (fields and properties)
    pub named_args: Vec<CustomAttributeNamedArgument>,
}

impl CustomAttribute {
    /// Create a record without arguments
    #[must_use]
    pub fn new(constructor: MethodReference) -> Self {
        CustomAttribute {
            constructor,
            fixed_args: Vec::new(),
            named_args: Vec::new(),
        }
    }

    /// Look up a named property argument
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&CustomAttributeNamedArgument> {
        self.named_args
            .iter()
            .find(|arg| !arg.is_field && arg.name == name)
    }
}

/// Declared type of an argument
#[derive(Debug, Clone)]
pub enum AttributeArgType {
    /// A single value of this type
    Type(CilTypeRc),
    /// A single dimension array of the element type
    SzArray(Box<AttributeArgType>),
}

impl AttributeArgType {
    /// Returns `true` for array types
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, AttributeArgType::SzArray(_))
    }

    /// The type of a single value, the element type for arrays
    #[must_use]
    pub fn element_type(&self) -> &CilTypeRc {
        match self {
            AttributeArgType::Type(ty) => ty,
            AttributeArgType::SzArray(element) => element.element_type(),
        }
    }
}

/// An argument value together with its declared type
#[derive(Debug, Clone)]
pub struct CustomAttributeTypedArgument {
    /// Declared type of the argument
    pub arg_type: AttributeArgType,
    /// Value of the argument
    pub value: CustomAttributeArgument,
}

/// Represents a single custom attribute argument value
#[derive(Debug, Clone, PartialEq)]
pub enum CustomAttributeArgument {
    /// Boolean value
    Bool(bool),
    /// Unsigned 8-bit integer
    U1(u8),
    /// Signed 32-bit integer
    I4(i32),
    /// UTF-8 string
    String(String),
    /// Array of arguments
    Array(Vec<CustomAttributeArgument>),
}

/// Represents a named argument (field or property) in a custom attribute
#[derive(Debug, Clone)]
pub struct CustomAttributeNamedArgument {
    /// Whether this is a field (true) or property (false)
    pub is_field: bool,
    /// Name of the field or property
    pub name: String,
    /// Value of the argument
    pub arg: CustomAttributeTypedArgument,
}
