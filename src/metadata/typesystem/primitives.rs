//! Runtime primitive types every [`TypeRegistry`](super::TypeRegistry) registers up front.
//!
//! Attribute arguments are typed with these handles (`System.Byte` for nullable flags,
//! `System.Boolean` for `AllowMultiple`/`Inherited`, ...), so they have to exist before any
//! record is built.

use strum::EnumIter;

use crate::metadata::{
    signatures::TypeSignature,
    token::{Token, TABLE},
};

/// The primitive types tracked by a registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum CilPrimitiveKind {
    /// System.Void - represents no value
    Void,
    /// System.Boolean - true/false value
    Boolean,
    /// System.Byte - unsigned 8-bit integer
    U1,
    /// System.Int32 - signed 32-bit integer
    I4,
    /// System.Object - base class for all reference types
    Object,
    /// System.String - immutable string of Unicode characters
    String,
}

impl CilPrimitiveKind {
    /// Get the artificial token for this type
    #[must_use]
    pub fn token(&self) -> Token {
        let row = match self {
            CilPrimitiveKind::Void => 0x01,
            CilPrimitiveKind::Boolean => 0x02,
            CilPrimitiveKind::U1 => 0x05,
            CilPrimitiveKind::I4 => 0x08,
            CilPrimitiveKind::Object => 0x10,
            CilPrimitiveKind::String => 0x11,
        };
        Token::from_parts(TABLE::PRIMITIVE, row)
    }

    /// Get the namespace of this type
    #[must_use]
    pub fn namespace(&self) -> &'static str {
        "System"
    }

    /// Get the short name (without namespace)
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            CilPrimitiveKind::Void => "Void",
            CilPrimitiveKind::Boolean => "Boolean",
            CilPrimitiveKind::U1 => "Byte",
            CilPrimitiveKind::I4 => "Int32",
            CilPrimitiveKind::Object => "Object",
            CilPrimitiveKind::String => "String",
        }
    }

    /// The element type used when this primitive appears in a signature
    #[must_use]
    pub fn signature(&self) -> TypeSignature {
        match self {
            CilPrimitiveKind::Void => TypeSignature::Void,
            CilPrimitiveKind::Boolean => TypeSignature::Boolean,
            CilPrimitiveKind::U1 => TypeSignature::U1,
            CilPrimitiveKind::I4 => TypeSignature::I4,
            CilPrimitiveKind::Object => TypeSignature::Object,
            CilPrimitiveKind::String => TypeSignature::String,
        }
    }
}
