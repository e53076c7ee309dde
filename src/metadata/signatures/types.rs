use crate::metadata::token::Token;

/// The element types a parameter or return value can carry.
///
/// Only the subset that attribute constructors and the annotator's type graphs need is
/// modelled; anything else is represented by [`TypeSignature::Unknown`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TypeSignature {
    #[default]
    /// Not defined
    Unknown,
    /// void
    Void,
    /// bool
    Boolean,
    /// unsigned 8bit integer
    U1,
    /// signed 32bit integer
    I4,
    /// System.String
    String,
    /// System.Object
    Object,
    /// CIL value-type
    // TypeDefOrRefOrSpecEncoded
    ValueType(Token),
    /// CIL Class
    // TypeDefOrRefOrSpecEncoded
    Class(Token),
    /// Generic type parameter
    GenericParamType(u32),
    /// Array
    Array(SignatureArray),
    /// Single dimension array
    SzArray(SignatureSzArray),
}

impl TypeSignature {
    /// Returns `true` for single- and multi-dimensional array types.
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, TypeSignature::Array(_) | TypeSignature::SzArray(_))
    }

    /// Creates a single dimension array of `base`
    #[must_use]
    pub fn sz_array(base: TypeSignature) -> Self {
        TypeSignature::SzArray(SignatureSzArray {
            modifiers: Vec::new(),
            base: Box::new(base),
        })
    }
}

/// A pointer to a 'flat' Array
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignatureArray {
    /// The type in the array
    pub base: Box<TypeSignature>,
    /// The number of dimensions
    pub rank: u32,
}

/// A single dimension, zero based array
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignatureSzArray {
    /// Custom modifiers - `TypeDefOrRefOrSpecEncoded`
    pub modifiers: Vec<Token>,
    /// The type in the array
    pub base: Box<TypeSignature>,
}

/// Parameter with optional custom modifiers
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignatureParameter {
    /// Custom modifiers of the parameter - `TypeDefOrRefOrSpecEncoded`
    pub modifiers: Vec<Token>,
    /// Parameter is passed by reference
    pub by_ref: bool,
    /// The type of the parameter
    pub base: TypeSignature,
}

impl From<TypeSignature> for SignatureParameter {
    fn from(base: TypeSignature) -> Self {
        SignatureParameter {
            modifiers: Vec::new(),
            by_ref: false,
            base,
        }
    }
}

/// Represents a method signature (II.23.2.1)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignatureMethod {
    /// Used to encode the keyword instance in the calling convention, see §II.15.3
    pub has_this: bool,
    /// Used to indicate that the method has one or more generic parameters.
    pub param_count_generic: u32,
    /// The return type of this `Method`
    pub return_type: SignatureParameter,
    /// The parameters of this `Method`
    pub params: Vec<SignatureParameter>,
}

impl SignatureMethod {
    /// Signature of an instance method returning `void` with the given parameter types.
    #[must_use]
    pub fn instance(params: Vec<TypeSignature>) -> Self {
        SignatureMethod {
            has_this: true,
            param_count_generic: 0,
            return_type: TypeSignature::Void.into(),
            params: params.into_iter().map(SignatureParameter::from).collect(),
        }
    }

    /// Signature of a static method returning `void` with the given parameter types.
    #[must_use]
    pub fn static_(params: Vec<TypeSignature>) -> Self {
        SignatureMethod {
            has_this: false,
            ..Self::instance(params)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_array() {
        assert!(TypeSignature::sz_array(TypeSignature::U1).is_array());
        assert!(TypeSignature::Array(SignatureArray {
            base: Box::new(TypeSignature::I4),
            rank: 2,
        })
        .is_array());
        assert!(!TypeSignature::U1.is_array());
        assert!(!TypeSignature::Class(Token::new(0x02000001)).is_array());
    }

    #[test]
    fn test_signature_constructors() {
        let sig = SignatureMethod::instance(vec![TypeSignature::U1]);
        assert!(sig.has_this);
        assert_eq!(sig.params.len(), 1);
        assert_eq!(sig.return_type.base, TypeSignature::Void);

        let sig = SignatureMethod::static_(Vec::new());
        assert!(!sig.has_this);
        assert!(sig.params.is_empty());
    }
}
