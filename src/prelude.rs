//! # refasm-annotator Prelude
//!
//! This module provides a convenient prelude for the most commonly used types from the
//! library. Import it to get quick access to the type graph, type identity and the
//! attribute factory.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all operations
pub use crate::Error;

/// The result type used throughout the crate
pub use crate::Result;

// ================================================================================================
// Attribute Synthesis
// ================================================================================================

/// Attribute record factory, its inputs and configuration
pub use crate::annotator::{
    AnnotatorConfig, AttributeTargets, CustomAttributeFactory, WellKnownType, WellKnownTypes,
};

/// Attribute records and their arguments
pub use crate::metadata::customattributes::{
    AttributeArgType, CustomAttribute, CustomAttributeArgument, CustomAttributeNamedArgument,
    CustomAttributeTypedArgument,
};

// ================================================================================================
// Metadata Graph
// ================================================================================================

/// Metadata token type for referencing table entries
pub use crate::metadata::token::Token;

/// Types, registries and type identity
pub use crate::metadata::typesystem::{
    match_types, CilPrimitiveKind, CilType, CilTypeRc, CilTypeRef, EquivalentType,
    TypeIdentityComparer, TypeMatches, TypeRegistry, TypeSource,
};

/// Methods and constructor selection
pub use crate::metadata::method::{
    ConstructorLookup, ConstructorShape, Method, MethodRc, CONSTRUCTOR_NAME,
};

/// Signatures
pub use crate::metadata::signatures::{SignatureMethod, TypeSignature};

/// The target module and its imports
pub use crate::metadata::module::{MemberRef, MethodReference, Module, ModuleRc};
