//! Custom attribute records.
//!
//! A [`CustomAttribute`] binds an attribute constructor (as a [`MethodReference`] valid in
//! the target module) to its typed positional arguments and named property/field arguments.
//! Records are produced by the [`CustomAttributeFactory`](crate::annotator::CustomAttributeFactory)
//! and attached by the caller, e.g. to [`CilType::custom_attributes`].
//!
//! [`MethodReference`]: crate::metadata::module::MethodReference
//! [`CilType::custom_attributes`]: crate::metadata::typesystem::CilType::custom_attributes

mod types;

pub use types::*;
