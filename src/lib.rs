// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![allow(dead_code)]
#![allow(clippy::too_many_arguments)]

//! # refasm-annotator
//!
//! Custom attribute synthesis and cross-module type identity for tools that emit .NET
//! reference assemblies.
//!
//! A reference-assembly generator rewrites an implementation assembly into a metadata-only
//! surface. Along the way it must decorate what it emits with compiler-recognised
//! attributes (`CompilerGenerated`, `Nullable`, `AttributeUsage`, ...) and match types of
//! the reference surface against types of the implementation it was derived from. This
//! crate provides both pieces on top of an in-memory metadata graph; loading and writing
//! assemblies is left to the host pipeline.
//!
//! ## Features
//!
//! - **Attribute synthesis** - Builds attribute records bound to the one constructor of the
//!   right shape and imports foreign constructors into the target module on demand
//! - **Type identity** - Compares and hashes types by namespace, name, generic arity and
//!   enclosing-type chain, so equal types from different modules meet in one hash bucket
//! - **Concurrent graphs** - Registries and modules are lock-free and can be shared between
//!   threads
//!
//! ## Quick Start
//!
//! ```rust
//! use refasm_annotator::prelude::*;
//!
//! let reference = TypeRegistry::new(TypeSource::Module("Lib.Ref.dll".into()));
//! let implementation = TypeRegistry::new(TypeSource::Module("Lib.dll".into()));
//!
//! let outer = reference.create_type("Lib", "Outer", 0)?;
//! reference.create_nested_type(&outer, "Inner", 0)?;
//! let outer = implementation.create_type("Lib", "Outer", 0)?;
//! implementation.create_nested_type(&outer, "Inner", 0)?;
//!
//! let matches = match_types(&reference, &implementation);
//! assert_eq!(matches.pairs.len(), 2);
//! assert!(matches.unmatched_left.is_empty());
//! # Ok::<(), refasm_annotator::Error>(())
//! ```
//!
//! See [`annotator`] for building attribute records.
//!
//! ## Logging
//!
//! The crate emits [`tracing`](https://docs.rs/tracing) events: `debug` for every attribute
//! record built and type matching summaries, `trace` for every `MemberRef` import. Install
//! any subscriber to see them.

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types.
///
/// # Example
///
/// ```rust
/// use refasm_annotator::prelude::*;
///
/// let registry = TypeRegistry::new(TypeSource::Module("Lib.dll".into()));
/// let byte = registry.get_primitive(CilPrimitiveKind::U1)?;
/// assert_eq!(byte.fullname(), "System.Byte");
/// # Ok::<(), refasm_annotator::Error>(())
/// ```
pub mod prelude;

/// Attribute synthesis for reference-assembly builds
///
/// # Key Types
///
/// - [`annotator::CustomAttributeFactory`] - Builds attribute records
/// - [`annotator::WellKnownTypes`] - Framework types the records reference
/// - [`annotator::AnnotatorConfig`] - Session configuration
pub mod annotator;

/// In-memory metadata graph: tokens, types, methods, signatures, modules and attribute records
///
/// # Key Components
///
/// - [`metadata::typesystem`] - Type graph, registries, type identity and matching
/// - [`metadata::method`] - Methods and constructor selection
/// - [`metadata::module`] - The target module and its `MemberRef` imports
/// - [`metadata::customattributes`] - Attribute records
pub mod metadata;

/// `refasm-annotator` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `refasm-annotator` Error type
///
/// # Examples
///
/// ```rust
/// use refasm_annotator::{prelude::*, Error};
///
/// let registry = TypeRegistry::new(TypeSource::Module("Lib.dll".into()));
/// let ty = registry.create_type("N", "NoCtor", 0)?;
///
/// match ty.constructor(ConstructorShape::NoArgs) {
///     Err(Error::ConstructorMismatch { found, .. }) => assert_eq!(found, 0),
///     other => panic!("unexpected {other:?}"),
/// }
/// # Ok::<(), refasm_annotator::Error>(())
/// ```
pub use error::Error;
