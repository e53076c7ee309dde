//! Metadata model the annotator operates on.
//!
//! The host pipeline loads assemblies and hands their contents over as in-memory graphs;
//! this module defines the shape of those graphs.
//!
//! # Key Components
//!
//! - [`token`] - Metadata table row references
//! - [`typesystem`] - Type declarations, per-module registries and type identity
//! - [`method`] - Methods and constructor selection
//! - [`signatures`] - Decoded method and parameter signatures
//! - [`module`] - The target module and its reference-import table
//! - [`customattributes`] - Custom attribute records

/// Implementation of custom attribute records
pub mod customattributes;
/// Implementation of methods and constructor lookup
pub mod method;
/// Implementation of the target module and reference imports
pub mod module;
/// Implementation of method and type signatures
pub mod signatures;
/// Implementation of metadata tokens
pub mod token;
/// Implementation of the type graph and type identity
pub mod typesystem;
