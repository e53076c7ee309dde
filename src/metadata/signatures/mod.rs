//! Method and type signatures.
//!
//! The annotator never parses signature blobs; signatures are handed over already decoded by
//! the metadata provider. What matters here is the shape of constructor parameter lists, in
//! particular whether a parameter is an array (see [`TypeSignature::is_array`]).

mod types;

pub use types::*;
