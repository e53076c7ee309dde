//! Constructor selection by parameter shape.
//!
//! Well-known attribute types are expected to expose exactly one instance constructor for
//! each shape the annotator asks for. [`ConstructorShape::find`] reports the outcome as a
//! [`ConstructorLookup`] instead of asserting, and [`ConstructorLookup::into_result`] folds
//! both failure outcomes into [`Error::ConstructorMismatch`](crate::Error::ConstructorMismatch).

use strum::{Display, IntoStaticStr};

use crate::{
    metadata::method::{Method, MethodRc},
    Error, Result,
};

/// Parameter shape an instance constructor has to match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
pub enum ConstructorShape {
    /// No parameters
    #[strum(serialize = "parameterless")]
    NoArgs,
    /// Exactly one parameter of any type
    #[strum(serialize = "single-parameter")]
    OneArg,
    /// Exactly one parameter which is not an array
    #[strum(serialize = "single non-array parameter")]
    OneScalarArg,
    /// Exactly one parameter which is an array
    #[strum(serialize = "single array parameter")]
    OneArrayArg,
}

impl ConstructorShape {
    /// Whether `method` is an instance constructor of this shape
    #[must_use]
    pub fn matches(self, method: &Method) -> bool {
        if !method.is_constructor() || method.is_static() {
            return false;
        }

        let params = &method.signature.params;
        match self {
            ConstructorShape::NoArgs => params.is_empty(),
            ConstructorShape::OneArg => params.len() == 1,
            ConstructorShape::OneScalarArg => params.len() == 1 && !params[0].base.is_array(),
            ConstructorShape::OneArrayArg => params.len() == 1 && params[0].base.is_array(),
        }
    }

    /// Search `methods` for the constructor of this shape
    pub fn find<'a, I>(self, methods: I) -> ConstructorLookup
    where
        I: IntoIterator<Item = &'a MethodRc>,
    {
        let mut found: Option<MethodRc> = None;
        let mut count = 0;

        for method in methods {
            if self.matches(method) {
                count += 1;
                if found.is_none() {
                    found = Some(method.clone());
                }
            }
        }

        match (count, found) {
            (1, Some(method)) => ConstructorLookup::Unique(method),
            (0, _) => ConstructorLookup::NotFound,
            (n, _) => ConstructorLookup::Ambiguous(n),
        }
    }
}

/// Outcome of a constructor search
#[derive(Debug, Clone)]
pub enum ConstructorLookup {
    /// Exactly one constructor matched
    Unique(MethodRc),
    /// No constructor matched
    NotFound,
    /// More than one constructor matched; holds the number of matches
    Ambiguous(usize),
}

impl ConstructorLookup {
    /// Returns the unique constructor or a [`Error::ConstructorMismatch`] for `type_name`
    ///
    /// # Errors
    /// Returns [`Error::ConstructorMismatch`] for [`ConstructorLookup::NotFound`] and
    /// [`ConstructorLookup::Ambiguous`].
    pub fn into_result(self, type_name: &str, shape: ConstructorShape) -> Result<MethodRc> {
        let found = match self {
            ConstructorLookup::Unique(method) => return Ok(method),
            ConstructorLookup::NotFound => 0,
            ConstructorLookup::Ambiguous(count) => count,
        };

        Err(Error::ConstructorMismatch {
            type_name: type_name.to_string(),
            shape: shape.into(),
            found,
        })
    }
}
