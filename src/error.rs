use thiserror::Error;

use crate::metadata::token::Token;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every failure is fatal for the operation that produced it: nothing is retried and no
/// partially built attribute record is ever handed back to the caller.
///
/// # Error Categories
///
/// ## Attribute Synthesis Errors
/// - [`Error::ConstructorMismatch`] - A type does not expose exactly one matching constructor
/// - [`Error::TypeNotResolvable`] - A type reference has no definition to resolve to
/// - [`Error::WellKnownTypeMissing`] - A well-known type was never supplied to the table
///
/// ## Type Graph Errors
/// - [`Error::TypeInsert`] - Failed to register a new type in a registry
/// - [`Error::TypeNotFound`] - Requested type not found in a registry
/// - [`Error::Malformed`] - The metadata graph is internally inconsistent
///
/// # Examples
///
/// ```rust
/// use refasm_annotator::Error;
///
/// fn report(err: &Error) {
///     match err {
///         Error::ConstructorMismatch { type_name, found, .. } => {
///             eprintln!("{type_name}: expected one constructor, found {found}");
///         }
///         Error::TypeNotResolvable(name) => eprintln!("no definition for {name}"),
///         e => eprintln!("Other error: {e}"),
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A type does not expose exactly one constructor of the requested shape.
    ///
    /// Both the "no constructor" and the "more than one constructor" outcome of a
    /// constructor lookup map to this variant. The condition describes the shape of the
    /// input assembly and is never transient.
    ///
    /// # Fields
    ///
    /// * `type_name` - Full name of the type that was searched
    /// * `shape` - Human readable description of the requested constructor shape
    /// * `found` - Number of constructors that matched (0 or more than 1)
    #[error("Expected exactly one {shape} constructor on '{type_name}', found {found}")]
    ConstructorMismatch {
        /// Full name of the searched type
        type_name: String,
        /// The constructor shape that was requested
        shape: &'static str,
        /// How many constructors matched the shape
        found: usize,
    },

    /// A type reference could not be resolved to its definition.
    ///
    /// Occurs when a well-known type is only available as a reference and no definition
    /// body was linked to it (or the linked definition has been dropped).
    #[error("Unable to resolve the definition of type '{0}'")]
    TypeNotResolvable(String),

    /// A well-known type was requested but is not part of the supplied table.
    #[error("Well-known type '{0}' is not available")]
    WellKnownTypeMissing(String),

    /// The metadata graph is inconsistent.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// Failed to insert new type into a `TypeRegistry`.
    ///
    /// The associated [`Token`] is already taken by another type.
    #[error("Failed to insert new type into TypeRegistry - {0}")]
    TypeInsert(Token),

    /// Failed to find type in a `TypeRegistry`.
    #[error("Failed to find type in TypeRegistry - {0}")]
    TypeNotFound(Token),
}
