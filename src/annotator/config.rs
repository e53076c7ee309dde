//! Annotator configuration

/// Configuration for a build session
///
/// Plain data with a few presets; pass it to [`Module::with_config`] and
/// [`CustomAttributeFactory::with_config`].
///
/// [`Module::with_config`]: crate::metadata::module::Module::with_config
/// [`CustomAttributeFactory::with_config`]: crate::annotator::CustomAttributeFactory::with_config
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotatorConfig {
    /// Reuse the `MemberRef` row of a foreign constructor that was already imported into the
    /// target module instead of adding a new row per request
    pub cache_imports: bool,

    /// Resolve every constructor the factory can produce when the factory is created, so a
    /// malformed well-known type table fails up front rather than on first use
    pub validate_on_create: bool,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            cache_imports: true,
            validate_on_create: false,
        }
    }
}

impl AnnotatorConfig {
    /// Cached imports, eager validation of the well-known type table
    #[must_use]
    pub fn strict() -> Self {
        Self {
            cache_imports: true,
            validate_on_create: true,
        }
    }

    /// Every import adds a fresh `MemberRef` row
    #[must_use]
    pub fn uncached() -> Self {
        Self {
            cache_imports: false,
            validate_on_create: false,
        }
    }
}
