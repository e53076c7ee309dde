//! The module under construction and its reference-import table.
//!
//! Custom attribute records may only point at constructors the target module can reference:
//! either methods it defines itself, or `MemberRef` rows it holds for methods of other
//! modules. [`Module::import_reference`] turns any constructor into such a
//! [`MethodReference`].

use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};

use crossbeam_skiplist::SkipMap;
use dashmap::DashMap;
use tracing::trace;

use crate::{
    annotator::AnnotatorConfig,
    metadata::{
        method::MethodRc,
        signatures::SignatureMethod,
        token::{Token, TABLE},
        typesystem::{CilTypeRc, CilTypeRef, TypeSource},
    },
    Result,
};

/// A reference-counted pointer to a `Module`
pub type ModuleRc = Arc<Module>;
/// A reference-counted pointer to a `MemberRef`
pub type MemberRefRc = Arc<MemberRef>;

/// A `MemberRef` row of the target module pointing at a method of another module
#[derive(Debug)]
pub struct MemberRef {
    /// Token in the target module
    pub token: Token,
    /// Name of the referenced method
    pub name: String,
    /// Full name of the type declaring the referenced method
    pub declaring_type_name: String,
    /// Where the declaring type lives
    pub declaring_source: TypeSource,
    /// Signature of the referenced method
    pub signature: SignatureMethod,
    /// Token of the method in its own module
    pub original: Token,
    /// The declaring type in the foreign graph
    pub declaring_type: CilTypeRef,
}

/// A method as the target module refers to it
#[derive(Debug, Clone)]
pub enum MethodReference {
    /// A method defined by the target module itself
    Definition(MethodRc),
    /// A method of another module, imported as a `MemberRef`
    Imported(MemberRefRc),
}

impl MethodReference {
    /// Token usable within the target module
    #[must_use]
    pub fn token(&self) -> Token {
        match self {
            MethodReference::Definition(method) => method.token,
            MethodReference::Imported(member) => member.token,
        }
    }

    /// Name of the referenced method
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            MethodReference::Definition(method) => &method.name,
            MethodReference::Imported(member) => &member.name,
        }
    }

    /// Signature of the referenced method
    #[must_use]
    pub fn signature(&self) -> &SignatureMethod {
        match self {
            MethodReference::Definition(method) => &method.signature,
            MethodReference::Imported(member) => &member.signature,
        }
    }

    /// Full name of the declaring type, if it can still be determined
    #[must_use]
    pub fn declaring_type_name(&self) -> Option<String> {
        match self {
            MethodReference::Definition(method) => {
                method.declaring_type().map(|ty| ty.fullname())
            }
            MethodReference::Imported(member) => Some(member.declaring_type_name.clone()),
        }
    }

    /// Returns `true` for `MemberRef` imports
    #[must_use]
    pub fn is_imported(&self) -> bool {
        matches!(self, MethodReference::Imported(_))
    }
}

/// Identity of a foreign method: its token is only unique within its own module
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ImportKey {
    source: TypeSource,
    method: Token,
}

/// The module a build session adds attribute records to
pub struct Module {
    /// Name of the module (`Lib.dll`)
    pub name: String,
    /// Source assigned to the types this module defines
    pub source: TypeSource,
    member_refs: SkipMap<Token, MemberRefRc>,
    import_cache: DashMap<ImportKey, MemberRefRc>,
    next_member_ref: AtomicU32,
    cache_imports: bool,
}

impl Module {
    /// Create a module using the default [`AnnotatorConfig`]
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self::with_config(name, &AnnotatorConfig::default())
    }

    /// Create a module honouring `config.cache_imports`
    #[must_use]
    pub fn with_config(name: &str, config: &AnnotatorConfig) -> Self {
        Module {
            name: name.to_string(),
            source: TypeSource::Module(name.to_string()),
            member_refs: SkipMap::new(),
            import_cache: DashMap::new(),
            next_member_ref: AtomicU32::new(1),
            cache_imports: config.cache_imports,
        }
    }

    /// Make `method` referenceable from this module
    ///
    /// Methods whose declaring type belongs to this module are returned as they are. Any
    /// other method gets a `MemberRef` row; with import caching enabled a method is only
    /// imported once.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the method has no live declaring type.
    pub fn import_reference(&self, method: &MethodRc) -> Result<MethodReference> {
        let declaring = method.declaring_type().ok_or_else(|| {
            malformed_error!(
                "Method '{}' ({}) has no declaring type",
                method.name,
                method.token
            )
        })?;

        if declaring.source == self.source {
            return Ok(MethodReference::Definition(method.clone()));
        }

        if !self.cache_imports {
            return Ok(MethodReference::Imported(
                self.add_member_ref(method, &declaring),
            ));
        }

        let key = ImportKey {
            source: declaring.source.clone(),
            method: method.token,
        };
        let member = self
            .import_cache
            .entry(key)
            .or_insert_with(|| self.add_member_ref(method, &declaring))
            .clone();

        Ok(MethodReference::Imported(member))
    }

    fn add_member_ref(&self, method: &MethodRc, declaring: &CilTypeRc) -> MemberRefRc {
        let token = Token::from_parts(
            TABLE::MEMBER_REF,
            self.next_member_ref.fetch_add(1, Ordering::Relaxed),
        );
        let member = Arc::new(MemberRef {
            token,
            name: method.name.clone(),
            declaring_type_name: declaring.fullname(),
            declaring_source: declaring.source.clone(),
            signature: method.signature.clone(),
            original: method.token,
            declaring_type: CilTypeRef::new(declaring),
        });

        trace!(
            module = %self.name,
            member_ref = %token,
            method = %method.name,
            declaring_type = %member.declaring_type_name,
            "imported foreign method"
        );

        self.member_refs.insert(token, member.clone());
        member
    }

    /// Get an imported `MemberRef` by token
    #[must_use]
    pub fn member_ref(&self, token: &Token) -> Option<MemberRefRc> {
        self.member_refs.get(token).map(|entry| entry.value().clone())
    }

    /// Number of `MemberRef` rows created by imports
    #[must_use]
    pub fn member_ref_count(&self) -> usize {
        self.member_refs.len()
    }
}

impl std::fmt::Debug for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Module")
            .field("name", &self.name)
            .field("member_refs", &self.member_refs.len())
            .field("cache_imports", &self.cache_imports)
            .finish_non_exhaustive()
    }
}
