//! Per-module type graph.
//!
//! A [`TypeRegistry`] owns every type a module declares or references, keyed by token. Types
//! point back at their enclosing declaration and at the definition they resolve to through
//! weak references, so the registry is the only owner of the graph.
//!
//! # Thread Safety
//!
//! All operations take `&self`: storage is a lock-free skip list, the name index a
//! `DashMap`, and token rows are handed out by atomic counters. Registries can be shared
//! between threads through an `Arc`.
//!
//! # Example
//!
//! ```rust
//! use refasm_annotator::metadata::typesystem::{CilPrimitiveKind, TypeRegistry, TypeSource};
//!
//! let registry = TypeRegistry::new(TypeSource::Module("Lib.dll".into()));
//! let outer = registry.create_type("N", "Outer", 0)?;
//! let inner = registry.create_nested_type(&outer, "Inner", 0)?;
//!
//! assert_eq!(inner.fullname(), "N.Outer/Inner");
//! assert!(registry.get_by_fullname("N.Outer/Inner").is_some());
//! assert_eq!(registry.get_primitive(CilPrimitiveKind::U1)?.name, "Byte");
//! # Ok::<(), refasm_annotator::Error>(())
//! ```

use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};

use crossbeam_skiplist::SkipMap;
use dashmap::DashMap;
use strum::IntoEnumIterator;

use crate::{
    metadata::{
        method::{Method, MethodRc, CONSTRUCTOR_NAME},
        signatures::{SignatureMethod, TypeSignature},
        token::{Token, TABLE},
        typesystem::{
            CilPrimitiveKind, CilType, CilTypeRc, CilTypeRef, GenericParam, GenericParamRc,
            TypeSource,
        },
    },
    Error, Result,
};

/// `public hidebysig specialname rtspecialname`
const CONSTRUCTOR_FLAGS: u32 = 0x0006 | 0x0080 | 0x0800 | 0x1000;

/// Central registry for the types of one module
pub struct TypeRegistry {
    /// Primary type storage indexed by metadata tokens
    types: SkipMap<Token, CilTypeRc>,
    /// Secondary index: types indexed by full name (`Namespace.Outer/Inner`)
    types_by_fullname: DashMap<String, Vec<Token>>,
    /// Module the registry belongs to; assigned to every type created as a definition
    source: TypeSource,
    next_type_def: AtomicU32,
    next_type_ref: AtomicU32,
    next_method_def: AtomicU32,
    next_generic_param: AtomicU32,
}

impl TypeRegistry {
    /// Create a new type registry with the primitive types pre-registered
    ///
    /// ## Arguments
    /// * 'source' - The module whose types this registry holds
    #[must_use]
    pub fn new(source: TypeSource) -> Self {
        let registry = TypeRegistry {
            types: SkipMap::new(),
            types_by_fullname: DashMap::new(),
            source,
            next_type_def: AtomicU32::new(1),
            next_type_ref: AtomicU32::new(1),
            next_method_def: AtomicU32::new(1),
            next_generic_param: AtomicU32::new(1),
        };

        for kind in CilPrimitiveKind::iter() {
            let primitive = Arc::new(CilType::new(
                kind.token(),
                kind.namespace(),
                kind.name(),
                TypeSource::Primitive,
                0,
            ));
            registry.index(&primitive);
        }

        registry
    }

    /// The module this registry belongs to
    #[must_use]
    pub fn source(&self) -> &TypeSource {
        &self.source
    }

    fn index(&self, new_type: &CilTypeRc) {
        self.types.insert(new_type.token, new_type.clone());
        self.types_by_fullname
            .entry(new_type.fullname())
            .or_default()
            .push(new_type.token);
    }

    /// Insert a `CilType` into the registry
    ///
    /// ## Arguments
    /// * '`new_type`' - The type to register
    ///
    /// # Errors
    /// Returns [`Error::TypeInsert`] if the token is already taken.
    pub fn insert(&self, new_type: &CilTypeRc) -> Result<()> {
        if self.types.contains_key(&new_type.token) {
            return Err(Error::TypeInsert(new_type.token));
        }

        self.index(new_type);
        Ok(())
    }

    fn next_row(counter: &AtomicU32) -> u32 {
        counter.fetch_add(1, Ordering::Relaxed)
    }

    /// Create and register a top-level type definition
    ///
    /// # Errors
    /// Returns [`Error::TypeInsert`] if the generated token collides with an inserted type.
    pub fn create_type(&self, namespace: &str, name: &str, flags: u32) -> Result<CilTypeRc> {
        let token = Token::from_parts(TABLE::TYPE_DEF, Self::next_row(&self.next_type_def));
        let new_type = Arc::new(CilType::new(
            token,
            namespace,
            name,
            self.source.clone(),
            flags,
        ));

        self.insert(&new_type)?;
        Ok(new_type)
    }

    /// Create and register a type definition nested in `enclosing`
    ///
    /// Nested types carry no namespace of their own.
    ///
    /// # Errors
    /// Returns [`Error::TypeInsert`] if the generated token collides with an inserted type.
    pub fn create_nested_type(
        &self,
        enclosing: &CilTypeRc,
        name: &str,
        flags: u32,
    ) -> Result<CilTypeRc> {
        let token = Token::from_parts(TABLE::TYPE_DEF, Self::next_row(&self.next_type_def));
        let new_type = Arc::new(CilType::new(token, "", name, self.source.clone(), flags));
        new_type.set_enclosing(enclosing)?;

        self.insert(&new_type)?;
        enclosing.nested_types.push(CilTypeRef::new(&new_type));
        Ok(new_type)
    }

    /// Create and register a reference to a type defined in `source`
    ///
    /// # Errors
    /// Returns [`Error::TypeInsert`] if the generated token collides with an inserted type.
    pub fn create_type_ref(
        &self,
        namespace: &str,
        name: &str,
        source: TypeSource,
    ) -> Result<CilTypeRc> {
        let token = Token::from_parts(TABLE::TYPE_REF, Self::next_row(&self.next_type_ref));
        let new_type = Arc::new(CilType::new(token, namespace, name, source, 0));

        self.insert(&new_type)?;
        Ok(new_type)
    }

    /// Append a generic parameter to `owner`
    pub fn add_generic_param(&self, owner: &CilTypeRc, name: &str) -> GenericParamRc {
        let param = Arc::new(GenericParam {
            token: Token::from_parts(
                TABLE::GENERIC_PARAM,
                Self::next_row(&self.next_generic_param),
            ),
            number: u32::try_from(owner.generic_params.count()).unwrap_or(u32::MAX),
            name: name.to_string(),
        });

        owner.generic_params.push(param.clone());
        param
    }

    /// Create a method on `owner` and link it back to its declaring type
    pub fn create_method(
        &self,
        owner: &CilTypeRc,
        name: &str,
        flags: u32,
        signature: SignatureMethod,
    ) -> MethodRc {
        let token = Token::from_parts(TABLE::METHOD_DEF, Self::next_row(&self.next_method_def));
        let method = Method::new(token, name, flags, signature);
        // Freshly created, the lock cannot be set yet
        let _ = method.declaring_type.set(CilTypeRef::new(owner));

        let method = Arc::new(method);
        owner.methods.push(method.clone());
        method
    }

    /// Create a public instance constructor on `owner` taking `params`
    pub fn create_constructor(&self, owner: &CilTypeRc, params: Vec<TypeSignature>) -> MethodRc {
        self.create_method(
            owner,
            CONSTRUCTOR_NAME,
            CONSTRUCTOR_FLAGS,
            SignatureMethod::instance(params),
        )
    }

    /// Get a type by its token
    #[must_use]
    pub fn get(&self, token: &Token) -> Option<CilTypeRc> {
        self.types.get(token).map(|entry| entry.value().clone())
    }

    /// Get the first type registered under `fullname`
    #[must_use]
    pub fn get_by_fullname(&self, fullname: &str) -> Option<CilTypeRc> {
        let tokens = self.types_by_fullname.get(fullname)?;
        tokens.iter().find_map(|token| self.get(token))
    }

    /// Get every type registered under `fullname`
    #[must_use]
    pub fn get_by_fullname_list(&self, fullname: &str) -> Vec<CilTypeRc> {
        match self.types_by_fullname.get(fullname) {
            Some(tokens) => tokens.iter().filter_map(|token| self.get(token)).collect(),
            None => Vec::new(),
        }
    }

    /// Get a primitive type
    ///
    /// # Errors
    /// Returns [`Error::TypeNotFound`] if the primitive was not registered.
    pub fn get_primitive(&self, primitive: CilPrimitiveKind) -> Result<CilTypeRc> {
        self.get(&primitive.token())
            .ok_or(Error::TypeNotFound(primitive.token()))
    }

    /// All types, including primitives, ordered by token
    #[must_use]
    pub fn all_types(&self) -> Vec<CilTypeRc> {
        self.types.iter().map(|entry| entry.value().clone()).collect()
    }

    /// Type definitions and references of the module, without the registered primitives
    #[must_use]
    pub fn declared_types(&self) -> Vec<CilTypeRc> {
        self.types
            .iter()
            .filter(|entry| !entry.value().source.is_primitive())
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Number of registered types, including primitives
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if no type is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
