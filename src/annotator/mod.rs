//! Synthesis of the attribute records a reference-assembly build attaches to its output.
//!
//! A build session assembles a [`WellKnownTypes`] table for the target module, creates a
//! [`CustomAttributeFactory`] over it, and asks the factory for records as it walks the
//! types and members it emits. Each record references its constructor in a form the target
//! module can encode: local constructors directly, foreign ones through a `MemberRef`
//! imported on demand.
//!
//! # Key Components
//!
//! - [`CustomAttributeFactory`] - Builds `CompilerGenerated`, `Embedded`, `Nullable`,
//!   `NullableContext`, `NullablePublicOnly`, `AttributeUsage` and `ReferenceAssembly` records
//! - [`WellKnownTypes`] - The framework types a session references
//! - [`AttributeTargets`] - Flags for `AttributeUsage`
//! - [`AnnotatorConfig`] - Import caching and eager validation
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use refasm_annotator::prelude::*;
//!
//! let runtime = TypeRegistry::new(TypeSource::Module("System.Runtime.dll".into()));
//! let target = TypeRegistry::new(TypeSource::Module("Lib.dll".into()));
//! let module = Arc::new(Module::new("Lib.dll"));
//!
//! let targets = runtime.create_type("System", "AttributeTargets", 0)?;
//! for kind in [
//!     WellKnownType::CompilerGeneratedAttribute,
//!     WellKnownType::AttributeUsageAttribute,
//!     WellKnownType::AttributeTargets,
//!     WellKnownType::ReferenceAssemblyAttribute,
//! ] {
//!     let definition = match kind {
//!         WellKnownType::AttributeTargets => targets.clone(),
//!         WellKnownType::AttributeUsageAttribute => {
//!             let usage = runtime.create_type(kind.namespace(), kind.name(), 0)?;
//!             runtime.create_constructor(&usage, vec![TypeSignature::ValueType(targets.token)]);
//!             usage
//!         }
//!         _ => {
//!             let attribute = runtime.create_type(kind.namespace(), kind.name(), 0)?;
//!             runtime.create_constructor(&attribute, Vec::new());
//!             attribute
//!         }
//!     };
//!     let reference = target.create_type_ref(
//!         kind.namespace(),
//!         kind.name(),
//!         TypeSource::AssemblyRef("System.Runtime".into()),
//!     )?;
//!     reference.set_definition(&definition)?;
//! }
//!
//! let embedded = target.create_type("Microsoft.CodeAnalysis", "EmbeddedAttribute", 0)?;
//! target.create_constructor(&embedded, Vec::new());
//! let nullable = target.create_type("System.Runtime.CompilerServices", "NullableAttribute", 0)?;
//! target.create_constructor(&nullable, vec![TypeSignature::U1]);
//! target.create_constructor(&nullable, vec![TypeSignature::sz_array(TypeSignature::U1)]);
//! let context =
//!     target.create_type("System.Runtime.CompilerServices", "NullableContextAttribute", 0)?;
//! target.create_constructor(&context, vec![TypeSignature::U1]);
//! let public_only =
//!     target.create_type("System.Runtime.CompilerServices", "NullablePublicOnlyAttribute", 0)?;
//! target.create_constructor(&public_only, vec![TypeSignature::Boolean]);
//!
//! let factory = CustomAttributeFactory::with_config(
//!     WellKnownTypes::resolve(module.clone(), &target)?,
//!     embedded,
//!     nullable,
//!     context,
//!     public_only,
//!     &AnnotatorConfig::strict(),
//! )?;
//!
//! let record = factory.nullable_flags(&[1, 2])?;
//! assert!(record.fixed_args[0].arg_type.is_array());
//!
//! let usage = factory.attribute_usage(AttributeTargets::CLASS, Some(false), None)?;
//! assert!(usage.constructor.is_imported());
//! assert_eq!(module.member_ref_count(), 1);
//! # Ok::<(), refasm_annotator::Error>(())
//! ```

mod config;
mod factory;
mod targets;
mod wellknown;

pub use config::AnnotatorConfig;
pub use factory::{CustomAttributeFactory, ALLOW_MULTIPLE, INHERITED};
pub use targets::AttributeTargets;
pub use wellknown::{WellKnownType, WellKnownTypes};
