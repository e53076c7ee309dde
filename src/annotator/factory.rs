//! Construction of the attribute records the annotator attaches.
//!
//! Every operation follows the same steps: resolve the attribute type to its definition, pick
//! the single instance constructor of the required [`ConstructorShape`], make it referenceable
//! from the target module, and add typed arguments. Lookups happen before anything is
//! imported, so a failing operation leaves the target module untouched.

use tracing::debug;

use crate::{
    annotator::{AnnotatorConfig, AttributeTargets, WellKnownType, WellKnownTypes},
    metadata::{
        customattributes::{
            AttributeArgType, CustomAttribute, CustomAttributeArgument,
            CustomAttributeNamedArgument, CustomAttributeTypedArgument,
        },
        method::{ConstructorShape, MethodRc},
        module::MethodReference,
        typesystem::CilTypeRc,
    },
    Result,
};

/// Name of the `AttributeUsageAttribute.AllowMultiple` property
pub const ALLOW_MULTIPLE: &str = "AllowMultiple";
/// Name of the `AttributeUsageAttribute.Inherited` property
pub const INHERITED: &str = "Inherited";

/// Builds attribute records for one build session
///
/// Holds the well-known type table plus the session's own embedded and nullable attribute
/// types. Nothing is mutated after construction, so a factory can be shared between threads.
pub struct CustomAttributeFactory {
    well_known: WellKnownTypes,
    embedded_attribute: CilTypeRc,
    nullable_attribute: CilTypeRc,
    nullable_context_attribute: CilTypeRc,
    nullable_public_only_attribute: CilTypeRc,
}

impl CustomAttributeFactory {
    /// Create a new factory
    ///
    /// ## Arguments
    /// * `well_known` - Framework types and the target module
    /// * `embedded_attribute` - `Microsoft.CodeAnalysis.EmbeddedAttribute`
    /// * `nullable_attribute` - `System.Runtime.CompilerServices.NullableAttribute`
    /// * `nullable_context_attribute` - `System.Runtime.CompilerServices.NullableContextAttribute`
    /// * `nullable_public_only_attribute` - `System.Runtime.CompilerServices.NullablePublicOnlyAttribute`
    #[must_use]
    pub fn new(
        well_known: WellKnownTypes,
        embedded_attribute: CilTypeRc,
        nullable_attribute: CilTypeRc,
        nullable_context_attribute: CilTypeRc,
        nullable_public_only_attribute: CilTypeRc,
    ) -> Self {
        CustomAttributeFactory {
            well_known,
            embedded_attribute,
            nullable_attribute,
            nullable_context_attribute,
            nullable_public_only_attribute,
        }
    }

    /// Create a new factory, validating it up front if `config.validate_on_create` is set
    ///
    /// # Errors
    /// Returns the first error [`CustomAttributeFactory::validate`] reports.
    pub fn with_config(
        well_known: WellKnownTypes,
        embedded_attribute: CilTypeRc,
        nullable_attribute: CilTypeRc,
        nullable_context_attribute: CilTypeRc,
        nullable_public_only_attribute: CilTypeRc,
        config: &AnnotatorConfig,
    ) -> Result<Self> {
        let factory = Self::new(
            well_known,
            embedded_attribute,
            nullable_attribute,
            nullable_context_attribute,
            nullable_public_only_attribute,
        );

        if config.validate_on_create {
            factory.validate()?;
        }

        Ok(factory)
    }

    /// The well-known type table this factory was built with
    #[must_use]
    pub fn well_known(&self) -> &WellKnownTypes {
        &self.well_known
    }

    /// Check that every constructor this factory can use resolves uniquely
    ///
    /// Nothing is imported into the target module.
    ///
    /// # Errors
    /// Returns the first [`crate::Error::ConstructorMismatch`],
    /// [`crate::Error::TypeNotResolvable`] or [`crate::Error::WellKnownTypeMissing`] found.
    pub fn validate(&self) -> Result<()> {
        let known = [
            (
                WellKnownType::CompilerGeneratedAttribute,
                ConstructorShape::NoArgs,
            ),
            (
                WellKnownType::AttributeUsageAttribute,
                ConstructorShape::OneArg,
            ),
            (
                WellKnownType::ReferenceAssemblyAttribute,
                ConstructorShape::NoArgs,
            ),
        ];
        for (kind, shape) in known {
            self.well_known_constructor(kind, shape)?;
        }
        self.well_known.get(WellKnownType::AttributeTargets)?;

        let session = [
            (&self.embedded_attribute, ConstructorShape::NoArgs),
            (&self.nullable_attribute, ConstructorShape::OneScalarArg),
            (&self.nullable_attribute, ConstructorShape::OneArrayArg),
            (&self.nullable_context_attribute, ConstructorShape::OneArg),
            (&self.nullable_public_only_attribute, ConstructorShape::OneArg),
        ];
        for (ty, shape) in session {
            Self::constructor(ty, shape)?;
        }

        Ok(())
    }

    /// `[CompilerGenerated]`
    ///
    /// # Errors
    /// See [`CustomAttributeFactory::validate`] for the possible failures.
    pub fn compiler_generated(&self) -> Result<CustomAttribute> {
        let ctor = self.well_known_constructor(
            WellKnownType::CompilerGeneratedAttribute,
            ConstructorShape::NoArgs,
        )?;
        let record = CustomAttribute::new(self.import(&ctor)?);
        Ok(Self::built("CompilerGenerated", record))
    }

    /// `[Embedded]`
    ///
    /// # Errors
    /// See [`CustomAttributeFactory::validate`] for the possible failures.
    pub fn embedded(&self) -> Result<CustomAttribute> {
        let ctor = Self::constructor(&self.embedded_attribute, ConstructorShape::NoArgs)?;
        let record = CustomAttribute::new(self.import(&ctor)?);
        Ok(Self::built("Embedded", record))
    }

    /// `[Nullable(value)]`, bound to the `byte` constructor
    ///
    /// # Errors
    /// See [`CustomAttributeFactory::validate`] for the possible failures.
    pub fn nullable(&self, value: u8) -> Result<CustomAttribute> {
        let ctor = Self::constructor(&self.nullable_attribute, ConstructorShape::OneScalarArg)?;
        let mut record = CustomAttribute::new(self.import(&ctor)?);
        record.fixed_args.push(self.byte_arg(value));
        Ok(Self::built("Nullable", record))
    }

    /// `[Nullable(new byte[] { ... })]`, bound to the `byte[]` constructor
    ///
    /// # Errors
    /// See [`CustomAttributeFactory::validate`] for the possible failures.
    pub fn nullable_flags(&self, values: &[u8]) -> Result<CustomAttribute> {
        let ctor = Self::constructor(&self.nullable_attribute, ConstructorShape::OneArrayArg)?;
        let mut record = CustomAttribute::new(self.import(&ctor)?);
        record.fixed_args.push(CustomAttributeTypedArgument {
            arg_type: AttributeArgType::SzArray(Box::new(AttributeArgType::Type(
                self.well_known.byte().clone(),
            ))),
            value: CustomAttributeArgument::Array(
                values
                    .iter()
                    .map(|&flag| CustomAttributeArgument::U1(flag))
                    .collect(),
            ),
        });
        Ok(Self::built("Nullable", record))
    }

    /// `[NullableContext(value)]`
    ///
    /// # Errors
    /// See [`CustomAttributeFactory::validate`] for the possible failures.
    pub fn nullable_context(&self, value: u8) -> Result<CustomAttribute> {
        let ctor = Self::constructor(&self.nullable_context_attribute, ConstructorShape::OneArg)?;
        let mut record = CustomAttribute::new(self.import(&ctor)?);
        record.fixed_args.push(self.byte_arg(value));
        Ok(Self::built("NullableContext", record))
    }

    /// `[NullablePublicOnly(value)]`
    ///
    /// # Errors
    /// See [`CustomAttributeFactory::validate`] for the possible failures.
    pub fn nullable_public_only(&self, value: bool) -> Result<CustomAttribute> {
        let ctor =
            Self::constructor(&self.nullable_public_only_attribute, ConstructorShape::OneArg)?;
        let mut record = CustomAttribute::new(self.import(&ctor)?);
        record.fixed_args.push(self.bool_arg(value));
        Ok(Self::built("NullablePublicOnly", record))
    }

    /// `[AttributeUsage(valid_on, AllowMultiple = ..., Inherited = ...)]`
    ///
    /// A named property is only emitted when its value is `Some`, so `Some(false)` and
    /// `None` produce different records.
    ///
    /// # Errors
    /// See [`CustomAttributeFactory::validate`] for the possible failures.
    pub fn attribute_usage(
        &self,
        valid_on: AttributeTargets,
        allow_multiple: Option<bool>,
        inherited: Option<bool>,
    ) -> Result<CustomAttribute> {
        let ctor = self.well_known_constructor(
            WellKnownType::AttributeUsageAttribute,
            ConstructorShape::OneArg,
        )?;
        let targets = self.well_known.get(WellKnownType::AttributeTargets)?.clone();

        let mut record = CustomAttribute::new(self.import(&ctor)?);
        record.fixed_args.push(CustomAttributeTypedArgument {
            arg_type: AttributeArgType::Type(targets),
            value: CustomAttributeArgument::I4(valid_on.as_i32()),
        });

        for (name, value) in [(ALLOW_MULTIPLE, allow_multiple), (INHERITED, inherited)] {
            if let Some(value) = value {
                record.named_args.push(CustomAttributeNamedArgument {
                    is_field: false,
                    name: name.to_string(),
                    arg: self.bool_arg(value),
                });
            }
        }

        Ok(Self::built("AttributeUsage", record))
    }

    /// `[assembly: ReferenceAssembly]`
    ///
    /// # Errors
    /// See [`CustomAttributeFactory::validate`] for the possible failures.
    pub fn reference_assembly(&self) -> Result<CustomAttribute> {
        let ctor = self.well_known_constructor(
            WellKnownType::ReferenceAssemblyAttribute,
            ConstructorShape::NoArgs,
        )?;
        let record = CustomAttribute::new(self.import(&ctor)?);
        Ok(Self::built("ReferenceAssembly", record))
    }

    fn constructor(ty: &CilTypeRc, shape: ConstructorShape) -> Result<MethodRc> {
        ty.resolve()?.constructor(shape)
    }

    fn well_known_constructor(
        &self,
        kind: WellKnownType,
        shape: ConstructorShape,
    ) -> Result<MethodRc> {
        Self::constructor(self.well_known.get(kind)?, shape)
    }

    fn import(&self, ctor: &MethodRc) -> Result<MethodReference> {
        self.well_known.module().import_reference(ctor)
    }

    fn byte_arg(&self, value: u8) -> CustomAttributeTypedArgument {
        CustomAttributeTypedArgument {
            arg_type: AttributeArgType::Type(self.well_known.byte().clone()),
            value: CustomAttributeArgument::U1(value),
        }
    }

    fn bool_arg(&self, value: bool) -> CustomAttributeTypedArgument {
        CustomAttributeTypedArgument {
            arg_type: AttributeArgType::Type(self.well_known.boolean().clone()),
            value: CustomAttributeArgument::Bool(value),
        }
    }

    fn built(attribute: &'static str, record: CustomAttribute) -> CustomAttribute {
        debug!(
            attribute,
            constructor = %record.constructor.token(),
            imported = record.constructor.is_imported(),
            fixed_args = record.fixed_args.len(),
            named_args = record.named_args.len(),
            "built custom attribute record"
        );
        record
    }
}
