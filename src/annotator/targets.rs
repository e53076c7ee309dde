use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// Program elements an attribute may be applied to (`System.AttributeTargets`)
    pub struct AttributeTargets: u32 {
        /// Assembly
        const ASSEMBLY = 0x0001;
        /// Module
        const MODULE = 0x0002;
        /// Class
        const CLASS = 0x0004;
        /// Struct (value type)
        const STRUCT = 0x0008;
        /// Enumeration
        const ENUM = 0x0010;
        /// Constructor
        const CONSTRUCTOR = 0x0020;
        /// Method
        const METHOD = 0x0040;
        /// Property
        const PROPERTY = 0x0080;
        /// Field
        const FIELD = 0x0100;
        /// Event
        const EVENT = 0x0200;
        /// Interface
        const INTERFACE = 0x0400;
        /// Parameter
        const PARAMETER = 0x0800;
        /// Delegate
        const DELEGATE = 0x1000;
        /// Return value
        const RETURN_VALUE = 0x2000;
        /// Generic parameter
        const GENERIC_PARAMETER = 0x4000;
        /// Any element
        const ALL = 0x7FFF;
    }
}

impl AttributeTargets {
    /// The value as the underlying `int` of the enum, as stored in attribute blobs
    #[must_use]
    pub fn as_i32(self) -> i32 {
        // ALL is 0x7FFF, every valid combination fits
        self.bits() as i32
    }
}
