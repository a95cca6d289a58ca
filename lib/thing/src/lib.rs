mod device;
mod property;

pub use device::{Capability, Device, Link, CONTEXT};
pub use property::{Property, PropertyDescription, PropertyType, PropertyValue, ValueType};
