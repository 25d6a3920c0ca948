//! Port value storage.
//!
//! A [`Tendril`] is the value slot behind one declared [`Port`]; a cell's
//! inputs and outputs are each held in a [`Tendrils`] set, kept in
//! declaration order.

use crate::error::{PlasmError, Result};
use crate::traits::Port;
use crate::value::{PortValue, Value, ValueType};

/// The value slot behind a single port.
#[derive(Debug, Clone, PartialEq)]
pub struct Tendril {
    name: String,
    value_type: ValueType,
    value: Option<Value>,
    default: Option<Value>,
    required: bool,
    description: String,
}

impl Tendril {
    /// Create a tendril from a port declaration, seeded with the port default.
    ///
    /// Fails with `TypeMismatch` if the default does not fit the declared type.
    pub fn from_port(port: &Port) -> Result<Self> {
        if let Some(default) = &port.default {
            check_type(&port.name, port.value_type, default.value_type())?;
        }
        Ok(Self {
            name: port.name.clone(),
            value_type: port.value_type,
            value: port.default.clone(),
            default: port.default.clone(),
            required: port.required,
            description: port.description.clone(),
        })
    }

    /// Port name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared value type.
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Current value, if set.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Declared default value.
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Whether the port must be fed.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Port description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether the slot currently holds a value.
    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    fn set(&mut self, value: Value) -> Result<()> {
        check_type(&self.name, self.value_type, value.value_type())?;
        self.value = Some(value);
        Ok(())
    }
}

fn check_type(port: &str, expected: ValueType, actual: ValueType) -> Result<()> {
    if expected.is_compatible(actual) {
        Ok(())
    } else {
        Err(PlasmError::TypeMismatch {
            port: port.to_string(),
            expected,
            actual,
        })
    }
}

/// An ordered set of tendrils, one per declared port.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tendrils {
    slots: Vec<Tendril>,
}

impl Tendrils {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from port declarations.
    pub fn from_ports(ports: &[Port]) -> Result<Self> {
        let mut tendrils = Self::new();
        for port in ports {
            tendrils.declare(port)?;
        }
        Ok(tendrils)
    }

    /// Declare a new slot.
    pub fn declare(&mut self, port: &Port) -> Result<()> {
        if self.contains(&port.name) {
            return Err(PlasmError::DuplicatePort {
                port: port.name.clone(),
            });
        }
        self.slots.push(Tendril::from_port(port)?);
        Ok(())
    }

    /// Look up a slot by name.
    pub fn tendril(&self, name: &str) -> Option<&Tendril> {
        self.slots.iter().find(|t| t.name == name)
    }

    fn tendril_mut(&mut self, name: &str) -> Result<&mut Tendril> {
        self.slots
            .iter_mut()
            .find(|t| t.name == name)
            .ok_or_else(|| PlasmError::UndeclaredPort {
                port: name.to_string(),
            })
    }

    /// Whether a slot with this name is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.tendril(name).is_some()
    }

    /// Read a typed value.
    ///
    /// Fails with `MissingInput` if the slot is unset and with `TypeMismatch`
    /// if it holds a value of another type.
    pub fn get<T: PortValue>(&self, name: &str) -> Result<T> {
        let tendril = self.tendril(name).ok_or_else(|| PlasmError::UndeclaredPort {
            port: name.to_string(),
        })?;
        let value = tendril.value.as_ref().ok_or_else(|| PlasmError::MissingInput {
            port: name.to_string(),
        })?;
        T::from_value(value).ok_or_else(|| PlasmError::TypeMismatch {
            port: name.to_string(),
            expected: T::TYPE,
            actual: value.value_type(),
        })
    }

    /// Read the raw value, if the slot exists and is set.
    pub fn get_value(&self, name: &str) -> Option<&Value> {
        self.tendril(name).and_then(Tendril::value)
    }

    /// Write a typed value.
    pub fn set<T: PortValue>(&mut self, name: &str, value: T) -> Result<()> {
        self.set_value(name, value.into_value())
    }

    /// Write a raw value, checking it against the declared type.
    pub fn set_value(&mut self, name: &str, value: Value) -> Result<()> {
        self.tendril_mut(name)?.set(value)
    }

    /// Iterate slots in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Tendril> {
        self.slots.iter()
    }

    /// Slot names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|t| t.name.as_str())
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the set has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
