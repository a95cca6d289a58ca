use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    pub name: String,
    pub description: PropertyDescription,
    value: Option<PropertyValue>,
}

impl Property {
    pub fn new(name: impl Into<String>, description: PropertyDescription) -> Property {
        Property {
            name: name.into(),
            description,
            value: None,
        }
    }

    pub fn value(&self) -> Option<&PropertyValue> {
        self.value.as_ref()
    }

    /// Stores `value` and returns `true` if it differs from the previous one.
    pub fn set_cached_value(&mut self, value: PropertyValue) -> bool {
        if self.value.as_ref() == Some(&value) {
            return false;
        }

        self.value = Some(value);
        true
    }

    /// Puts back a value previously read with [`Property::value`].
    pub fn restore_cached_value(&mut self, value: Option<PropertyValue>) {
        self.value = value;
    }
}

impl Serialize for Property {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.description.serialize(serializer)
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct PropertyDescription {
    #[serde(rename = "@type", skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyType>,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(rename = "readOnly")]
    pub read_only: bool,
}

impl PropertyDescription {
    pub fn number(title: impl Into<String>) -> PropertyDescription {
        PropertyDescription {
            property_type: None,
            value_type: ValueType::Number,
            title: title.into(),
            unit: None,
            read_only: false,
        }
    }

    pub fn string(title: impl Into<String>) -> PropertyDescription {
        PropertyDescription {
            property_type: None,
            value_type: ValueType::String,
            title: title.into(),
            unit: None,
            read_only: false,
        }
    }

    pub fn with_type(self, property_type: Option<PropertyType>) -> PropertyDescription {
        PropertyDescription {
            property_type,
            ..self
        }
    }

    pub fn with_unit(self, unit: impl Into<String>) -> PropertyDescription {
        let unit = unit.into();

        PropertyDescription {
            unit: if unit.is_empty() { None } else { Some(unit) },
            ..self
        }
    }

    pub fn read_only(self) -> PropertyDescription {
        PropertyDescription {
            read_only: true,
            ..self
        }
    }
}

#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum PropertyType {
    TemperatureProperty,
    DensityProperty,
    BarometricPressureProperty,
    VoltageProperty,
}

#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Number,
    String,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum PropertyValue {
    Number(f64),
    String(String),
}
