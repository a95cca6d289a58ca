use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Property;

pub const CONTEXT: &str = "https://iot.mozilla.org/schemas/";

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Device {
    pub id: String,

    #[serde(rename = "@context")]
    pub context: String,

    #[serde(rename = "@type")]
    pub capabilities: Vec<Capability>,

    pub name: String,
    pub description: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,

    pub properties: HashMap<String, Property>,
}

impl Device {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Device {
        Device {
            id: id.into(),
            context: CONTEXT.to_string(),
            capabilities: vec![],
            name: name.into(),
            description: String::new(),
            links: vec![],
            properties: HashMap::new(),
        }
    }

    /// Registers `property`, replacing and returning any property with the
    /// same name.
    pub fn set_property(&mut self, property: Property) -> Option<Property> {
        self.properties.insert(property.name.clone(), property)
    }

    pub fn add_capability(&mut self, capability: Capability) {
        if !self.capabilities.contains(&capability) {
            self.capabilities.push(capability);
        }
    }
}

#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum Capability {
    TemperatureSensor,
    BarometricPressureSensor,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Link {
    pub rel: String,
    #[serde(rename = "mediaType")]
    pub media_type: String,
    pub href: String,
}

impl Link {
    pub fn alternate_html(href: impl Into<String>) -> Link {
        Link {
            rel: "alternate".to_string(),
            media_type: "text/html".to_string(),
            href: href.into(),
        }
    }
}
