use std::fmt;

const PREFIX: &str = "things";

#[derive(Debug, PartialEq)]
pub enum Topic {
    Device(String),
    Property(String, String),
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Topic::Device(device_id) => write!(f, "{PREFIX}/{device_id}"),
            Topic::Property(device_id, property) => {
                write!(f, "{PREFIX}/{device_id}/properties/{property}")
            }
        }
    }
}
