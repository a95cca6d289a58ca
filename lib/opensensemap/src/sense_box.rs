use serde::Deserialize;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SenseBox {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sensors: Vec<Sensor>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Sensor {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub unit: String,
    #[serde(rename = "lastMeasurement", default)]
    pub last_measurement: Option<LastMeasurement>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct LastMeasurement {
    #[serde(default)]
    pub value: Option<String>,
}

impl Sensor {
    /// The last reported value, if the box has reported a non-empty one.
    pub fn last_value(&self) -> Option<&str> {
        let value = self.last_measurement.as_ref()?.value.as_deref()?;

        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }
}
