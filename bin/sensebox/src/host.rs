use async_trait::async_trait;
use log::{debug, info};
use paho_mqtt::{AsyncClient as MqClient, Message, MessageBuilder, QOS_1};
use thing::{Device, Property};
use transport::Topic;

#[cfg(test)]
use mockall::automock;

use crate::Result;

/// The gateway devices are registered with.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Host: Send + Sync {
    async fn handle_device_added(&self, device: &Device) -> Result<()>;
    async fn notify_property_changed(&self, device_id: &str, property: &Property) -> Result<()>;
    async fn handle_device_removed(&self, device: &Device) -> Result<()>;
}

/// A retained message to publish. An empty payload clears the topic.
#[derive(Debug, PartialEq)]
pub struct Publication {
    pub topic: Topic,
    pub payload: Vec<u8>,
}

impl Publication {
    pub fn device_added(device: &Device) -> Result<Publication> {
        Ok(Publication {
            topic: Topic::Device(device.id.clone()),
            payload: serde_json::to_vec(device)?,
        })
    }

    pub fn property_changed(device_id: &str, property: &Property) -> Result<Publication> {
        Ok(Publication {
            topic: Topic::Property(device_id.to_string(), property.name.clone()),
            payload: serde_json::to_vec(&property.value())?,
        })
    }

    /// Clears every property topic, sorted by name, then the device topic.
    pub fn device_removed(device: &Device) -> Vec<Publication> {
        let mut names = device.properties.keys().collect::<Vec<_>>();
        names.sort();

        names
            .into_iter()
            .map(|name| Publication {
                topic: Topic::Property(device.id.clone(), name.clone()),
                payload: vec![],
            })
            .chain(std::iter::once(Publication {
                topic: Topic::Device(device.id.clone()),
                payload: vec![],
            }))
            .collect()
    }

    pub fn to_message(&self) -> Message {
        MessageBuilder::new()
            .topic(self.topic.to_string())
            .payload(self.payload.as_slice())
            .qos(QOS_1)
            .retained(true)
            .finalize()
    }
}

/// Publishes retained device descriptions and property values to MQTT.
pub struct MqttHost {
    client: MqClient,
}

impl MqttHost {
    pub fn new(client: MqClient) -> MqttHost {
        MqttHost { client }
    }

    async fn publish(&self, publication: Publication) -> Result<()> {
        if !self.client.is_connected() {
            info!("lost mqtt connection, reconnecting");
            self.client.reconnect().await?;
        }

        debug!(
            "publish to {}: {}",
            publication.topic,
            String::from_utf8_lossy(&publication.payload)
        );

        self.client.publish(publication.to_message()).await?;

        Ok(())
    }
}

#[async_trait]
impl Host for MqttHost {
    async fn handle_device_added(&self, device: &Device) -> Result<()> {
        self.publish(Publication::device_added(device)?).await
    }

    async fn notify_property_changed(&self, device_id: &str, property: &Property) -> Result<()> {
        self.publish(Publication::property_changed(device_id, property)?)
            .await
    }

    async fn handle_device_removed(&self, device: &Device) -> Result<()> {
        for publication in Publication::device_removed(device) {
            self.publish(publication).await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::{from_slice, json, Value};
    use thing::{Capability, PropertyDescription, PropertyType, PropertyValue};

    fn device() -> Device {
        let mut device = Device::new("opensensebox-abc123", "Balcony");
        device.add_capability(Capability::TemperatureSensor);

        for (name, title) in [("s2", "Pressure"), ("s1", "Temp")] {
            device.set_property(Property::new(
                name,
                PropertyDescription::number(title).read_only(),
            ));
        }

        device
    }

    #[test]
    fn test_device_added() {
        let publication = Publication::device_added(&device()).unwrap();

        assert_eq!(publication.topic.to_string(), "things/opensensebox-abc123");
        assert_eq!(
            from_slice::<Value>(&publication.payload).unwrap(),
            json!({
                "id": "opensensebox-abc123",
                "@context": "https://iot.mozilla.org/schemas/",
                "@type": ["TemperatureSensor"],
                "name": "Balcony",
                "description": "",
                "properties": {
                    "s1": {
                        "type": "number",
                        "title": "Temp",
                        "readOnly": true
                    },
                    "s2": {
                        "type": "number",
                        "title": "Pressure",
                        "readOnly": true
                    }
                }
            })
        );
    }

    #[test]
    fn test_property_changed() {
        let mut property = Property::new(
            "s1",
            PropertyDescription::number("Temp")
                .with_type(Some(PropertyType::TemperatureProperty))
                .read_only(),
        );
        property.set_cached_value(PropertyValue::Number(21.5));

        let publication = Publication::property_changed("opensensebox-abc123", &property).unwrap();

        assert_eq!(
            publication.topic.to_string(),
            "things/opensensebox-abc123/properties/s1"
        );
        assert_eq!(from_slice::<Value>(&publication.payload).unwrap(), json!(21.5));

        let property = Property::new("s3", PropertyDescription::string("Light"));
        let publication = Publication::property_changed("opensensebox-abc123", &property).unwrap();
        assert_eq!(from_slice::<Value>(&publication.payload).unwrap(), json!(null));
    }

    #[test]
    fn test_device_removed() {
        let publications = Publication::device_removed(&device());

        let topics = publications
            .iter()
            .map(|publication| publication.topic.to_string())
            .collect::<Vec<_>>();

        assert_eq!(
            topics,
            vec![
                "things/opensensebox-abc123/properties/s1",
                "things/opensensebox-abc123/properties/s2",
                "things/opensensebox-abc123",
            ]
        );
        assert!(publications
            .iter()
            .all(|publication| publication.payload.is_empty()));
    }

    #[test]
    fn test_retained_message() {
        let publication = Publication {
            topic: Topic::Property("opensensebox-abc123".to_string(), "s1".to_string()),
            payload: b"21.5".to_vec(),
        };

        let message = publication.to_message();

        assert_eq!(message.topic(), "things/opensensebox-abc123/properties/s1");
        assert_eq!(message.payload(), b"21.5");
        assert_eq!(message.qos(), QOS_1.into());
        assert!(message.retained());
    }
}
