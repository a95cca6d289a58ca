use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info, trace, warn};
use thing::{Device, Link, Property};
use tokio::task::{self, JoinHandle};
use tokio::time::{interval, MissedTickBehavior};

use crate::mapping::{describe_sensor, parse_value};
use crate::{BoxSource, Host, Profile, Result};

/// One openSenseBox exposed to the gateway.
///
/// The sensor id to property mapping is built once by [`BoxDevice::init`];
/// a sensor id reported twice keeps the last description. Sensors added to
/// the box later are reported as unknown, sensors removed from the box keep
/// their last value.
pub struct BoxDevice {
    box_id: String,
    profile: Profile,
    device: Device,
    source: Arc<dyn BoxSource>,
    host: Arc<dyn Host>,
}

/// What a single poll did with the reported sensors.
#[derive(Debug, Default, PartialEq)]
pub struct PollReport {
    pub updated: Vec<String>,
    pub unchanged: Vec<String>,
    pub skipped: Vec<String>,
    pub unknown: Vec<String>,
    pub failed: Vec<String>,
}

impl BoxDevice {
    pub fn new(
        box_id: impl Into<String>,
        description: impl Into<String>,
        profile: Profile,
        source: Arc<dyn BoxSource>,
        host: Arc<dyn Host>,
    ) -> BoxDevice {
        let box_id = box_id.into();

        let mut device = Device::new(
            format!("opensensebox-{box_id}"),
            format!("OpenSenseBox ({box_id})"),
        );
        device.description = description.into();
        device.links = vec![Link::alternate_html(format!(
            "https://opensensemap.org/explore/{box_id}"
        ))];

        BoxDevice {
            box_id,
            profile,
            device,
            source,
            host,
        }
    }

    pub fn box_id(&self) -> &str {
        &self.box_id
    }

    pub fn thing(&self) -> &Device {
        &self.device
    }

    pub async fn init(&mut self) -> Result<()> {
        let sense_box = self.source.get_box(&self.box_id).await?;

        for sensor in &sense_box.sensors {
            let (description, capability) = describe_sensor(sensor, self.profile);

            if self
                .device
                .set_property(Property::new(&sensor.id, description))
                .is_some()
            {
                warn!("box {} reports sensor {} twice", self.box_id, sensor.id);
            }

            if let Some(capability) = capability {
                self.device.add_capability(capability);
            }
        }

        self.device.name = sense_box.name;

        debug!(
            "box {} has {} properties, capabilities {:?}",
            self.box_id,
            self.device.properties.len(),
            self.device.capabilities
        );

        Ok(())
    }

    pub async fn poll(&mut self) -> Result<PollReport> {
        let sense_box = self.source.get_box(&self.box_id).await?;
        let mut report = PollReport::default();

        for sensor in &sense_box.sensors {
            let property = match self.device.properties.get_mut(&sensor.id) {
                Some(property) => property,
                None => {
                    warn!("could not find property for sensor {}", sensor.id);
                    report.unknown.push(sensor.id.clone());
                    continue;
                }
            };

            let value = match sensor.last_value() {
                Some(value) => value,
                None => {
                    report.skipped.push(sensor.id.clone());
                    continue;
                }
            };

            let value = match parse_value(&sensor.id, value, self.profile) {
                Some(value) => value,
                None => {
                    report.skipped.push(sensor.id.clone());
                    continue;
                }
            };

            let previous = property.value().cloned();

            if !property.set_cached_value(value) {
                report.unchanged.push(sensor.id.clone());
                continue;
            }

            trace!("{} changed to {:?}", property.name, property.value());

            match self
                .host
                .notify_property_changed(&self.device.id, property)
                .await
            {
                Ok(()) => report.updated.push(sensor.id.clone()),
                Err(err) => {
                    error!("unable to notify {} of {}: {err}", self.device.id, sensor.id);
                    property.restore_cached_value(previous);
                    report.failed.push(sensor.id.clone());
                }
            }
        }

        Ok(report)
    }

    /// Polls the box every `period`, starting immediately.
    pub fn start_polling(mut self, period: Duration) -> PollHandle {
        let device_id = self.device.id.clone();

        let handle = task::spawn(async move {
            let mut timer = interval(period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                timer.tick().await;

                match self.poll().await {
                    Ok(report) => debug!(
                        "polled box {}: {} updated, {} unchanged, {} skipped, {} unknown, {} failed",
                        self.box_id,
                        report.updated.len(),
                        report.unchanged.len(),
                        report.skipped.len(),
                        report.unknown.len(),
                        report.failed.len()
                    ),
                    Err(err) => error!("unable to poll box {}: {err}", self.box_id),
                }
            }
        });

        info!("started polling {device_id} every {}s", period.as_secs());

        PollHandle { device_id, handle }
    }
}

/// Owns the polling task of one device.
pub struct PollHandle {
    device_id: String,
    handle: JoinHandle<()>,
}

impl PollHandle {
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Cancels the polling task and waits until it is gone, so nothing is
    /// published for the device afterwards.
    pub async fn stop(self) {
        self.handle.abort();

        match self.handle.await {
            Err(err) if !err.is_cancelled() => {
                error!("polling {} ended abnormally: {err}", self.device_id)
            }
            _ => info!("stopped polling {}", self.device_id),
        }
    }
}
