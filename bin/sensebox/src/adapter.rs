use std::sync::Arc;

use log::{error, info};
use thing::Device;

use crate::{AdapterConfig, BoxDevice, BoxSource, Host, PollHandle};

/// Creates one device per configured box and keeps them polling.
pub struct Adapter {
    config: AdapterConfig,
    source: Arc<dyn BoxSource>,
    host: Arc<dyn Host>,
    devices: Vec<(Device, PollHandle)>,
}

impl Adapter {
    pub fn new(config: AdapterConfig, source: Arc<dyn BoxSource>, host: Arc<dyn Host>) -> Adapter {
        Adapter {
            config,
            source,
            host,
            devices: vec![],
        }
    }

    /// Registers the configured boxes in order. A box that cannot be
    /// initialized or registered is logged and skipped.
    pub async fn create_devices(&mut self) {
        for box_id in &self.config.box_ids {
            info!("creating OpenSenseBox for {box_id}");

            let mut device = BoxDevice::new(
                box_id.as_str(),
                self.config.description.as_str(),
                self.config.profile,
                self.source.clone(),
                self.host.clone(),
            );

            if let Err(err) = device.init().await {
                error!("unable to initialize box {box_id}: {err}");
                continue;
            }

            if let Err(err) = self.host.handle_device_added(device.thing()).await {
                error!("unable to register box {box_id}: {err}");
                continue;
            }

            info!("registered {} as {}", box_id, device.thing().id);

            let description = device.thing().clone();
            let handle = device.start_polling(self.config.poll_interval);

            self.devices.push((description, handle));
        }
    }

    pub fn devices(&self) -> impl Iterator<Item = &Device> {
        self.devices.iter().map(|(device, _)| device)
    }

    /// Stops every polling task and removes the devices from the host.
    pub async fn unload(&mut self) {
        for (device, handle) in self.devices.drain(..) {
            handle.stop().await;

            if let Err(err) = self.host.handle_device_removed(&device).await {
                error!("unable to remove {}: {err}", device.id);
            }
        }
    }
}
