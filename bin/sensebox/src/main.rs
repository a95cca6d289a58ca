use std::sync::Arc;

use sensebox::{Adapter, ApiSource, Config, ErasedError, MqttHost};
use transport::connect_mqtt;

use log::info;
use tokio::signal::unix::{signal, SignalKind};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<(), ErasedError> {
    pretty_env_logger::init_timed();

    info!("sensebox version {VERSION}");

    let config = Config::from_env()?;
    let source = ApiSource::new(&config.api)?;

    let mqtt = config.mqtt;
    let mqtt_client = connect_mqtt(mqtt.address, mqtt.username, mqtt.password, "sensebox").await?;
    info!("connected mqtt");

    let mut adapter = Adapter::new(
        config.adapter,
        Arc::new(source),
        Arc::new(MqttHost::new(mqtt_client)),
    );

    adapter.create_devices().await;
    info!("polling {} boxes", adapter.devices().count());

    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        _ = sigterm.recv() => info!("got SIGTERM, exiting..."),
        _ = tokio::signal::ctrl_c() => info!("got SIGINT, exiting..."),
    };

    adapter.unload().await;

    Ok(())
}
