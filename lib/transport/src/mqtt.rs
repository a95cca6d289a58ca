use std::time::Duration;

use log::debug;
use paho_mqtt::{AsyncClient, ConnectOptionsBuilder, CreateOptionsBuilder, SslOptions};

pub async fn connect_mqtt(
    address: String,
    username: String,
    password: String,
    client_id: &str,
) -> paho_mqtt::Result<AsyncClient> {
    let create_opts = CreateOptionsBuilder::new_v3()
        .server_uri(address)
        .client_id(client_id)
        .finalize();

    let client = AsyncClient::new(create_opts)?;

    let ssl_options = if client.server_uri().starts_with("ssl://") {
        Some(SslOptions::new())
    } else {
        None
    };

    let mut conn_opts = ConnectOptionsBuilder::new_v3();
    conn_opts
        .keep_alive_interval(Duration::from_secs(30))
        .clean_session(false)
        .user_name(username)
        .password(password);

    if let Some(ssl_options) = ssl_options {
        conn_opts.ssl_options(ssl_options);
    }

    client.connect(conn_opts.finalize()).await?;
    debug!("connected to {}", client.server_uri());

    Ok(client)
}
