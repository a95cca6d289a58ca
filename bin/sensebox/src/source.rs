use std::time::Duration;

use async_trait::async_trait;
use opensensemap::{Client, SenseBox};
use tokio::time::timeout;

#[cfg(test)]
use mockall::automock;

use crate::{ApiConfig, Result};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait BoxSource: Send + Sync {
    async fn get_box(&self, box_id: &str) -> Result<SenseBox>;
}

pub struct ApiSource {
    client: Client,
    request_timeout: Duration,
}

impl ApiSource {
    pub fn new(config: &ApiConfig) -> Result<ApiSource> {
        Ok(ApiSource {
            client: Client::new(&config.url)?,
            request_timeout: config.request_timeout,
        })
    }
}

#[async_trait]
impl BoxSource for ApiSource {
    async fn get_box(&self, box_id: &str) -> Result<SenseBox> {
        let sense_box = timeout(self.request_timeout, self.client.get_box(box_id)).await??;
        Ok(sense_box)
    }
}
