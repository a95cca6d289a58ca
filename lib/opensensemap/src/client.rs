use std::sync::Arc;

use chipp_http::{HttpClient, NoInterceptor};
use log::trace;

use crate::{Result, SenseBox};

pub const DEFAULT_API_URL: &str = "https://api.opensensemap.org";

#[derive(Clone)]
pub struct Client {
    http_client: Arc<HttpClient<NoInterceptor>>,
}

impl Client {
    pub fn new(api_url: &str) -> Result<Client> {
        let http_client = HttpClient::new(api_url)?;

        Ok(Client {
            http_client: Arc::new(http_client),
        })
    }

    pub async fn get_box(&self, box_id: &str) -> Result<SenseBox> {
        let request = self.http_client.new_request(["boxes", box_id]);

        let body = self
            .http_client
            .perform_request(request, |req, res| {
                if res.status_code == 200 {
                    Ok(res.body)
                } else {
                    Err((req, res).into())
                }
            })
            .await?;

        trace!("box {box_id}: {}", String::from_utf8_lossy(&body));

        let sense_box = serde_json::from_slice(&body)?;
        Ok(sense_box)
    }
}
