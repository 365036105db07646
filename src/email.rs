use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{error, info};
use url::Url;

#[derive(Clone, Debug)]
pub struct EmailClient {
    http_client: Client,
    pub(crate) base_url: String,
    sender: String,
    authorization_token: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest {
    pub sender: HashMap<String, String>,
    pub to: Vec<HashMap<String, String>>,
    pub template_id: i32,
    pub params: HashMap<String, String>,
}

impl EmailClient {
    pub fn new(
        base_url: String,
        sender: String,
        authorization_token: String,
    ) -> Result<Self, url::ParseError> {
        Url::parse(&base_url)?;
        Ok(Self {
            http_client: Client::new(),
            base_url,
            sender,
            authorization_token,
        })
    }

    #[tracing::instrument(
        name = "send_email",
        skip(self, params),
        fields(
            recipient = %recipient,
            template_id = template_id
        )
    )]
    pub async fn send_email(
        &self,
        recipient: &str,
        params: HashMap<String, String>,
        template_id: i32,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let url = format!("{}/v3/smtp/email", self.base_url);

        let mut sender = HashMap::new();
        sender.insert("email".to_owned(), self.sender.clone());

        let mut to = HashMap::new();
        to.insert("email".to_owned(), recipient.to_owned());

        let request_body = SendEmailRequest {
            sender,
            to: vec![to],
            template_id,
            params,
        };

        let response = self
            .http_client
            .post(&url)
            .header("api-key", self.authorization_token.to_owned())
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        match response.error_for_status() {
            Ok(response) => {
                info!("email dispatched to provider");
                Ok(response)
            }
            Err(err) => {
                error!("email provider rejected the request: {:?}", err);
                Err(err)
            }
        }
    }
}
