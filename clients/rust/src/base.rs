use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;

pub(crate) struct BaseClient {
    address: String,
    cron_secret: Option<String>,
}

#[derive(Debug)]
pub enum APIError {
    Network,
    MalformedResponse,
    Unauthorized,
    NotFound,
    UnexpectedStatusCode(StatusCode),
}
pub type APIResponse<T> = Result<T, APIError>;

impl BaseClient {
    pub fn new(address: String) -> Self {
        Self {
            address,
            cron_secret: None,
        }
    }

    pub fn set_cron_secret(&mut self, cron_secret: String) {
        self.cron_secret = Some(cron_secret);
    }

    fn get_client(&self, method: Method, path: String) -> RequestBuilder {
        let client = Client::new();
        let url = format!("{}/api/{}", self.address, path);
        let builder = client.request(method, &url);

        match &self.cron_secret {
            Some(secret) if !secret.is_empty() => builder.header("x-cron-secret", secret.clone()),
            _ => builder,
        }
    }

    fn check_status_code(
        &self,
        res: &Response,
        expected_status_code: StatusCode,
    ) -> Result<(), APIError> {
        let status = res.status();
        if status == expected_status_code {
            return Ok(());
        }
        match status {
            StatusCode::UNAUTHORIZED => Err(APIError::Unauthorized),
            StatusCode::NOT_FOUND => Err(APIError::NotFound),
            _ => Err(APIError::UnexpectedStatusCode(status)),
        }
    }

    async fn get_json_response<T: for<'de> Deserialize<'de>>(
        &self,
        res: Response,
    ) -> APIResponse<T> {
        res.json::<T>()
            .await
            .map_err(|_| APIError::MalformedResponse)
    }

    async fn handle_api_response<T: for<'de> Deserialize<'de>>(
        &self,
        res: Response,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        self.check_status_code(&res, expected_status_code)?;
        self.get_json_response(res).await
    }

    pub async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = match self.get_client(Method::GET, path).send().await {
            Ok(res) => res,
            Err(_) => return Err(APIError::Network),
        };
        self.handle_api_response(res, expected_status_code).await
    }
}
