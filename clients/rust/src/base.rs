use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};

pub(crate) struct BaseClient {
    client: Client,
    address: String,
    api_token: Option<String>,
}

#[derive(Debug)]
pub enum APIError {
    Network,
    MalformedResponse,
    UnexpectedStatusCode(StatusCode),
}

impl APIError {
    /// Status code of the response when the server answered
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::UnexpectedStatusCode(status) => Some(*status),
            _ => None,
        }
    }
}

pub type APIResponse<T> = Result<T, APIError>;

impl BaseClient {
    pub fn new(address: String) -> Self {
        Self {
            client: Client::new(),
            address: address.trim_end_matches('/').to_string(),
            api_token: None,
        }
    }

    pub fn set_api_token(&mut self, api_token: String) {
        if !api_token.is_empty() {
            self.api_token = Some(api_token);
        }
    }

    /// `path` is relative to `/api` unless `root` is set
    fn get_client(&self, method: Method, path: &str, root: bool) -> RequestBuilder {
        let url = if root {
            format!("{}/{}", self.address, path)
        } else {
            format!("{}/api/{}", self.address, path)
        };
        let builder = self.client.request(method, &url);

        if let Some(api_token) = &self.api_token {
            builder.header("Authorization", format!("Token {}", api_token))
        } else {
            builder
        }
    }

    async fn send(
        &self,
        builder: RequestBuilder,
        expected_status_code: StatusCode,
    ) -> APIResponse<Response> {
        let res = builder.send().await.map_err(|_| APIError::Network)?;
        let status = res.status();
        if status != expected_status_code {
            return Err(APIError::UnexpectedStatusCode(status));
        }
        Ok(res)
    }

    async fn handle_api_response<T: for<'de> Deserialize<'de>>(
        &self,
        builder: RequestBuilder,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        self.send(builder, expected_status_code)
            .await?
            .json::<T>()
            .await
            .map_err(|_| APIError::MalformedResponse)
    }

    pub async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let builder = self.get_client(Method::GET, &path, false);
        self.handle_api_response(builder, expected_status_code).await
    }

    pub async fn get_with_query<T: for<'de> Deserialize<'de>, Q: Serialize>(
        &self,
        path: String,
        query: &Q,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let builder = self.get_client(Method::GET, &path, false).query(query);
        self.handle_api_response(builder, expected_status_code).await
    }

    /// Routes served outside of `/api`
    pub async fn get_root<T: for<'de> Deserialize<'de>>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let builder = self.get_client(Method::GET, &path, true);
        self.handle_api_response(builder, expected_status_code).await
    }

    pub async fn get_text(&self, path: String, expected_status_code: StatusCode) -> APIResponse<String> {
        let builder = self.get_client(Method::GET, &path, false);
        self.send(builder, expected_status_code)
            .await?
            .text()
            .await
            .map_err(|_| APIError::MalformedResponse)
    }

    pub async fn delete<T: for<'de> Deserialize<'de>>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let builder = self.get_client(Method::DELETE, &path, false);
        self.handle_api_response(builder, expected_status_code).await
    }

    pub async fn put<T: for<'de> Deserialize<'de>, S: Serialize>(
        &self,
        body: S,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let builder = self.get_client(Method::PUT, &path, false).json(&body);
        self.handle_api_response(builder, expected_status_code).await
    }

    pub async fn post<T: for<'de> Deserialize<'de>, S: Serialize>(
        &self,
        body: S,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let builder = self.get_client(Method::POST, &path, false).json(&body);
        self.handle_api_response(builder, expected_status_code).await
    }
}
