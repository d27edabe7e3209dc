use board::{DashboardConfig, FetchError, Gateway, Method};
use serde_json::Value;
use tracing::debug;

/// [`Gateway`] over HTTP.
///
/// On wasm the browser's cookie jar is used (`credentials: include`), which is
/// how the session cookie reaches the backend.
#[derive(Clone, Debug)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(config.gateway.base_url.as_str())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

/// Turn a status and raw body into the gateway's answer.
pub(crate) fn decode_body(status: u16, text: &str) -> Result<Value, FetchError> {
    if !(200..300).contains(&status) {
        return Err(FetchError::from_response(status, text));
    }
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| FetchError::Decode(e.to_string()))
}

impl Gateway for HttpGateway {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, FetchError> {
        let url = self.url(path);
        debug!(%method, %url, "gateway request");

        let mut request = self.client.request(to_reqwest(method), &url);
        #[cfg(target_arch = "wasm32")]
        {
            request = request.fetch_credentials_include();
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        decode_body(status, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_url_joining() {
        let gateway = HttpGateway::new("http://localhost:8000/");
        assert_eq!(gateway.base_url(), "http://localhost:8000");
        assert_eq!(
            gateway.url("/api/admin/users"),
            "http://localhost:8000/api/admin/users"
        );

        let config = DashboardConfig::default().with_base_url("https://clinic.example");
        let gateway = HttpGateway::from_config(&config);
        assert_eq!(gateway.url("api/auth/me"), "https://clinic.example/api/auth/me");
    }

    #[test]
    fn test_decode_success_bodies() {
        assert_eq!(decode_body(200, r#"[{"user_id": 1}]"#).unwrap(), json!([{"user_id": 1}]));
        assert_eq!(decode_body(204, "").unwrap(), Value::Null);
        assert!(matches!(decode_body(200, "<html>"), Err(FetchError::Decode(_))));
    }

    #[test]
    fn test_decode_error_bodies() {
        let err = decode_body(404, r#"{"detail": "User not found"}"#).unwrap_err();
        assert_eq!(
            err,
            FetchError::Server {
                status: 404,
                message: "User not found".into()
            }
        );
        let err = decode_body(401, "").unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_a_network_error() {
        let gateway = HttpGateway::new("http://127.0.0.1:9");
        let err = gateway
            .request(Method::Get, "/api/auth/me", None)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
        assert!(err.to_string().starts_with("Cannot load data"));
    }
}
