use async_trait::async_trait;
use reqwest::{Request, Response};

/// Sends a prepared request. Decorators such as [`super::auth::ApiKey`] wrap
/// another client to alter the request before it is sent.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
