use async_trait::async_trait;
use reqwest::{Request, Response};

/// Seam for issuing HTTP requests, so payload loading can be swapped out.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
