use crate::error::RemoteError;
use futures_util::future::LocalBoxFuture;
use once_cell::sync::Lazy;
use std::rc::Rc;

static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// One outbound request against the player server, path relative to its root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub path: String,
}

impl Request {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
        }
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
        }
    }
}

/// Hands a task to the single-threaded UI executor.
pub type Spawner = Rc<dyn Fn(LocalBoxFuture<'static, ()>)>;

/// Issues requests to the player server.
///
/// The returned future resolves to the response body on a success status.
pub trait Transport {
    fn execute(&self, request: Request) -> LocalBoxFuture<'static, Result<String, RemoteError>>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: Rc<str>,
}

impl HttpTransport {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            base_url: Rc::from(base_url.as_ref().trim_end_matches('/')),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: Request) -> LocalBoxFuture<'static, Result<String, RemoteError>> {
        let url = self.url(&request.path);
        let builder = match request.method {
            Method::Get => HTTP_CLIENT.get(&url),
            Method::Post => HTTP_CLIENT.post(&url),
        };
        Box::pin(async move {
            let response = builder
                .send()
                .await
                .map_err(|e| RemoteError::Transport(e.to_string()))?;
            let status = response.status();
            if !status.is_success() {
                return Err(RemoteError::Status(status.as_u16()));
            }
            response
                .text()
                .await
                .map_err(|e| RemoteError::Transport(e.to_string()))
        })
    }
}
