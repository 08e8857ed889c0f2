//! `HttpTransport` over gloo-net's `fetch` wrapper.

use async_trait::async_trait;
use common::client::{HttpRequest, HttpResponse, HttpTransport, Method, TransportError};
use gloo_net::http::Request;

pub struct GlooTransport;

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Delete => Request::delete(&request.url),
        }
        .query(request.query.iter().map(|(key, value)| (key.as_str(), value.as_str())));

        let prepared = match request.body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(body),
            None => builder.build(),
        }
        .map_err(|err| TransportError::Build(err.to_string()))?;

        let response = prepared
            .send()
            .await
            .map_err(|err| TransportError::Network(err.to_string()))?;

        let status = response.status();
        let content_type = response.headers().get("content-type");
        let body = response
            .text()
            .await
            .map_err(|err| TransportError::Network(err.to_string()))?;

        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }
}
