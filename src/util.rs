use std::time::Duration;

use bytes::Bytes;
use http::{Request, StatusCode, Uri};
use http_body_util::BodyExt as _;
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::{Client as HyperClient, connect::HttpConnector};

use crate::prelude::*;


pub type EmptyHttpBody = http_body_util::Empty<&'static [u8]>;

/// HTTP client to send GET requests without body.
pub type SimpleHttpClient<B = EmptyHttpBody> = HyperClient<HttpsConnector<HttpConnector>, B>;

pub fn http_client<B>() -> Result<SimpleHttpClient<B>>
where
    B: Send + hyper::body::Body,
    B::Data: Send,
{
    let https = HttpsConnectorBuilder::new()
        .with_native_roots()
        .context("failed to load native certificate roots")?
        .https_or_http()
        .enable_http1()
        .enable_http2()
        .build();
    let out = HyperClient::builder(hyper_util::rt::TokioExecutor::new()).build(https);
    Ok(out)
}

/// Sends a GET request to `uri` and downloads the whole body, giving up after
/// `timeout`.
pub async fn get(
    client: &SimpleHttpClient,
    uri: Uri,
    timeout: Duration,
) -> Result<(StatusCode, Bytes)> {
    let req = Request::get(uri.clone())
        .body(EmptyHttpBody::new())
        .context("failed to build request")?;

    let fut = async {
        let response = client.request(req).await
            .with_context(|| format!("failed to send request to '{uri}'"))?;
        let status = response.status();
        let body = response.into_body().collect().await
            .context("failed to download HTTP body")?
            .to_bytes();
        Ok::<_, Error>((status, body))
    };

    tokio::time::timeout(timeout, fut).await
        .map_err(|_| anyhow!("timeout after {timeout:.2?} waiting for '{uri}'"))?
}
