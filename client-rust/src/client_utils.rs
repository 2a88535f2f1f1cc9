use crate::{CollectionError, CollectionResult};
use reqwest::{header::HeaderMap, Client, Method, Response};
use serde::{de::DeserializeOwned, Serialize};

/// Create a JSON request, parse the response.
/// Throws error on non 2xx status code.
pub async fn send_json<T: Serialize + ?Sized, R: DeserializeOwned>(
    client: &Client,
    method: Method,
    url: &str,
    data: Option<&T>,
    headers: HeaderMap,
) -> CollectionResult<R> {
    let response = send(client, method, url, data, headers).await?;
    Ok(response.json::<R>().await?)
}

/// Create a request whose response body is not needed.
/// Throws error on non 2xx status code.
pub async fn send_empty(
    client: &Client,
    method: Method,
    url: &str,
    headers: HeaderMap,
) -> CollectionResult<()> {
    send::<()>(client, method, url, None, headers).await?;
    Ok(())
}

async fn send<T: Serialize + ?Sized>(
    client: &Client,
    method: Method,
    url: &str,
    data: Option<&T>,
    headers: HeaderMap,
) -> CollectionResult<Response> {
    let mut request = client.request(method, url).headers(headers);
    if let Some(data) = data {
        request = request.json(data);
    }

    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(CollectionError::StatusCode(
            status,
            response.text().await.unwrap_or_default(),
        ))
    }
}
