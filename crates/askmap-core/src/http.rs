// crates/askmap-core/src/http.rs
#![cfg(feature = "http")]

use crate::config::AskMapConfig;
use crate::error::Result;
use reqwest::Client;

/// One shared `reqwest::Client` for all three external sources.
pub fn build_client(config: &AskMapConfig) -> Result<Client> {
    let mut builder = Client::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(timeout) = config.request_timeout() {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// GET `url` and return the body, turning non-2xx into an error.
pub(crate) async fn get_text(client: &Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.text().await?)
}
