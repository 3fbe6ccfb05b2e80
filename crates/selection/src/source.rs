use std::path::PathBuf;

use reqwest::Client;
use routine_model::{Catalog, CatalogDocument};

use crate::CatalogError;

/// Where the catalog document is loaded from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CatalogSource {
    /// A JSON file on disk.
    File(PathBuf),
    /// A JSON document served over HTTP.
    Http(String),
}

impl CatalogSource {
    /// Interprets `location` as a URL if it has an HTTP scheme, or as a
    /// file path otherwise.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://")
            || location.starts_with("https://")
        {
            Self::Http(location.to_owned())
        } else {
            Self::File(PathBuf::from(location))
        }
    }

    /// Fetches and decodes the catalog.
    pub async fn load(&self, client: &Client) -> Result<Catalog, CatalogError> {
        let raw = match self {
            Self::File(path) => tokio::fs::read(path).await?,
            Self::Http(url) => client
                .get(url)
                .send()
                .await
                .and_then(reqwest::Response::error_for_status)?
                .bytes()
                .await?
                .to_vec(),
        };
        let doc: CatalogDocument = serde_json::from_slice(&raw)?;
        let catalog = Catalog::new(doc.products)?;
        debug!("loaded {} product(s) from {self:?}", catalog.products().len());
        Ok(catalog)
    }
}
