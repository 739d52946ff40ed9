//! # Remote Catalog
//!
//! HTTP client for the remote product collection.
//!
//! ## Endpoints
//! ```text
//! GET    {base}/products        → [Product]
//! POST   {base}/products        → Product   (body: Product with provisional id)
//! PUT    {base}/products/{id}   → Product   (body: Product)
//! DELETE {base}/products/{id}   → (ignored)
//! ```
//!
//! Any non-2xx status is a failure. In offline mode every call returns
//! [`SyncError::RemoteDisabled`] without touching the network.

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use vitrina_core::{Product, ProductId};

use crate::config::{AppConfig, RemoteMode};
use crate::error::{SyncError, SyncResult};

/// HTTP client for the remote `/products` collection.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct RemoteCatalog {
    http: Client,
    collection: Url,
    mode: RemoteMode,
}

impl RemoteCatalog {
    /// Builds a client from configuration.
    pub fn new(config: &AppConfig) -> SyncResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let http = builder
            .build()
            .map_err(|e| SyncError::InvalidConfig(format!("HTTP client: {}", e)))?;

        Ok(RemoteCatalog {
            http,
            collection: config.collection_url()?,
            mode: config.mode(),
        })
    }

    /// Returns the collection URL.
    pub fn collection_url(&self) -> &Url {
        &self.collection
    }

    pub fn is_enabled(&self) -> bool {
        self.mode.is_enabled()
    }

    /// Fetches the full collection.
    pub async fn fetch_all(&self) -> SyncResult<Vec<Product>> {
        self.ensure_enabled()?;
        debug!(url = %self.collection, "GET products");

        let res = self.http.get(self.collection.clone()).send().await?;
        decode(check(res).await?).await
    }

    /// Creates a product and returns the record the server stored.
    pub async fn create(&self, product: &Product) -> SyncResult<Product> {
        self.ensure_enabled()?;
        debug!(url = %self.collection, id = product.id, "POST product");

        let res = self
            .http
            .post(self.collection.clone())
            .json(product)
            .send()
            .await?;
        decode(check(res).await?).await
    }

    /// Replaces the product with `id`.
    pub async fn update(&self, id: ProductId, product: &Product) -> SyncResult<Product> {
        self.ensure_enabled()?;
        let url = self.item_url(id)?;
        debug!(url = %url, "PUT product");

        let res = self.http.put(url).json(product).send().await?;
        decode(check(res).await?).await
    }

    /// Deletes the product with `id`.
    pub async fn delete(&self, id: ProductId) -> SyncResult<()> {
        self.ensure_enabled()?;
        let url = self.item_url(id)?;
        debug!(url = %url, "DELETE product");

        let res = self.http.delete(url).send().await?;
        check(res).await?;
        Ok(())
    }

    fn ensure_enabled(&self) -> SyncResult<()> {
        if self.mode.is_enabled() {
            Ok(())
        } else {
            Err(SyncError::RemoteDisabled)
        }
    }

    fn item_url(&self, id: ProductId) -> SyncResult<Url> {
        let mut url = self.collection.clone();
        url.path_segments_mut()
            .map_err(|_| SyncError::InvalidUrl(self.collection.to_string()))?
            .pop_if_empty()
            .push(&id.to_string());
        Ok(url)
    }
}

/// Turns non-2xx responses into [`SyncError::HttpStatus`].
async fn check(res: Response) -> SyncResult<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    Err(SyncError::HttpStatus {
        status: status.as_u16(),
        message: res.text().await.unwrap_or_default(),
    })
}

async fn decode<T: DeserializeOwned>(res: Response) -> SyncResult<T> {
    res.json()
        .await
        .map_err(|e| SyncError::InvalidResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn catalog_for(server: &MockServer) -> RemoteCatalog {
        let mut config = AppConfig::default();
        config.remote.base_url = server.uri();
        RemoteCatalog::new(&config).unwrap()
    }

    fn mouse(id: ProductId) -> Product {
        Product {
            id,
            name: "Mouse".into(),
            price: 25.0,
            description: "Sin descripción".into(),
        }
    }

    #[tokio::test]
    async fn test_fetch_all() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "name": "Mouse", "price": 25.0, "description": "Sin descripción"},
                {"id": 2, "name": "Teclado", "price": 40.5}
            ])))
            .mount(&server)
            .await;

        let products = catalog_for(&server).fetch_all().await.unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0], mouse(1));
        assert_eq!(products[1].description, "Sin descripción");
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let err = catalog_for(&server).fetch_all().await.unwrap_err();

        assert!(matches!(
            err,
            SyncError::HttpStatus { status: 503, ref message } if message == "maintenance"
        ));
        assert!(err.is_remote_failure());
    }

    #[tokio::test]
    async fn test_garbage_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = catalog_for(&server).fetch_all().await.unwrap_err();
        assert!(matches!(err, SyncError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_create_posts_product_and_returns_server_record() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/products"))
            .and(body_json(json!({
                "id": 1700, "name": "Mouse", "price": 25.0, "description": "Sin descripción"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 5, "name": "Mouse", "price": 25.0, "description": "Sin descripción"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let saved = catalog_for(&server).create(&mouse(1700)).await.unwrap();
        assert_eq!(saved, mouse(5));
    }

    #[tokio::test]
    async fn test_update_and_delete_target_item_url() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/products/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 7, "name": "Mouse", "price": 25.0, "description": "Sin descripción"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/products/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let catalog = catalog_for(&server);
        assert_eq!(catalog.update(7, &mouse(7)).await.unwrap(), mouse(7));
        catalog.delete(7).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_missing_is_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/products/8"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = catalog_for(&server).delete(8).await.unwrap_err();
        assert!(matches!(err, SyncError::HttpStatus { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_offline_mode_skips_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let mut config = AppConfig::default();
        config.remote.base_url = server.uri();
        config.remote.mode = RemoteMode::Offline;
        let catalog = RemoteCatalog::new(&config).unwrap();

        assert!(!catalog.is_enabled());
        assert!(matches!(
            catalog.fetch_all().await,
            Err(SyncError::RemoteDisabled)
        ));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let addr = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let mut config = AppConfig::default();
        config.remote.base_url = format!("http://{}", addr);
        let catalog = RemoteCatalog::new(&config).unwrap();

        let err = catalog.fetch_all().await.unwrap_err();
        assert!(matches!(err, SyncError::Network(_)));
    }

    #[test]
    fn test_item_url() {
        let catalog = RemoteCatalog::new(&AppConfig::default()).unwrap();
        assert_eq!(
            catalog.item_url(42).unwrap().as_str(),
            "http://localhost:3000/products/42"
        );
    }
}
