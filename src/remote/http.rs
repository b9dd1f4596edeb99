//! HTTP client for the movie catalog and random-user APIs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::{Map, Value};
use url::Url;

use crate::config::Config;
use crate::entity::{Entity, EntityId};
use crate::error::{BoardError, Result};
use crate::normalize::normalize_record;
use crate::types::Resource;

use super::CollectionClient;
use super::error::ApiError;

/// reqwest-backed collection client.
///
/// Movies live under `{movies_url}/movies`; users come from
/// `{users_url}?results=N`. The random-user API is read-only, so writes to the
/// users collection fail with `BoardError::ReadOnly`.
pub struct HttpCollectionClient {
    client: Client,
    movies_url: Url,
    users_url: Url,
    user_count: usize,
}

impl HttpCollectionClient {
    /// Create a client from configuration.
    ///
    /// Configures the HTTP client with the configured total timeout and a
    /// connect timeout of at most 10 seconds.
    pub fn from_config(config: &Config) -> Result<Self> {
        let timeout = Duration::from_secs(config.request_timeout);
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .user_agent(concat!("finboard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            movies_url: parse_base(&config.endpoint(Resource::Movies))?,
            users_url: parse_base(&config.endpoint(Resource::Users))?,
            user_count: config.user_count,
        })
    }

    /// Collection URL for a resource
    fn collection_url(&self, resource: Resource) -> Result<Url> {
        match resource {
            Resource::Movies => join_segments(&self.movies_url, &["movies"]),
            Resource::Users => {
                let mut url = self.users_url.clone();
                url.query_pairs_mut()
                    .append_pair("results", &self.user_count.to_string());
                Ok(url)
            }
        }
    }

    fn item_url(&self, resource: Resource, id: &EntityId) -> Result<Url> {
        match resource {
            Resource::Movies => join_segments(&self.movies_url, &["movies", id.as_str()]),
            Resource::Users => Err(BoardError::ReadOnly(resource)),
        }
    }

    fn ensure_writable(resource: Resource) -> Result<()> {
        match resource {
            Resource::Movies => Ok(()),
            Resource::Users => Err(BoardError::ReadOnly(resource)),
        }
    }
}

#[async_trait]
impl CollectionClient for HttpCollectionClient {
    async fn fetch_all(&self, resource: Resource) -> Result<Value> {
        let url = self.collection_url(resource)?;
        tracing::debug!(%resource, %url, "fetching collection");

        let response = self.client.get(url).send().await?;
        let body = read_json(resource, response).await?;
        Ok(body)
    }

    async fn create(&self, resource: Resource, fields: &Map<String, Value>) -> Result<Entity> {
        Self::ensure_writable(resource)?;
        let url = self.collection_url(resource)?;
        tracing::debug!(%resource, %url, "creating record");

        let response = self.client.post(url).json(fields).send().await?;
        let body = read_json(resource, response).await?;
        record_from_response(resource, body, None)
    }

    async fn update(
        &self,
        resource: Resource,
        id: &EntityId,
        fields: &Map<String, Value>,
    ) -> Result<Entity> {
        let url = self.item_url(resource, id)?;
        tracing::debug!(%resource, %id, "updating record");

        let response = self.client.put(url).json(fields).send().await?;
        let body = read_json(resource, response).await.map_err(|e| not_found(e, id))?;
        record_from_response(resource, body, Some(id))
    }

    async fn remove(&self, resource: Resource, id: &EntityId) -> Result<()> {
        let url = self.item_url(resource, id)?;
        tracing::debug!(%resource, %id, "deleting record");

        let response = self.client.delete(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = ApiError::from_body(status, &body, resource.name());
            if err.is_not_found() {
                return Err(BoardError::NotFound(id.to_string()));
            }
            return Err(err.into());
        }
        Ok(())
    }
}

fn parse_base(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| BoardError::Config(format!("invalid endpoint '{raw}': {e}")))
}

/// Append path segments to a base URL, tolerating a trailing slash on the base
fn join_segments(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| BoardError::Config(format!("endpoint '{base}' cannot be a base URL")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

async fn read_json(resource: Resource, response: Response) -> Result<Value> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::from_body(status, &body, resource.name()).into());
    }

    // An empty 2xx body (204 or a bare 200) reads as null rather than a parse error
    let bytes = response.bytes().await?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(&bytes)?)
}

fn not_found(err: BoardError, id: &EntityId) -> BoardError {
    match err {
        BoardError::Response { status: 404, .. } => BoardError::NotFound(id.to_string()),
        other => other,
    }
}

/// Turn a create/update response into an entity. Accepts the record itself or
/// a `{data: record}` wrapper.
fn record_from_response(
    resource: Resource,
    body: Value,
    known_id: Option<&EntityId>,
) -> Result<Entity> {
    let record = match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Object(inner)) => inner,
            Some(other) => {
                map.insert("data".to_string(), other);
                map
            }
            None => map,
        },
        other => {
            return Err(BoardError::Response {
                status: 200,
                reason: format!("{resource} API returned a non-object record: {other}"),
            });
        }
    };

    let mut entity = normalize_record(record, resource, 0);
    if let Some(id) = known_id
        && entity
            .fields()
            .get(resource.identity_field())
            .is_none_or(|v| EntityId::from_value(v).is_none())
    {
        entity = Entity::new(resource, id.clone(), entity.into_fields());
    }
    Ok(entity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client_with(movies: &str, users: &str) -> HttpCollectionClient {
        let mut config = Config::default();
        config.endpoints.movies = movies.to_string();
        config.endpoints.users = users.to_string();
        config.user_count = 25;
        config.request_timeout = 2;
        HttpCollectionClient::from_config(&config).unwrap()
    }

    #[test]
    fn test_collection_urls() {
        let client = client_with("https://mflix.example.com/api/", "https://randomuser.me/api/");
        assert_eq!(
            client.collection_url(Resource::Movies).unwrap().as_str(),
            "https://mflix.example.com/api/movies"
        );
        assert_eq!(
            client.collection_url(Resource::Users).unwrap().as_str(),
            "https://randomuser.me/api/?results=25"
        );
    }

    #[test]
    fn test_item_url_escapes_id() {
        let client = client_with("https://mflix.example.com", "https://randomuser.me/api/");
        let url = client
            .item_url(Resource::Movies, &EntityId::new("a b/c"))
            .unwrap();
        assert_eq!(url.as_str(), "https://mflix.example.com/movies/a%20b%2Fc");
    }

    #[test]
    fn test_users_are_read_only() {
        let client = client_with("https://mflix.example.com", "https://randomuser.me/api/");
        assert!(matches!(
            client.item_url(Resource::Users, &EntityId::new("#USR1000")),
            Err(BoardError::ReadOnly(Resource::Users))
        ));
    }

    #[test]
    fn test_record_from_response_unwraps_data() {
        let entity = record_from_response(
            Resource::Movies,
            json!({"data": {"_id": "abc", "title": "Heat"}}),
            None,
        )
        .unwrap();
        assert_eq!(entity.id().as_str(), "abc");
        assert_eq!(entity.str_field("title"), Some("Heat"));
    }

    #[test]
    fn test_record_from_response_keeps_known_id() {
        let id = EntityId::new("abc");
        let entity =
            record_from_response(Resource::Movies, json!({"title": "Heat"}), Some(&id)).unwrap();
        assert_eq!(entity.id(), &id);
    }

    #[test]
    fn test_record_from_response_rejects_non_object() {
        assert!(record_from_response(Resource::Movies, json!([1, 2]), None).is_err());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_failure() {
        // Port 9 (discard) on localhost is not expected to accept HTTP
        let client = client_with("http://127.0.0.1:9", "http://127.0.0.1:9/api/");
        let err = client.fetch_all(Resource::Movies).await.unwrap_err();
        assert!(
            matches!(err, BoardError::Network(_)),
            "expected network failure, got {err:?}"
        );
        assert!(!err.reason().is_empty());
    }

    #[tokio::test]
    async fn test_user_writes_fail_without_network() {
        let client = client_with("http://127.0.0.1:9", "http://127.0.0.1:9/api/");
        let err = client
            .create(Resource::Users, &Map::new())
            .await
            .unwrap_err();
        assert!(matches!(err, BoardError::ReadOnly(Resource::Users)));
    }
}
