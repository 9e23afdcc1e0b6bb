use {
    super::{error::StoreError, ProfileStore},
    crate::model::types::{Account, FreeTierDowngrade},
    async_trait::async_trait,
    reqwest::{
        header::{self, HeaderMap, HeaderValue},
        Response,
    },
    serde::{Deserialize, Serialize},
    serde_json::{json, Value},
    std::{
        fmt::{self, Display, Formatter},
        time::Duration,
    },
    tracing::{debug, warn},
    url::Url,
};

pub const ACTIVE_ATTRIBUTE: &str = "is_active";
pub const ID_ATTRIBUTE: &str = "$id";
pub const QUERIES_PARAM: &str = "queries[]";

const PROJECT_HEADER: &str = "x-appwrite-project";
const KEY_HEADER: &str = "x-appwrite-key";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A single Appwrite query, sent as its JSON encoding in `queries[]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Query(Value);

impl Query {
    pub fn equal(attribute: &str, value: impl Into<Value>) -> Self {
        let value: Value = value.into();
        Self(json!({ "method": "equal", "attribute": attribute, "values": [value] }))
    }

    pub fn limit(limit: usize) -> Self {
        Self(json!({ "method": "limit", "values": [limit] }))
    }

    pub fn offset(offset: usize) -> Self {
        Self(json!({ "method": "offset", "values": [offset] }))
    }

    pub fn order_asc(attribute: &str) -> Self {
        Self(json!({ "method": "orderAsc", "attribute": attribute }))
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentList<T> {
    pub total: u64,
    pub documents: Vec<T>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateDocumentBody<T> {
    pub data: T,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// REST client for one Appwrite documents collection.
#[derive(Debug, Clone)]
pub struct AppwriteClient {
    documents_endpoint: Url,
    http_client: reqwest::Client,
}

impl AppwriteClient {
    pub fn new(
        endpoint: &Url,
        project_id: &str,
        api_key: &str,
        database_id: &str,
        collection_id: &str,
    ) -> Result<Self, StoreError> {
        let mut documents_endpoint = endpoint.clone();
        documents_endpoint
            .path_segments_mut()
            .map_err(|()| StoreError::EndpointCannotBeABase)?
            .pop_if_empty()
            .extend([
                "databases",
                database_id,
                "collections",
                collection_id,
                "documents",
            ]);

        let mut key_value = HeaderValue::from_str(api_key)?;

        // Make sure we're not leaking the API key in debug output.
        key_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(PROJECT_HEADER, HeaderValue::from_str(project_id)?);
        headers.insert(KEY_HEADER, key_value);
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            documents_endpoint,
            http_client,
        })
    }

    pub fn documents_endpoint(&self) -> &Url {
        &self.documents_endpoint
    }

    fn document_endpoint(&self, id: &str) -> Result<Url, StoreError> {
        let mut url = self.documents_endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| StoreError::EndpointCannotBeABase)?
            .push(id);
        Ok(url)
    }
}

#[async_trait]
impl ProfileStore for AppwriteClient {
    async fn list_active(&self, limit: usize, offset: usize) -> Result<Vec<Account>, StoreError> {
        let queries = [
            Query::equal(ACTIVE_ATTRIBUTE, true),
            Query::limit(limit),
            Query::offset(offset),
            Query::order_asc(ID_ATTRIBUTE),
        ]
        .iter()
        .map(|query| (QUERIES_PARAM, query.to_string()))
        .collect::<Vec<_>>();

        let response = self
            .http_client
            .get(self.documents_endpoint.clone())
            .query(&queries)
            .send()
            .await?;
        let list = error_for_status(response)
            .await?
            .json::<DocumentList<Account>>()
            .await?;
        debug!(
            "Listed {} of {} active documents at offset {offset}",
            list.documents.len(),
            list.total
        );
        Ok(list.documents)
    }

    async fn apply_downgrade(
        &self,
        id: &str,
        downgrade: &FreeTierDowngrade,
    ) -> Result<(), StoreError> {
        let response = self
            .http_client
            .patch(self.document_endpoint(id)?)
            .json(&UpdateDocumentBody { data: downgrade })
            .send()
            .await?;
        error_for_status(response).await?;
        Ok(())
    }
}

async fn error_for_status(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .map(|error| error.message)
        .unwrap_or(body);
    warn!("non-success document store status: {status}, message: {message}");
    Err(StoreError::Api { status, message })
}
