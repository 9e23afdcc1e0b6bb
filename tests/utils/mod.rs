use {
    plan_expiry_sweeper::store::appwrite::{UpdateDocumentBody, ACTIVE_ATTRIBUTE, QUERIES_PARAM},
    serde_json::{json, Map, Value},
    std::{
        collections::{BTreeMap, HashSet},
        sync::{Arc, Mutex},
        time::Duration,
    },
    wiremock::{
        matchers::{header, method, path, path_regex},
        Mock, MockServer, Request, Respond, ResponseTemplate,
    },
};

pub const PROJECT_ID: &str = "test-project";
pub const API_KEY: &str = "test-api-key";
pub const DATABASE_ID: &str = "test-db";
pub const COLLECTION_ID: &str = "user-profiles";

pub fn documents_path() -> String {
    format!("/v1/databases/{DATABASE_ID}/collections/{COLLECTION_ID}/documents")
}

#[derive(Default)]
struct FakeProfilesState {
    documents: BTreeMap<String, Map<String, Value>>,
    fail_list_at_offset: Option<usize>,
    fail_updates_for: HashSet<String>,
    list_delay: Option<Duration>,
}

/// In-memory stand-in for an Appwrite profiles collection, served through wiremock.
#[derive(Clone, Default)]
pub struct FakeProfiles {
    state: Arc<Mutex<FakeProfilesState>>,
}

impl FakeProfiles {
    pub async fn mount(&self, server: &MockServer) {
        Mock::given(method("GET"))
            .and(path(documents_path()))
            .and(header("x-appwrite-project", PROJECT_ID))
            .and(header("x-appwrite-key", API_KEY))
            .respond_with(ListDocuments(self.clone()))
            .mount(server)
            .await;

        Mock::given(method("PATCH"))
            .and(path_regex(format!("^{}/[^/]+$", documents_path())))
            .and(header("x-appwrite-project", PROJECT_ID))
            .and(header("x-appwrite-key", API_KEY))
            .respond_with(UpdateDocument(self.clone()))
            .mount(server)
            .await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "message": "The current user is not authorized to perform the requested action.",
                "code": 401,
                "type": "user_unauthorized",
            })))
            .with_priority(10)
            .mount(server)
            .await;
    }

    pub fn insert(&self, document: Value) {
        let Value::Object(document) = document else {
            panic!("documents must be JSON objects");
        };
        let id = document["$id"].as_str().unwrap().to_owned();
        self.state.lock().unwrap().documents.insert(id, document);
    }

    pub fn get(&self, id: &str) -> Value {
        Value::Object(self.state.lock().unwrap().documents[id].clone())
    }

    pub fn all(&self) -> Vec<Value> {
        self.state
            .lock()
            .unwrap()
            .documents
            .values()
            .cloned()
            .map(Value::Object)
            .collect()
    }

    pub fn fail_list_at_offset(&self, offset: usize) {
        self.state.lock().unwrap().fail_list_at_offset = Some(offset);
    }

    pub fn fail_updates_for(&self, id: &str) {
        self.state
            .lock()
            .unwrap()
            .fail_updates_for
            .insert(id.to_owned());
    }

    pub fn delay_lists(&self, delay: Duration) {
        self.state.lock().unwrap().list_delay = Some(delay);
    }
}

struct ListDocuments(FakeProfiles);

impl Respond for ListDocuments {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut active = None;
        let mut limit = 25;
        let mut offset = 0;
        for (key, query) in request.url.query_pairs() {
            assert_eq!(key, QUERIES_PARAM);
            let query = serde_json::from_str::<Value>(&query).unwrap();
            match query["method"].as_str().unwrap() {
                "equal" => {
                    assert_eq!(query["attribute"], ACTIVE_ATTRIBUTE);
                    active = query["values"][0].as_bool();
                }
                "limit" => limit = query["values"][0].as_u64().unwrap() as usize,
                "offset" => offset = query["values"][0].as_u64().unwrap() as usize,
                "orderAsc" => assert_eq!(query["attribute"], "$id"),
                other => panic!("unexpected query method {other}"),
            }
        }

        let state = self.0.state.lock().unwrap();
        if state.fail_list_at_offset == Some(offset) {
            return ResponseTemplate::new(500).set_body_json(json!({
                "message": "Server Error",
                "code": 500,
                "type": "general_unknown",
            }));
        }

        let matching = state
            .documents
            .values()
            .filter(|document| {
                active.map_or(true, |active| {
                    document.get(ACTIVE_ATTRIBUTE) == Some(&Value::Bool(active))
                })
            })
            .collect::<Vec<_>>();
        let page = matching
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect::<Vec<_>>();

        let response = ResponseTemplate::new(200).set_body_json(json!({
            "total": matching.len(),
            "documents": page,
        }));
        match state.list_delay {
            Some(delay) => response.set_delay(delay),
            None => response,
        }
    }
}

struct UpdateDocument(FakeProfiles);

impl Respond for UpdateDocument {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let id = request.url.path_segments().unwrap().last().unwrap().to_owned();
        let body = request
            .body_json::<UpdateDocumentBody<Map<String, Value>>>()
            .unwrap();

        let mut state = self.0.state.lock().unwrap();
        if state.fail_updates_for.contains(&id) {
            return ResponseTemplate::new(409).set_body_json(json!({
                "message": "Document with the requested ID could not be updated.",
                "code": 409,
                "type": "document_update_conflict",
            }));
        }
        let Some(document) = state.documents.get_mut(&id) else {
            return ResponseTemplate::new(404).set_body_json(json!({
                "message": "Document with the requested ID could not be found.",
                "code": 404,
                "type": "document_not_found",
            }));
        };
        document.extend(body.data);
        ResponseTemplate::new(200).set_body_json(Value::Object(document.clone()))
    }
}
