use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::{error::Error, sync::Arc};
use tokio::{
    net::TcpListener,
    sync::{oneshot, Mutex},
};

pub type BoxedError = Box<dyn Error + Send + Sync>;

/// One request as the stub saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
    pub headers: HeaderMap,
}

#[derive(Default)]
struct SharedState {
    documents: Vec<Value>,
    next_id: u64,
    broken: bool,
    requests: Vec<RecordedRequest>,
}

type Shared = Arc<Mutex<SharedState>>;

/// A json-server look-alike serving one resource from memory.
pub struct StubServer {
    url: String,
    state: Shared,
    shutdown: Option<oneshot::Sender<()>>,
    handle: tokio::task::JoinHandle<()>,
}

impl StubServer {
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Answer every request with a 500 while broken.
    pub async fn set_broken(&self, broken: bool) {
        self.state.lock().await.broken = broken;
    }

    pub async fn documents(&self) -> Vec<Value> {
        self.state.lock().await.documents.clone()
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().await.requests.clone()
    }

    pub async fn stop(self) -> Result<(), BoxedError> {
        if let Some(tx) = self.shutdown {
            let _ = tx.send(());
        }

        self.handle
            .await
            .map_err(|err| format!("Failed to join stub server task: {err}"))?;
        Ok(())
    }
}

fn id_key(value: &Value) -> String {
    match value {
        Value::String(id) => id.clone(),
        other => other.to_string(),
    }
}

async fn record(
    state: &Shared,
    method: &'static str,
    path: String,
    body: Option<Value>,
    headers: HeaderMap,
) -> Result<(), StatusCode> {
    let mut state = state.lock().await;
    state.requests.push(RecordedRequest {
        method,
        path,
        body,
        headers,
    });
    if state.broken {
        Err(StatusCode::INTERNAL_SERVER_ERROR)
    } else {
        Ok(())
    }
}

async fn list_documents(
    State(state): State<Shared>,
    Path(resource): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, StatusCode> {
    record(&state, "GET", format!("/{resource}"), None, headers).await?;
    let documents = state.lock().await.documents.clone();
    Ok(Json(Value::Array(documents)))
}

async fn create_document(
    State(state): State<Shared>,
    Path(resource): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    record(&state, "POST", format!("/{resource}"), Some(body.clone()), headers).await?;
    let mut state = state.lock().await;
    let mut document = body;
    let id = state.next_id;
    state.next_id += 1;
    document["id"] = json!(id);
    state.documents.push(document.clone());
    Ok((StatusCode::CREATED, Json(document)))
}

async fn get_document(
    State(state): State<Shared>,
    Path((resource, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<Value>, StatusCode> {
    record(&state, "GET", format!("/{resource}/{id}"), None, headers).await?;
    let state = state.lock().await;
    state
        .documents
        .iter()
        .find(|document| id_key(&document["id"]) == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn replace_document(
    State(state): State<Shared>,
    Path((resource, id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    record(
        &state,
        "PUT",
        format!("/{resource}/{id}"),
        Some(body.clone()),
        headers,
    )
    .await?;
    let mut state = state.lock().await;
    let slot = state
        .documents
        .iter_mut()
        .find(|document| id_key(&document["id"]) == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    let stored_id = slot["id"].clone();
    let mut document = body;
    document["id"] = stored_id;
    *slot = document.clone();
    Ok(Json(document))
}

async fn delete_document(
    State(state): State<Shared>,
    Path((resource, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<Value>, StatusCode> {
    record(&state, "DELETE", format!("/{resource}/{id}"), None, headers).await?;
    let mut state = state.lock().await;
    let index = state
        .documents
        .iter()
        .position(|document| id_key(&document["id"]) == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    state.documents.remove(index);
    Ok(Json(json!({})))
}

/// Start a stub store holding `documents`. New ids continue after the
/// largest numeric id present.
pub async fn start_stub_server(documents: Vec<Value>) -> Result<StubServer, BoxedError> {
    let next_id = documents
        .iter()
        .filter_map(|document| document["id"].as_u64())
        .max()
        .map_or(1, |max| max + 1);
    let state: Shared = Arc::new(Mutex::new(SharedState {
        documents,
        next_id,
        ..Default::default()
    }));

    let app = Router::new()
        .route(
            "/{resource}",
            get(list_documents).post(create_document),
        )
        .route(
            "/{resource}/{id}",
            get(get_document)
                .put(replace_document)
                .delete(delete_document),
        )
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(|err| Box::new(err) as BoxedError)?;
    let addr = listener
        .local_addr()
        .map_err(|err| Box::new(err) as BoxedError)?;
    let url = format!("http://{addr}");

    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let handle = tokio::spawn(async move {
        let server = axum::serve(listener, app).with_graceful_shutdown(async {
            let _ = shutdown_rx.await;
        });

        if let Err(err) = server.await {
            eprintln!("Stub store server error: {err}");
        }
    });

    Ok(StubServer {
        url,
        state,
        shutdown: Some(shutdown_tx),
        handle,
    })
}
