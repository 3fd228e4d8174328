//! JSON HTTP surface over a `ToDoItemStore`.
//!
//! Handlers are thin: each one maps a route onto store calls and turns the
//! result into a response. Store calls are synchronous, so they run on
//! tokio's blocking pool.

pub mod config;
mod error;

use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tokio::net::TcpListener;

use todo_core::{
    BulkInsertResult, BulkToDoItem, ItemForm, ItemId, StoreError, ToDoItem, ToDoItemDetail,
    ToDoItemFields, ToDoItemStore,
};

pub use error::AppError;

pub type SharedStore = Arc<dyn ToDoItemStore>;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub parent: Option<String>,
}

pub fn app(store: SharedStore) -> Router {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route("/items/bulk", post(create_many))
        .route("/items/new", get(new_form))
        .route(
            "/items/{id}",
            get(show_item).put(update_item).delete(delete_item),
        )
        .route("/items/{id}/edit", get(edit_form))
        .with_state(store)
}

pub async fn run<F>(
    listener: TcpListener,
    store: SharedStore,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app(store))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn with_store<T, F>(store: &SharedStore, op: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce(&dyn ToDoItemStore) -> Result<T, StoreError> + Send + 'static,
{
    let store = store.clone();
    Ok(tokio::task::spawn_blocking(move || op(store.as_ref())).await??)
}

async fn list_items(
    State(store): State<SharedStore>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ToDoItem>>, AppError> {
    let items = match query.parent {
        Some(parent) => with_store(&store, move |s| s.list_children(&parent)).await?,
        None => with_store(&store, |s| s.list_all()).await?,
    };
    Ok(Json(items))
}

async fn create_item(
    State(store): State<SharedStore>,
    Json(fields): Json<ToDoItemFields>,
) -> Result<(StatusCode, Json<ToDoItem>), AppError> {
    let item = with_store(&store, move |s| s.create(fields)).await?;
    tracing::info!(id = item.id, parent = ?item.parent, "created item");
    Ok((StatusCode::CREATED, Json(item)))
}

async fn create_many(
    State(store): State<SharedStore>,
    Json(batch): Json<Vec<BulkToDoItem>>,
) -> Result<(StatusCode, Json<BulkInsertResult>), AppError> {
    let items = with_store(&store, move |s| s.create_many(batch)).await?;
    tracing::info!(count = items.len(), "bulk inserted items");
    Ok((
        StatusCode::CREATED,
        Json(BulkInsertResult {
            count: items.len(),
            items,
        }),
    ))
}

async fn show_item(
    State(store): State<SharedStore>,
    Path(id): Path<ItemId>,
) -> Result<Json<ToDoItemDetail>, AppError> {
    let detail = with_store(&store, move |s| {
        let item = s.get_by_id(id)?;
        let children = s.list_children(&item.child_key())?;
        let parent = s.get_parent(&item)?;
        Ok(ToDoItemDetail {
            item,
            children,
            parent,
        })
    })
    .await?;
    if detail.parent.is_none() && detail.item.parent_id().is_some() {
        tracing::debug!(id, parent = ?detail.item.parent, "parent reference does not resolve");
    }
    Ok(Json(detail))
}

async fn new_form() -> Json<ItemForm> {
    Json(ItemForm::for_new())
}

async fn edit_form(Path(id): Path<ItemId>) -> Json<ItemForm> {
    Json(ItemForm::for_edit(id))
}

async fn update_item(
    State(store): State<SharedStore>,
    Path(id): Path<ItemId>,
    Json(fields): Json<ToDoItemFields>,
) -> Result<Json<ToDoItem>, AppError> {
    let item = with_store(&store, move |s| s.update(id, fields)).await?;
    tracing::info!(id, "updated item");
    Ok(Json(item))
}

async fn delete_item(
    State(store): State<SharedStore>,
    Path(id): Path<ItemId>,
) -> Result<StatusCode, AppError> {
    with_store(&store, move |s| s.delete(id)).await?;
    tracing::info!(id, "deleted item");
    Ok(StatusCode::NO_CONTENT)
}
