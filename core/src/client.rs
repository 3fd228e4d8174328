//! Stateless request builder and response parser for the items API.
//!
//! # Design
//! `ItemsClient` holds only a base URL. Each route is split into a
//! `build_*` method producing an `HttpRequest` and a `parse_*` method
//! consuming the `HttpResponse`; the caller performs the round trip in
//! between.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    BulkInsertResult, BulkToDoItem, ItemForm, ItemId, ToDoItem, ToDoItemDetail, ToDoItemFields,
};

#[derive(Debug, Clone)]
pub struct ItemsClient {
    base_url: String,
}

impl ItemsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/items{path}", self.base_url)
    }

    pub fn build_list_items(&self) -> HttpRequest {
        HttpRequest::empty(HttpMethod::Get, self.url(""))
    }

    pub fn build_list_children(&self, parent: &str) -> HttpRequest {
        HttpRequest::empty(
            HttpMethod::Get,
            self.url(&format!("?parent={}", query_value(parent))),
        )
    }

    pub fn build_get_item(&self, id: ItemId) -> HttpRequest {
        HttpRequest::empty(HttpMethod::Get, self.url(&format!("/{id}")))
    }

    pub fn build_new_form(&self) -> HttpRequest {
        HttpRequest::empty(HttpMethod::Get, self.url("/new"))
    }

    pub fn build_edit_form(&self, id: ItemId) -> HttpRequest {
        HttpRequest::empty(HttpMethod::Get, self.url(&format!("/{id}/edit")))
    }

    pub fn build_create_item(&self, input: &ToDoItemFields) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::json(HttpMethod::Post, self.url(""), to_body(input)?))
    }

    pub fn build_create_many(&self, items: &[BulkToDoItem]) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::json(HttpMethod::Post, self.url("/bulk"), to_body(items)?))
    }

    pub fn build_update_item(
        &self,
        id: ItemId,
        input: &ToDoItemFields,
    ) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::json(
            HttpMethod::Put,
            self.url(&format!("/{id}")),
            to_body(input)?,
        ))
    }

    pub fn build_delete_item(&self, id: ItemId) -> HttpRequest {
        HttpRequest::empty(HttpMethod::Delete, self.url(&format!("/{id}")))
    }

    pub fn parse_list_items(&self, response: HttpResponse) -> Result<Vec<ToDoItem>, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_list_children(&self, response: HttpResponse) -> Result<Vec<ToDoItem>, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_get_item(&self, response: HttpResponse) -> Result<ToDoItemDetail, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_form(&self, response: HttpResponse) -> Result<ItemForm, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_create_item(&self, response: HttpResponse) -> Result<ToDoItem, ApiError> {
        parse_json(response, 201)
    }

    pub fn parse_create_many(&self, response: HttpResponse) -> Result<BulkInsertResult, ApiError> {
        parse_json(response, 201)
    }

    pub fn parse_update_item(&self, response: HttpResponse) -> Result<ToDoItem, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_delete_item(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)
    }
}

fn to_body<T: Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::SerializationError(e.to_string()))
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse, expected: u16) -> Result<T, ApiError> {
    check_status(&response, expected)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

fn query_value(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
