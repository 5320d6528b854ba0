//! Form endpoints behind the blog's web pages. Every successful mutation redirects back to the
//! listing.

use crate::server::{Result, ServerError, ServerRouter, form::Form, json::Json};
use axum::{extract::State, response::Redirect};
use axum_extra::routing::{RouterExt, TypedPath};
use quill_common::model::{
    Id,
    post::{Post, PostContent, PostMarker},
};
use quill_db::store::PostStore;
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_get(index)
        .typed_post(add)
        .typed_get(delete)
        .typed_post(delete)
        .typed_post(update)
        .typed_post(like)
}

/// Field names used by the blog's HTML forms. Missing fields are taken as empty.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize)]
#[serde(default)]
struct PostForm {
    post_author: String,
    post_title: String,
    post_message: String,
}

impl From<PostForm> for PostContent {
    fn from(value: PostForm) -> Self {
        Self {
            author: value.post_author,
            title: value.post_title,
            content: value.post_message,
        }
    }
}

const INDEX: &str = "/";

#[derive(TypedPath, Deserialize)]
#[typed_path("/", rejection(ServerError))]
struct IndexPath();

#[derive(TypedPath, Deserialize)]
#[typed_path("/add", rejection(ServerError))]
struct AddPath();

#[derive(TypedPath, Deserialize)]
#[typed_path("/delete/{id}", rejection(ServerError))]
struct DeletePath {
    id: Id<PostMarker>,
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/update/{id}", rejection(ServerError))]
struct UpdatePath {
    id: Id<PostMarker>,
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/like/{id}", rejection(ServerError))]
struct LikePath {
    id: Id<PostMarker>,
}

fn to_index() -> Redirect {
    Redirect::to(INDEX)
}

async fn index(
    IndexPath(): IndexPath,
    State(store): State<Arc<PostStore>>,
) -> Result<Json<Vec<Post>>> {
    Ok(Json(store.fetch_posts().await?))
}

async fn add(
    AddPath(): AddPath,
    State(store): State<Arc<PostStore>>,
    Form(form): Form<PostForm>,
) -> Result<Redirect> {
    store.create_post(&form.into()).await?;

    Ok(to_index())
}

async fn delete(
    DeletePath { id }: DeletePath,
    State(store): State<Arc<PostStore>>,
) -> Result<Redirect> {
    store.delete_post(id).await?;

    Ok(to_index())
}

async fn update(
    UpdatePath { id }: UpdatePath,
    State(store): State<Arc<PostStore>>,
    Form(form): Form<PostForm>,
) -> Result<Redirect> {
    store.update_post(id, &form.into()).await?;

    Ok(to_index())
}

async fn like(LikePath { id }: LikePath, State(store): State<Arc<PostStore>>) -> Result<Redirect> {
    store.like_post(id).await?;

    Ok(to_index())
}
