use crate::server::{
    Result, ServerError, ServerRouter,
    json::{Created, Json},
};
use axum::{extract::State, http::StatusCode};
use axum_extra::routing::{RouterExt, TypedPath};
use quill_common::model::{
    Id,
    post::{Post, PostContent, PostMarker},
};
use quill_db::store::PostStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_get(list_posts)
        .typed_post(create_post)
        .typed_get(get_post)
        .typed_put(update_post)
        .typed_delete(delete_post)
        .typed_post(like_post)
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts", rejection(ServerError))]
struct PostsPath();

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts/{id}", rejection(ServerError))]
struct PostPath {
    id: Id<PostMarker>,
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts/{id}/like", rejection(ServerError))]
struct LikePostPath {
    id: Id<PostMarker>,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Serialize, Deserialize)]
struct CreatedPost {
    id: Id<PostMarker>,
}

async fn list_posts(
    PostsPath(): PostsPath,
    State(store): State<Arc<PostStore>>,
) -> Result<Json<Vec<Post>>> {
    Ok(Json(store.fetch_posts().await?))
}

async fn create_post(
    PostsPath(): PostsPath,
    State(store): State<Arc<PostStore>>,
    Json(content): Json<PostContent>,
) -> Result<Created<CreatedPost>> {
    let id = store.create_post(&content).await?;

    Ok(Created(CreatedPost { id }))
}

async fn get_post(
    PostPath { id }: PostPath,
    State(store): State<Arc<PostStore>>,
) -> Result<Json<Post>> {
    let post = store
        .fetch_post(id)
        .await?
        .ok_or(ServerError::PostByIdNotFound(id))?;

    Ok(Json(post))
}

async fn update_post(
    PostPath { id }: PostPath,
    State(store): State<Arc<PostStore>>,
    Json(content): Json<PostContent>,
) -> Result<Json<Post>> {
    Ok(Json(store.update_post(id, &content).await?))
}

async fn delete_post(
    PostPath { id }: PostPath,
    State(store): State<Arc<PostStore>>,
) -> Result<StatusCode> {
    store.delete_post(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn like_post(
    LikePostPath { id }: LikePostPath,
    State(store): State<Arc<PostStore>>,
) -> Result<Json<Post>> {
    Ok(Json(store.like_post(id).await?))
}

#[cfg(test)]
mod tests {
    use crate::server::test_util::{app, body_json, numbered, request, send, with_body};
    use axum::http::StatusCode;
    use quill_common::model::{Id, post::Post};
    use serde_json::{Value, json};

    const JSON: &str = "application/json";

    #[tokio::test]
    async fn lists_posts() {
        let (app, _) = app(numbered(2));

        let response = send(app, request("GET", "/posts")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json::<Vec<Post>>(response).await, numbered(2));
    }

    #[tokio::test]
    async fn creates_posts() {
        let (app, store) = app(Vec::new());
        let body = r#"{"author": "Jane", "title": "Hello", "content": "World"}"#;

        let response = send(app, with_body("POST", "/posts", JSON, body)).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_json::<Value>(response).await, json!({ "id": 1 }));
        assert_eq!(
            serde_json::to_value(store.fetch_posts().await.unwrap()).unwrap(),
            json!([{ "id": 1, "author": "Jane", "title": "Hello", "content": "World", "likes": 0 }])
        );
    }

    #[tokio::test]
    async fn rejects_malformed_json() {
        let (app, store) = app(Vec::new());

        let response = send(app, with_body("POST", "/posts", JSON, r#"{"author": 1}"#)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(store.fetch_posts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn gets_single_posts() {
        let (app, _) = app(numbered(3));

        let found = send(app.clone(), request("GET", "/posts/2")).await;
        let missing = send(app.clone(), request("GET", "/posts/4")).await;
        let invalid = send(app, request("GET", "/posts/0")).await;

        assert_eq!(found.status(), StatusCode::OK);
        assert_eq!(body_json::<Post>(found).await, numbered(3)[1]);
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(invalid.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn updates_posts() {
        let mut posts = numbered(1);
        posts[0].likes = 4;
        let (app, _) = app(posts);
        let body = r#"{"author": "John", "title": "Edited", "content": "Changed"}"#;

        let updated = send(app.clone(), with_body("PUT", "/posts/1", JSON, body)).await;
        let missing = send(app, with_body("PUT", "/posts/99", JSON, body)).await;

        assert_eq!(updated.status(), StatusCode::OK);
        assert_eq!(
            body_json::<Value>(updated).await,
            json!({ "id": 1, "author": "John", "title": "Edited", "content": "Changed", "likes": 4 })
        );
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn deletes_posts() {
        let (app, store) = app(numbered(3));

        let deleted = send(app.clone(), request("DELETE", "/posts/1")).await;
        let missing = send(app, request("DELETE", "/posts/3")).await;

        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        let posts = store.fetch_posts().await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].content.title, "Post 2");
    }

    #[tokio::test]
    async fn likes_posts() {
        let (app, store) = app(numbered(1));

        let liked = send(app.clone(), request("POST", "/posts/1/like")).await;
        let missing = send(app, request("POST", "/posts/2/like")).await;

        assert_eq!(liked.status(), StatusCode::OK);
        assert_eq!(body_json::<Post>(liked).await.likes, 1);
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(store.fetch_post(Id::FIRST).await.unwrap().unwrap().likes, 1);
    }
}
