use crate::server::ServerRouter;
use axum::Router;

mod pages;
mod posts;

pub fn routes() -> ServerRouter {
    Router::new().merge(posts::routes()).merge(pages::routes())
}
