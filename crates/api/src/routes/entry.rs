//! Route definitions shared by the four entry kinds.

use axum::routing::get;
use axum::Router;

use crate::handlers::{entry, form, Listing};
use crate::state::AppState;

/// Routes mounted at `/{kind}` for record type `R`.
///
/// ```text
/// GET    /                  -> list (?active=&sort=&order=&q=)
/// POST   /                  -> create                 (editor)
/// GET    /slug/{slug}       -> get_by_slug
/// GET    /{id}              -> get_by_id
/// PUT    /{id}              -> update / upsert        (editor)
/// DELETE /{id}              -> delete                 (editor)
/// GET    /{id}/detail       -> detail view
///
/// GET    /form              -> blank form
/// POST   /form              -> create from form       (editor)
/// GET    /{id}/form         -> edit form
/// PUT    /{id}/form         -> replace from form      (editor)
/// ```
pub fn router<R: Listing>() -> Router<AppState> {
    Router::new()
        .route("/", get(entry::list::<R>).post(entry::create::<R>))
        .route("/form", get(form::blank::<R>).post(form::create::<R>))
        .route("/slug/{slug}", get(entry::get_by_slug::<R>))
        .route(
            "/{id}",
            get(entry::get_by_id::<R>)
                .put(entry::update::<R>)
                .delete(entry::delete::<R>),
        )
        .route("/{id}/detail", get(entry::detail::<R>))
        .route("/{id}/form", get(form::edit::<R>).put(form::replace::<R>))
}
