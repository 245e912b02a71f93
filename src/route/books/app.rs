use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::{middleware::authorize::authorize, state::ApiState};

use super::{BOOKS_PATH, BOOK_PATH};

pub fn app(state: ApiState) -> Router<ApiState> {
    Router::<ApiState>::new()
        .route(
            BOOKS_PATH,
            get(super::list_books::list_books).post(super::create_book::create_book),
        )
        .route(
            BOOK_PATH,
            get(super::get_book::get_book).delete(super::delete_book::delete_book),
        )
        .route_layer(from_fn_with_state(state, authorize))
}
