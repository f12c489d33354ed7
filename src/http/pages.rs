//! Placeholder page handlers for the role-scoped trees.
//!
//! The real storefront renders these server-side; here they exist so the
//! route gate has concrete trees to guard and so integration tests can
//! observe gate behavior end to end.

use axum::response::Html;

pub async fn landing() -> Html<&'static str> {
    Html("<h1>Storefront</h1>")
}

pub async fn login_page() -> Html<&'static str> {
    Html("<h1>Log in</h1>")
}

pub async fn admin_home() -> Html<&'static str> {
    Html("<h1>Admin dashboard</h1>")
}

pub async fn seller_home() -> Html<&'static str> {
    Html("<h1>Seller dashboard</h1>")
}

pub async fn categories_home() -> Html<&'static str> {
    Html("<h1>Browse categories</h1>")
}
