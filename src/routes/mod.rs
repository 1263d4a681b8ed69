mod account;
mod admin;
mod cart;
mod categories;
mod geo;
mod health;
mod login;
mod products;
mod register;

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use crate::AppState;

pub fn create_router() -> Router<AppState> {
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/auth/register", post(register::register_user))
        .route("/auth/login", post(login::login_user))
        .route("/auth/send-code", post(account::send_verification_code))
        .route("/auth/verify-email", post(account::verify_email))
        .route(
            "/auth/password-reset/request",
            post(account::request_password_reset),
        )
        .route(
            "/auth/password-reset/confirm",
            post(account::confirm_password_reset),
        )
        .route("/products", get(products::list_products))
        .route("/products/{id}", get(products::get_product))
        .route("/categories", get(categories::get_all_categories))
        .route("/geo/countries", get(geo::get_countries))
        .route("/geo/countries/{country_id}/states", get(geo::get_states))
        .route("/geo/states/{state_id}/cities", get(geo::get_cities));

    let user_routes = Router::new()
        .route("/cart", get(cart::get_cart).post(cart::add_to_cart))
        .route("/cart/count", get(cart::cart_count))
        .route("/cart/checkout", post(cart::checkout))
        .route("/cart/{id}/increase", post(cart::increase_quantity))
        .route("/cart/{id}/decrease", post(cart::decrease_quantity))
        .route(
            "/cart/{id}",
            put(cart::edit_line).delete(cart::remove_line),
        )
        .route(
            "/account",
            get(account::get_profile).put(account::update_profile),
        )
        .route("/account/image-url", post(account::generate_image_url))
        .route_layer(middleware::from_fn(crate::middleware::auth_middleware));

    let admin_routes = Router::new()
        .route("/admin/products", post(admin::create_product))
        .route(
            "/admin/products/{id}",
            put(admin::update_product).delete(admin::delete_product),
        )
        .route(
            "/admin/products/{id}/images",
            post(admin::generate_product_urls),
        )
        .route(
            "/admin/products/{id}/images/{image_uuid}",
            delete(admin::delete_product_image),
        )
        .route(
            "/admin/products/{id}/categories",
            put(admin::assign_categories_to_product),
        )
        .route("/admin/categories", post(admin::create_category))
        .route(
            "/admin/categories/{id}",
            get(admin::get_category)
                .put(admin::update_category)
                .delete(admin::delete_category),
        )
        .route("/admin/users", get(admin::search_users))
        .route(
            "/admin/users/{id}",
            put(admin::update_user).delete(admin::delete_user),
        )
        .route_layer(middleware::from_fn(crate::middleware::admin_middleware));

    public_routes.merge(user_routes).merge(admin_routes)
}
