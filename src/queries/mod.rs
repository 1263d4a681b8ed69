pub mod admin_queries;
pub mod cart_queries;
pub mod category_queries;
pub mod email_queries;
pub mod geo_queries;
pub mod product_queries;
pub mod user_queries;
