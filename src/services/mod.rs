pub mod email_service;
pub mod geo_service;
pub mod image_url_service;
pub mod order_service;
