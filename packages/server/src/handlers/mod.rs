pub mod auth;
pub mod blog;
pub mod comment;
pub mod health;
pub mod wishlist;
