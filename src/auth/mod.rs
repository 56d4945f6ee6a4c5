//! # Auth Module
//!
//! This module handles all authentication-related functionality including:
//! - Google OAuth login, callback, refresh, and logout flows
//! - JWT access/refresh credential issuing and verification
//! - Secure session cookies
//! - AuthedUser extractor for protected routes

pub mod cookies;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod token;


pub use extractors::AuthedUser;
pub use models::User;
pub use routes::auth_routes;
