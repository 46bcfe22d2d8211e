pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod models;
pub mod service;

pub use auth::{AuthError, AuthErrorKind, CredentialsVerifier, PgCredentialsVerifier, SignInError};
pub use config::AppConfig;
pub use db::{create_pool, InvoiceStore, PgInvoiceStore};
pub use service::{InvoiceActions, RouteCache};
