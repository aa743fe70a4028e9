//! Service layer for business logic.
//!
//! Separates business logic from UI handlers for better testability and maintainability.

pub mod gallery_service;

pub use gallery_service::GalleryService;
