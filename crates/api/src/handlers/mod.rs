//! Thin HTTP handlers (§6): validate the request, delegate to `core`/`infra`,
//! serialize the result. No business logic lives here.

pub mod admin;
pub mod assets;
pub mod campaigns;
pub mod generate;
pub mod ia_test;
pub mod landing;
pub mod prospects;
pub mod scoring;
