//! Pass2U integration: request bodies, the REST client and the image bridge

pub mod builder;
pub mod client;
pub mod image;
pub mod models;
pub mod service;

#[cfg(test)]
pub mod testing;

pub use builder::build_pass_request;
pub use client::Pass2uClient;
pub use image::upload_from_url;
pub use models::PassResult;
pub use service::{ImageSource, PassService};
