// src/lib.rs

//! mediadesk: content retrieval, editorial ordering and sitemap assembly

pub mod client;
pub mod error;
#[cfg(feature = "lambda")]
pub mod lambda;
pub mod listing;
pub mod models;
pub mod ordering;
pub mod routes;
pub mod sections;
pub mod sitemap;
pub mod utils;
