//! Catalog core of an affiliate-marketing storefront.
//!
//! This crate fetches a remote JSON product feed, normalizes its
//! heterogeneous records into canonical products, and drives the list and
//! detail view state (filtering, pagination, categories, related products)
//! that presentation components render. Presentation and routing live
//! outside the crate; `forms` and `dto` carry the contracts they consume.

pub mod domain;
pub mod dto;
pub mod feed;
pub mod forms;
#[cfg(feature = "http")]
pub mod models;
pub mod services;

mod error_conversions;
