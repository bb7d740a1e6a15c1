//! FoodieFinds client core.
//!
//! The session and review/favorite state manager behind the FoodieFinds
//! member experience. This crate keeps local UI state consistent with the
//! remote data store across authentication transitions, optimistic
//! mutations, and the concurrent list views (all-reviews, my-reviews,
//! my-favorites, single-review).
//!
//! # Architecture
//!
//! - [`session`] - Observable authenticated identity and its lifecycle
//! - [`repo`] - Review and favorite repositories over the remote store
//! - [`remote`] - Remote store contracts and the HTTP implementation
//! - [`identity`] - Identity provider contract and the HTTP implementation
//! - [`viewstate`] - Per-view loading/loaded/error state machines
//! - [`guard`] - Navigation gate for session-only views
//!
//! Presentation, routing mechanics, and notification delivery are the
//! caller's concern; this crate only exposes the state they render.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use foodiefinds_client::config::ClientConfig;
//! use foodiefinds_client::identity::HttpIdentityProvider;
//! use foodiefinds_client::remote::ApiClient;
//! use foodiefinds_client::repo::ReviewRepository;
//! use foodiefinds_client::session::SessionStore;
//! use foodiefinds_client::viewstate::AllReviewsController;
//!
//! let config = ClientConfig::from_env()?;
//! let api = ApiClient::new(&config);
//! let provider = Arc::new(HttpIdentityProvider::new(&config.identity));
//! let session = Arc::new(SessionStore::new(provider, Arc::new(api.clone())));
//!
//! session.sign_in("member@example.com", "Hunter2x").await?;
//!
//! let reviews = ReviewRepository::new(Arc::new(api));
//! let mut all = AllReviewsController::new(reviews.clone(), session.clone());
//! all.refresh().await;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod guard;
pub mod identity;
pub mod models;
pub mod remote;
pub mod repo;
pub mod session;
pub mod viewstate;

pub use error::{AppError, Result};
