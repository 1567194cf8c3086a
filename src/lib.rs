//! Hacker News best-stories API with a two-tier, time-bounded cache.
//!
//! The cache ([`cache::StoryCache`]) holds two independently expiring shapes:
//! the ranked best-story id list and a per-id story map. The resolution
//! pipeline ([`service::StoryService`]) serves reads cache-first, fans out
//! upstream fetches for misses, and heals the cache as data arrives.

pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod hn;
pub mod logging;
pub mod models;
pub mod service;
pub mod state;
pub mod web;
