//! Feed Wall - a server-rendered feed aggregator
//!
//! Fetches a fixed list of RSS/Atom feeds through a hosted feed-conversion
//! API (no feed parsing happens here), joins the per-source results, and
//! renders them as a wall of entries with a modal detail view driven by a
//! single-selection state machine.

pub mod aggregator;
pub mod config;
pub mod dates;
pub mod feed;
pub mod image;
pub mod loader;
pub mod routes;
pub mod selection;
