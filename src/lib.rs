//! Debate arena: a prediction-market debate forum.
//!
//! The server side keeps markets, debates, arguments and replies in
//! in-memory repositories behind an axum JSON API. The client side mirrors
//! that data in a reducer-driven store fed by typed action creators.

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod events;
pub mod logging;
pub mod oracle;
pub mod service;
pub mod store;
pub mod votes;
pub mod web;
