//! Library crate for gomoku-back, exposing modules for binaries and integration tests.

pub mod config;
pub mod dao;
pub mod dto;
pub mod engine;
pub mod error;
pub mod identity;
pub mod routes;
pub mod services;
pub mod state;
