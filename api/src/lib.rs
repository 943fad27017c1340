//! HTTP API layer: actix-web application factory, routes, middleware
//! and request/response DTOs.

pub mod app;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
