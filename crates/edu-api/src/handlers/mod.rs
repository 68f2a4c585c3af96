//! HTTP handlers

pub mod auth;
pub mod foundations;
pub mod health;
pub mod students;
pub mod tenants;
