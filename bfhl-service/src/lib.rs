//! bfhl-service: a single-endpoint JSON dispatch service.
//!
//! `POST /bfhl` accepts a body containing exactly one of five operation keys
//! (`fibonacci`, `prime`, `lcm`, `hcf`, `AI`), runs the matching computation,
//! and answers with a uniform `{is_success, official_email, data|error}`
//! envelope. The numeric operations are pure; the `AI` operation makes one
//! outbound call to a generative-text provider.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod observability;
pub mod services;
pub mod startup;
