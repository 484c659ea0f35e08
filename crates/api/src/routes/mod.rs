//! HTTP Route Handlers

pub mod fault;
pub mod health;
pub mod speed;
pub mod task;
