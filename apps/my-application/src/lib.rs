//! Example application bootstrapped through a service container
//!
//! 1. [config] - configuration read from environment variables
//! 2. [container] - the container and the order its services are provided in
//! 3. [app] - runs the application and shuts the container down

pub mod app;
pub mod config;
pub mod container;
pub mod service;
