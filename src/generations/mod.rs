pub mod controller;
pub mod dtos;
pub mod enums;
pub mod errors;
pub mod job_api;
pub mod job_client;
pub mod models;
pub mod service;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;
