// Export our modules for use in the binary and tests
pub mod config;
pub mod controller;
pub mod domain;
pub mod logging;
pub mod service;

pub use controller::QueryController;
pub use domain::{Answer, RequestState};
