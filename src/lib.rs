pub mod analysis;
pub mod config;
pub mod error;
pub mod form;
pub mod shell;

pub use error::{Error, Result};
