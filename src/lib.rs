pub mod cli;
pub mod config;
pub mod domain;
pub mod gnosis;
pub mod prettyprint;
pub mod sheets;

pub use gnosis::{Gnosis, GnosisError};
