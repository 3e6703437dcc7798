pub mod assessment;
pub mod config;
pub mod error;
pub mod export;
pub mod generate;
pub mod goals;
pub mod history;
pub mod io;
pub mod outcome;
pub mod paths;
pub mod reference;
pub mod rubric;
pub mod sentence;
pub mod taxonomy;
pub mod types;

pub use error::{CloError, Result};
