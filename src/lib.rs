// Core infrastructure modules
pub mod core;

// Tabular results, configuration and reporting
pub mod config;
pub mod frame;
pub mod report;

#[cfg(test)]
mod test_utils;

pub use crate::core::db::{
    Column, Database, Params, QueryResult, Row, TableDescriptor, Value, DEFAULT_DATABASE_PATH,
};
pub use crate::core::{FifaStatError, Result};
pub use crate::frame::{ColumnType, Frame};
