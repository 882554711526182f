/// Database Module
///
/// The database accessor and the pieces it is built from.
///
/// ## Architecture
///
/// - **Connection** (`connection.rs`): the `Database` accessor and its lifecycle
/// - **Schema Introspection** (`schema.rs`): table names and column metadata
/// - **Query Execution** (`query.rs`): statement execution and result collection
/// - **Values** (`value.rs`): scalar values, rows and parameter bindings
///
/// ## Error Handling
///
/// All operations return `FifaStatError`; SQLite diagnostics are passed
/// through unchanged.
pub mod connection;
pub mod query;
pub mod schema;
pub mod value;

pub use connection::*;
pub use query::*;
pub use schema::*;
pub use value::*;
