//! Statement builders for shop tables.
//!
//! # Responsibility
//! - Keep SQL text for inserts and lookups in one place.
//! - Turn validated records into parameter-bound statements.
//!
//! # Invariants
//! - Insert builders call the record's `validate()` before producing SQL.
//! - Every caller-provided value is bound, never formatted into SQL.

pub mod shop_statements;
