//! Shop domain model.
//!
//! # Responsibility
//! - Define the records the front desk creates: customers, mechanics, cars,
//!   ownership links, service requests and their closings.
//! - Own the field rules shared by console prompts and insert builders.
//!
//! # Invariants
//! - Identifiers are caller-supplied, non-negative integers.
//! - A record that fails `validate()` is never turned into a statement.

pub mod entity;
pub mod rules;

pub use entity::{Car, ClosedRequest, Customer, Mechanic, Ownership, RequestState, ServiceRequest};
pub use rules::ValidationError;
