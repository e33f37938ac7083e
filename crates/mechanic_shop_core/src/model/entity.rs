//! Shop records as they are written to the store.
//!
//! Field names mirror the store's column names so serialized records line
//! up with report output.

use super::rules::{
    require_experience, require_model_year, require_non_negative, require_not_before,
    require_positive, require_text, ValidationError,
};
use serde::{Deserialize, Serialize};

/// A registered customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub fname: String,
    pub lname: String,
    pub phone: String,
    pub address: String,
}

impl Customer {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_negative("id", self.id)?;
        require_text("fname", &self.fname)?;
        require_text("lname", &self.lname)?;
        require_text("phone", &self.phone)?;
        require_text("address", &self.address)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mechanic {
    pub id: i64,
    pub fname: String,
    pub lname: String,
    /// Whole years, `0..100`.
    pub experience: i64,
}

impl Mechanic {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_negative("id", self.id)?;
        require_text("fname", &self.fname)?;
        require_text("lname", &self.lname)?;
        require_experience(self.experience)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: i64,
}

impl Car {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("vin", &self.vin)?;
        require_text("make", &self.make)?;
        require_text("model", &self.model)?;
        require_model_year(self.year)
    }
}

/// Link binding a car to the customer who owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ownership {
    pub ownership_id: i64,
    pub customer_id: i64,
    pub car_vin: String,
}

impl Ownership {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_negative("ownership_id", self.ownership_id)?;
        require_non_negative("customer_id", self.customer_id)?;
        require_text("car_vin", &self.car_vin)
    }
}

/// A car brought in by a customer with a complaint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub rid: i64,
    pub customer_id: i64,
    pub car_vin: String,
    /// Stored as a bare integer, not a calendar date.
    pub date: i64,
    pub odometer: i64,
    pub complain: String,
}

impl ServiceRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_negative("rid", self.rid)?;
        require_non_negative("customer_id", self.customer_id)?;
        require_text("car_vin", &self.car_vin)?;
        require_non_negative("date", self.date)?;
        require_non_negative("odometer", self.odometer)?;
        require_text("complain", &self.complain)
    }
}

/// Closing record for a service request.
///
/// At most one exists per request; its presence is what makes a request
/// `RequestState::Closed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosedRequest {
    pub wid: i64,
    pub rid: i64,
    pub mid: i64,
    pub date: i64,
    pub comment: String,
    pub bill: i64,
}

impl ClosedRequest {
    /// Validates the closing against the date its request was opened.
    pub fn validate(&self, opened_on: i64) -> Result<(), ValidationError> {
        require_non_negative("wid", self.wid)?;
        require_non_negative("rid", self.rid)?;
        require_non_negative("mid", self.mid)?;
        require_not_before("date", self.date, opened_on)?;
        require_text("comment", &self.comment)?;
        require_positive("bill", self.bill)
    }
}

/// Lifecycle of a service request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestState {
    /// Accepted at the desk, no closing recorded yet.
    Open,
    /// A mechanic closed it with a bill. Terminal.
    Closed,
}

impl RequestState {
    /// Applies the close transition.
    ///
    /// Returns `None` when the request is already closed.
    pub fn close(self) -> Option<Self> {
        match self {
            Self::Open => Some(Self::Closed),
            Self::Closed => None,
        }
    }
}
