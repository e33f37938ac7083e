//! Insert and lookup statements over the shop schema.

use crate::exec::Statement;
use crate::model::{
    Car, ClosedRequest, Customer, Mechanic, Ownership, RequestState, ServiceRequest,
    ValidationError,
};

pub fn insert_customer(customer: &Customer) -> Result<Statement, ValidationError> {
    customer.validate()?;
    Ok(Statement::new(
        "insert_customer",
        "INSERT INTO Customer (id, fname, lname, phone, address) VALUES (?1, ?2, ?3, ?4, ?5);",
    )
    .bind_int(customer.id)
    .bind_text(customer.fname.as_str())
    .bind_text(customer.lname.as_str())
    .bind_text(customer.phone.as_str())
    .bind_text(customer.address.as_str()))
}

pub fn insert_mechanic(mechanic: &Mechanic) -> Result<Statement, ValidationError> {
    mechanic.validate()?;
    Ok(Statement::new(
        "insert_mechanic",
        "INSERT INTO Mechanic (id, fname, lname, experience) VALUES (?1, ?2, ?3, ?4);",
    )
    .bind_int(mechanic.id)
    .bind_text(mechanic.fname.as_str())
    .bind_text(mechanic.lname.as_str())
    .bind_int(mechanic.experience))
}

pub fn insert_car(car: &Car) -> Result<Statement, ValidationError> {
    car.validate()?;
    Ok(Statement::new(
        "insert_car",
        "INSERT INTO Car (vin, make, model, year) VALUES (?1, ?2, ?3, ?4);",
    )
    .bind_text(car.vin.as_str())
    .bind_text(car.make.as_str())
    .bind_text(car.model.as_str())
    .bind_int(car.year))
}

pub fn insert_ownership(ownership: &Ownership) -> Result<Statement, ValidationError> {
    ownership.validate()?;
    Ok(Statement::new(
        "insert_ownership",
        "INSERT INTO Owns (ownership_id, customer_id, car_vin) VALUES (?1, ?2, ?3);",
    )
    .bind_int(ownership.ownership_id)
    .bind_int(ownership.customer_id)
    .bind_text(ownership.car_vin.as_str()))
}

pub fn insert_service_request(request: &ServiceRequest) -> Result<Statement, ValidationError> {
    request.validate()?;
    Ok(Statement::new(
        "insert_service_request",
        "INSERT INTO Service_Request (rid, customer_id, car_vin, date, odometer, complain)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
    )
    .bind_int(request.rid)
    .bind_int(request.customer_id)
    .bind_text(request.car_vin.as_str())
    .bind_int(request.date)
    .bind_int(request.odometer)
    .bind_text(request.complain.as_str()))
}

/// Builds the insert that moves a request from `Open` to `Closed`.
pub fn insert_closed_request(
    closing: &ClosedRequest,
    opened_on: i64,
) -> Result<Statement, ValidationError> {
    closing.validate(opened_on)?;
    Ok(Statement::new(
        "insert_closed_request",
        "INSERT INTO Closed_Request (wid, rid, mid, date, comment, bill)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
    )
    .bind_int(closing.wid)
    .bind_int(closing.rid)
    .bind_int(closing.mid)
    .bind_int(closing.date)
    .bind_text(closing.comment.as_str())
    .bind_int(closing.bill))
}

/// Customers sharing a last name, ordered by id for stable numbering.
///
/// Columns: `id`, `fname`, `lname`, `phone`, `address`.
pub fn customers_by_last_name(lname: &str) -> Statement {
    Statement::new(
        "customers_by_last_name",
        "SELECT id, fname, lname, phone, address FROM Customer WHERE lname = ?1 ORDER BY id;",
    )
    .bind_text(lname)
}

/// Existing link between a customer and a car, if any.
pub fn ownership_link(customer_id: i64, car_vin: &str) -> Statement {
    Statement::new(
        "ownership_link",
        "SELECT ownership_id FROM Owns WHERE customer_id = ?1 AND car_vin = ?2;",
    )
    .bind_int(customer_id)
    .bind_text(car_vin)
}

pub fn mechanic_by_id(id: i64) -> Statement {
    Statement::new("mechanic_by_id", "SELECT id FROM Mechanic WHERE id = ?1;").bind_int(id)
}

/// Opening date and lifecycle state of one request.
///
/// Yields `date` and `state` (`open` or `closed`), or no row when the
/// request does not exist.
pub fn request_status(rid: i64) -> Statement {
    Statement::new(
        "request_status",
        "SELECT S.date,
                CASE WHEN C.rid IS NULL THEN 'open' ELSE 'closed' END AS state
         FROM Service_Request S
         LEFT JOIN Closed_Request C ON C.rid = S.rid
         WHERE S.rid = ?1;",
    )
    .bind_int(rid)
}

/// Parses the `state` column produced by [`request_status`].
pub fn parse_request_state(value: &str) -> Option<RequestState> {
    match value {
        "open" => Some(RequestState::Open),
        "closed" => Some(RequestState::Closed),
        _ => None,
    }
}
