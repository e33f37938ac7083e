mod common;

use common::{rows, seed, session_with, sqlite_session, transcript, RecordingExecutor};
use mechanic_shop_core::{InputError, WorkflowError};
use rusqlite::types::Value;

const SEED_CAR: &str =
    "INSERT INTO Car (vin, make, model, year) VALUES ('VIN1', 'Ford', 'Escort', 1990);";

#[test]
fn add_customer_reprompts_until_valid_and_inserts_once() {
    let mut session = session_with(
        RecordingExecutor::default(),
        &["", "Jane", "12x", "12", "Doe", "555-0100", "1 Main St"],
    );

    let customer = session.add_customer().unwrap();
    assert_eq!(customer.id, 12);
    assert_eq!(customer.fname, "Jane");
    assert_eq!(session.console().rejected_count(), 2);

    let executed = session.executor().executed.borrow().clone();
    assert_eq!(executed.len(), 1);
    assert_eq!(executed[0].name(), "insert_customer");
    assert_eq!(
        executed[0].params(),
        &[
            Value::Integer(12),
            Value::Text("Jane".to_string()),
            Value::Text("Doe".to_string()),
            Value::Text("555-0100".to_string()),
            Value::Text("1 Main St".to_string()),
        ]
    );

    let text = transcript(&mut session);
    assert_eq!(text.matches("Enter customer first name:").count(), 2);
    assert_eq!(text.matches("Enter customer id:").count(), 2);
    assert!(text.contains("invalid input `12x`: expected an integer"));
    assert!(text.contains("\nJane\n"));
}

#[test]
fn add_mechanic_rejects_experience_out_of_range() {
    let mut session = sqlite_session(&["3", "Ann", "Lee", "100", "-1", "12"]);

    let mechanic = session.add_mechanic().unwrap();
    assert_eq!(mechanic.experience, 12);
    assert_eq!(session.console().rejected_count(), 2);
    assert_eq!(
        rows(&session, "SELECT id, fname, lname, experience FROM Mechanic;"),
        vec![vec!["3", "Ann", "Lee", "12"]]
    );
}

#[test]
fn add_car_rejects_old_model_year() {
    let mut session = sqlite_session(&["VIN9", "Saab", "900", "1969", "1987"]);

    let car = session.add_car().unwrap();
    assert_eq!(car.year, 1987);
    assert_eq!(
        rows(&session, "SELECT vin, make, model, year FROM Car;"),
        vec![vec!["VIN9", "Saab", "900", "1987"]]
    );
    assert!(transcript(&mut session).contains("year must be 1970 or later, got 1969"));
}

#[test]
fn add_car_with_duplicate_vin_leaves_existing_row() {
    let mut session = sqlite_session(&["VIN1", "Saab", "900", "1987"]);
    seed(&session, SEED_CAR);

    let err = session.add_car().unwrap_err();
    assert!(matches!(err, WorkflowError::Statement(_)));
    assert_eq!(
        rows(&session, "SELECT make FROM Car WHERE vin = 'VIN1';"),
        vec![vec!["Ford"]]
    );
}

#[test]
fn workflow_abandoned_when_input_ends() {
    let mut session = session_with(RecordingExecutor::default(), &["Jane", "12"]);

    let err = session.add_customer().unwrap_err();
    assert!(matches!(err, WorkflowError::Input(InputError::Closed)));
    assert!(session.executor().executed.borrow().is_empty());
}

#[test]
fn service_request_for_unknown_customer_registers_them_first() {
    let mut session = sqlite_session(&[
        "Doe",
        "Jane",
        "5",
        "555-0100",
        "1 Main St",
        "VIN1",
        "brakes squeal",
        "42000",
        "100",
        "20240105",
        "7",
    ]);
    seed(&session, SEED_CAR);

    let request = session.insert_service_request().unwrap();
    assert_eq!(request.customer_id, 5);

    let text = transcript(&mut session);
    let register = text.find("Person is not registered").unwrap();
    let first_name = text.find("Enter customer first name:").unwrap();
    let vin = text.find("Enter car VIN:").unwrap();
    assert!(register < first_name && first_name < vin);
    assert_eq!(text.matches("Enter customer last name:").count(), 1);

    assert_eq!(
        rows(&session, "SELECT id, fname, lname FROM Customer;"),
        vec![vec!["5", "Jane", "Doe"]]
    );
    assert_eq!(
        rows(
            &session,
            "SELECT rid, customer_id, car_vin, date, odometer, complain FROM Service_Request;"
        ),
        vec![vec!["100", "5", "VIN1", "20240105", "42000", "brakes squeal"]]
    );
    assert_eq!(
        rows(&session, "SELECT ownership_id, customer_id, car_vin FROM Owns;"),
        vec![vec!["7", "5", "VIN1"]]
    );
}

#[test]
fn service_request_with_single_match_uses_existing_customer() {
    let mut session = sqlite_session(&["Doe", "VIN1", "oil leak", "1000", "101", "20240201", "8"]);
    seed(
        &session,
        "INSERT INTO Customer VALUES (4, 'Ann', 'Doe', '555', '2 Elm St');",
    );
    seed(&session, SEED_CAR);

    let request = session.insert_service_request().unwrap();
    assert_eq!(request.customer_id, 4);
    assert!(!transcript(&mut session).contains("Enter customer first name:"));
    assert_eq!(rows(&session, "SELECT COUNT(*) FROM Customer;"), vec![vec!["1"]]);
}

#[test]
fn service_request_with_several_matches_asks_which_customer() {
    let mut session = sqlite_session(&[
        "Doe", "3", "2", "VIN1", "noise", "1000", "200", "20240101", "9",
    ]);
    seed(
        &session,
        "INSERT INTO Customer VALUES (1, 'Ann', 'Doe', '555-1', '1 Elm St');
         INSERT INTO Customer VALUES (2, 'Bob', 'Doe', '555-2', '2 Elm St');",
    );
    seed(&session, SEED_CAR);

    let request = session.insert_service_request().unwrap();
    assert_eq!(request.customer_id, 2);

    let text = transcript(&mut session);
    assert!(text.contains("1. 1\tAnn\tDoe"));
    assert!(text.contains("2. 2\tBob\tDoe"));
    assert!(text.contains("choice must be between 1 and 2"));
    assert_eq!(
        rows(&session, "SELECT customer_id FROM Service_Request WHERE rid = 200;"),
        vec![vec!["2"]]
    );
}

#[test]
fn service_request_for_unknown_car_is_reported_without_ownership() {
    let mut session = sqlite_session(&["Doe", "NOPE", "noise", "10", "300", "20240101", "11"]);
    seed(
        &session,
        "INSERT INTO Customer VALUES (1, 'Ann', 'Doe', '555-1', '1 Elm St');",
    );

    let err = session.insert_service_request().unwrap_err();
    assert!(matches!(err, WorkflowError::Statement(_)));
    assert_eq!(rows(&session, "SELECT COUNT(*) FROM Service_Request;"), vec![vec!["0"]]);
    assert_eq!(rows(&session, "SELECT COUNT(*) FROM Owns;"), vec![vec!["0"]]);
}

#[test]
fn repeat_visit_for_same_car_keeps_one_ownership_link() {
    let mut session = sqlite_session(&[
        "Doe", "VIN1", "brakes", "1000", "11", "20240101", "21", // first visit
        "Doe", "VIN1", "noise", "2000", "12", "20240301",
    ]);
    seed(
        &session,
        "INSERT INTO Customer VALUES (1, 'Ann', 'Doe', '555-1', '1 Elm St');",
    );
    seed(&session, SEED_CAR);

    session.insert_service_request().unwrap();
    session.insert_service_request().unwrap();

    assert_eq!(
        rows(&session, "SELECT ownership_id, customer_id, car_vin FROM Owns;"),
        vec![vec!["21", "1", "VIN1"]]
    );
    assert_eq!(
        rows(&session, "SELECT rid FROM Service_Request ORDER BY rid;"),
        vec![vec!["11"], vec!["12"]]
    );
    let text = transcript(&mut session);
    assert_eq!(text.matches("Enter ownership id:").count(), 1);
    assert!(text.contains("Car is already linked to this customer."));
}

#[test]
fn failed_ownership_link_reports_saved_request() {
    let mut session = sqlite_session(&["4", "Doe", "VIN1", "noise", "10", "300", "20240101", "5", "11"]);
    seed(
        &session,
        "INSERT INTO Customer VALUES (1, 'Ann', 'Doe', '555-1', '1 Elm St');
         INSERT INTO Car VALUES ('VIN2', 'Saab', '900', 1999);
         INSERT INTO Owns VALUES (5, 1, 'VIN2');",
    );
    seed(&session, SEED_CAR);

    session.run().unwrap();

    let text = transcript(&mut session);
    assert!(text.contains(
        "insert_service_request failed: service request 300 was saved, but the next step failed: statement rejected by store"
    ));
    assert!(!text.contains("Ownership recorded."));
    assert_eq!(rows(&session, "SELECT rid FROM Service_Request;"), vec![vec!["300"]]);
    assert_eq!(rows(&session, "SELECT COUNT(*) FROM Owns;"), vec![vec!["1"]]);
}

#[test]
fn partial_write_error_names_saved_record() {
    let mut session = sqlite_session(&["Doe", "VIN1", "noise", "10", "301", "20240101", "5"]);
    seed(
        &session,
        "INSERT INTO Customer VALUES (1, 'Ann', 'Doe', '555-1', '1 Elm St');
         INSERT INTO Car VALUES ('VIN2', 'Saab', '900', 1999);
         INSERT INTO Owns VALUES (5, 1, 'VIN2');",
    );
    seed(&session, SEED_CAR);

    let err = session.insert_service_request().unwrap_err();
    assert!(matches!(
        &err,
        WorkflowError::PartialWrite { saved, .. } if saved == "service request 301"
    ));
}

fn seed_open_request(session: &common::Scripted<mechanic_shop_core::SqliteExecutor>) {
    seed(
        session,
        "INSERT INTO Customer VALUES (1, 'Ann', 'Doe', '555-1', '1 Elm St');
         INSERT INTO Car VALUES ('VIN1', 'Ford', 'Escort', 1990);
         INSERT INTO Mechanic VALUES (3, 'Max', 'Wrench', 20);
         INSERT INTO Service_Request VALUES (100, 1, 'VIN1', 20240105, 42000, 'brakes');",
    );
}

#[test]
fn close_service_request_validates_each_step() {
    let mut session = sqlite_session(&[
        "999",
        "100",
        "42",
        "3",
        "1",
        "20240101",
        "20240110",
        "replaced pads",
        "0",
        "250",
    ]);
    seed_open_request(&session);

    let closing = session.close_service_request().unwrap();
    assert_eq!(closing.bill, 250);

    let text = transcript(&mut session);
    assert!(text.contains("No service request with id 999."));
    assert!(text.contains("No mechanic with id 42."));
    assert!(text.contains("date must be 20240105 or later, got 20240101"));
    assert!(text.contains("bill must be greater than 0, got 0"));
    assert_eq!(
        rows(
            &session,
            "SELECT wid, rid, mid, date, comment, bill FROM Closed_Request;"
        ),
        vec![vec!["1", "100", "3", "20240110", "replaced pads", "250"]]
    );
}

#[test]
fn closed_request_cannot_be_closed_again() {
    let mut session = sqlite_session(&["100"]);
    seed_open_request(&session);
    seed(
        &session,
        "INSERT INTO Closed_Request VALUES (1, 100, 3, 20240110, 'done', 80);",
    );

    let err = session.close_service_request().unwrap_err();
    assert!(matches!(err, WorkflowError::Input(InputError::Closed)));
    assert!(transcript(&mut session).contains("Service request 100 is already closed."));
    assert_eq!(rows(&session, "SELECT COUNT(*) FROM Closed_Request;"), vec![vec!["1"]]);
}
