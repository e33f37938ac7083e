use super::{int_column, WorkflowError, WorkflowResult};
use crate::console::{integer, Rejection};
use crate::exec::StatementExecutor;
use crate::model::{Ownership, ServiceRequest};
use crate::repo::shop_statements::{
    customers_by_last_name, insert_ownership, insert_service_request, ownership_link,
};
use crate::session::Session;
use log::info;
use std::io::{BufRead, Write};

impl<E: StatementExecutor, R: BufRead, W: Write> Session<E, R, W> {
    /// Opens a service request for a customer's car.
    ///
    /// The customer is found by last name. With no match the customer is
    /// registered first; with several matches the operator picks one from a
    /// numbered list. The request insert is followed by an ownership insert
    /// linking the customer to the car, unless that link already exists.
    pub fn insert_service_request(&mut self) -> WorkflowResult<ServiceRequest> {
        let lname = self
            .console
            .prompt_text("Enter customer last name:", "lname")?;
        let customer_id = self.resolve_customer(lname)?;

        let console = &mut self.console;
        let car_vin = console.prompt_text("Enter car VIN:", "car_vin")?;
        let complain = console.prompt_text("Enter car complaint:", "complain")?;
        let odometer = console.prompt_id("Enter odometer reading:", "odometer")?;
        let rid = console.prompt_id("Enter request id:", "rid")?;
        let date = console.prompt_id("Enter service date:", "date")?;

        let already_owned = self
            .executor
            .query_count(&ownership_link(customer_id, &car_vin))?
            > 0;
        let ownership_id = if already_owned {
            self.console.say("Car is already linked to this customer.")?;
            None
        } else {
            Some(
                self.console
                    .prompt_id("Enter ownership id:", "ownership_id")?,
            )
        };

        let request = ServiceRequest {
            rid,
            customer_id,
            car_vin,
            date,
            odometer,
            complain,
        };
        let request_stmt = insert_service_request(&request)?;
        let ownership_stmt = ownership_id
            .map(|ownership_id| {
                insert_ownership(&Ownership {
                    ownership_id,
                    customer_id,
                    car_vin: request.car_vin.clone(),
                })
            })
            .transpose()?;

        self.executor.execute(&request_stmt)?;
        info!(
            "event=record_created module=workflow status=ok entity=service_request session_id={}",
            self.id()
        );
        self.console.say("Service request added.")?;

        let Some(ownership_stmt) = ownership_stmt else {
            return Ok(request);
        };
        if let Err(failed) = self.executor.execute(&ownership_stmt) {
            return Err(WorkflowError::PartialWrite {
                saved: format!("service request {rid}"),
                failed,
            });
        }
        info!(
            "event=record_created module=workflow status=ok entity=ownership session_id={}",
            self.id()
        );
        self.console.say("Ownership recorded.")?;
        Ok(request)
    }

    fn resolve_customer(&mut self, lname: String) -> WorkflowResult<i64> {
        let lookup = customers_by_last_name(&lname);
        let matches = self.executor.query_count(&lookup)?;

        if matches == 0 {
            self.console
                .say("Person is not registered as a customer, please register them:")?;
            let customer = self.collect_customer(Some(lname))?;
            self.persist_customer(&customer)?;
            self.console
                .say("Now you may add service information for the customer:")?;
            return Ok(customer.id);
        }

        let candidates = self.executor.query_collect(&lookup)?;
        let chosen = match candidates.as_slice() {
            [] => {
                return Err(WorkflowError::InvalidData(
                    "customer disappeared between count and lookup".to_string(),
                ))
            }
            [only] => only,
            _ => {
                self.console.say("Several customers share that last name:")?;
                for (position, row) in candidates.iter().enumerate() {
                    self.console
                        .say(format!("{}. {}", position + 1, row.join("\t")))?;
                }
                let count = candidates.len() as i64;
                let choice = self.console.prompt_field(
                    "Select customer number:",
                    integer,
                    move |value: &i64| {
                        if (1..=count).contains(value) {
                            Ok(())
                        } else {
                            Err(Rejection::Predicate(format!(
                                "choice must be between 1 and {count}"
                            )))
                        }
                    },
                )?;
                &candidates[(choice - 1) as usize]
            }
        };

        let customer_id = int_column(chosen, 0, "id")?;
        self.console
            .say(format!("Using customer {}.", chosen.join("\t")))?;
        Ok(customer_id)
    }
}
