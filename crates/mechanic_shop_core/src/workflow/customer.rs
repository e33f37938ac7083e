use super::WorkflowResult;
use crate::console::InputResult;
use crate::exec::StatementExecutor;
use crate::model::Customer;
use crate::repo::shop_statements::insert_customer;
use crate::session::Session;
use log::info;
use std::io::{BufRead, Write};

impl<E: StatementExecutor, R: BufRead, W: Write> Session<E, R, W> {
    /// Registers a new customer.
    ///
    /// Prompts first name, id, last name, phone and address, then issues one
    /// insert.
    pub fn add_customer(&mut self) -> WorkflowResult<Customer> {
        let customer = self.collect_customer(None)?;
        self.persist_customer(&customer)?;
        Ok(customer)
    }

    /// Collects a customer record; a known last name skips that prompt.
    pub(super) fn collect_customer(&mut self, known_lname: Option<String>) -> InputResult<Customer> {
        let console = &mut self.console;
        let fname = console.prompt_text("Enter customer first name:", "fname")?;
        let id = console.prompt_id("Enter customer id:", "id")?;
        let lname = match known_lname {
            Some(lname) => lname,
            None => console.prompt_text("Enter customer last name:", "lname")?,
        };
        let phone = console.prompt_text("Enter customer phone number:", "phone")?;
        let address = console.prompt_text("Enter customer address:", "address")?;

        Ok(Customer {
            id,
            fname,
            lname,
            phone,
            address,
        })
    }

    pub(super) fn persist_customer(&mut self, customer: &Customer) -> WorkflowResult<()> {
        let stmt = insert_customer(customer)?;
        self.executor.execute(&stmt)?;
        info!(
            "event=record_created module=workflow status=ok entity=customer session_id={}",
            self.id()
        );
        self.console.say("Customer added.")?;
        Ok(())
    }
}
