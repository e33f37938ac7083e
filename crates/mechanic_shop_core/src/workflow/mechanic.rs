use super::WorkflowResult;
use crate::console::{integer, rule};
use crate::exec::StatementExecutor;
use crate::model::rules::require_experience;
use crate::model::Mechanic;
use crate::repo::shop_statements::insert_mechanic;
use crate::session::Session;
use log::info;
use std::io::{BufRead, Write};

impl<E: StatementExecutor, R: BufRead, W: Write> Session<E, R, W> {
    /// Registers a mechanic: id, first name, last name, years of experience.
    pub fn add_mechanic(&mut self) -> WorkflowResult<Mechanic> {
        let console = &mut self.console;
        let id = console.prompt_id("Enter mechanic id:", "id")?;
        let fname = console.prompt_text("Enter mechanic first name:", "fname")?;
        let lname = console.prompt_text("Enter mechanic last name:", "lname")?;
        let experience = console.prompt_field(
            "Enter mechanic years of experience:",
            integer,
            rule(require_experience),
        )?;

        let mechanic = Mechanic {
            id,
            fname,
            lname,
            experience,
        };
        self.executor.execute(&insert_mechanic(&mechanic)?)?;
        info!(
            "event=record_created module=workflow status=ok entity=mechanic session_id={}",
            self.id()
        );
        self.console.say("Mechanic added.")?;
        Ok(mechanic)
    }
}
