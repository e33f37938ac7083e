use super::WorkflowResult;
use crate::console::{integer, rule};
use crate::exec::StatementExecutor;
use crate::model::rules::require_model_year;
use crate::model::Car;
use crate::repo::shop_statements::insert_car;
use crate::session::Session;
use log::info;
use std::io::{BufRead, Write};

impl<E: StatementExecutor, R: BufRead, W: Write> Session<E, R, W> {
    /// Registers a car: VIN, make, model, model year.
    pub fn add_car(&mut self) -> WorkflowResult<Car> {
        let console = &mut self.console;
        let vin = console.prompt_text("Enter car VIN:", "vin")?;
        let make = console.prompt_text("Enter car make:", "make")?;
        let model = console.prompt_text("Enter car model:", "model")?;
        let year = console.prompt_field("Enter car year:", integer, rule(require_model_year))?;

        let car = Car {
            vin,
            make,
            model,
            year,
        };
        self.executor.execute(&insert_car(&car)?)?;
        info!(
            "event=record_created module=workflow status=ok entity=car session_id={}",
            self.id()
        );
        self.console.say("Car added.")?;
        Ok(car)
    }
}
