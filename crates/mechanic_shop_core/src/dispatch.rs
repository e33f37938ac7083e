//! Main menu loop.
//!
//! # Responsibility
//! - Render the eleven-entry menu and read a numeric choice.
//! - Route the choice to a workflow or a canned report.
//! - Report workflow failures and keep the session running.
//!
//! # Invariants
//! - A number that matches no entry is ignored and the menu is shown again.
//! - Only the exit entry, end of input, or a console I/O failure stops the loop.

use crate::console::{accept, integer, rule, InputError, InputResult, Rejection};
use crate::exec::StatementExecutor;
use crate::model::rules::require_positive;
use crate::report::Report;
use crate::session::Session;
use crate::workflow::{WorkflowError, WorkflowResult};
use log::{debug, info, warn};
use std::io::{BufRead, Write};

/// Menu lines in display order; entry `n` is at index `n - 1`.
pub const MENU: [&str; 11] = [
    "1. AddCustomer",
    "2. AddMechanic",
    "3. AddCar",
    "4. InsertServiceRequest",
    "5. CloseServiceRequest",
    "6. ListCustomersWithBillLessThan100",
    "7. ListCustomersWithMoreThan20Cars",
    "8. ListCarsBefore1995With50000Milles",
    "9. ListKCarsWithTheMostServices",
    "10. ListCustomersInDescendingOrderOfTheirTotalBill",
    "11. < EXIT",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddCustomer,
    AddMechanic,
    AddCar,
    InsertServiceRequest,
    CloseServiceRequest,
    Report(Report),
    Exit,
}

impl MenuChoice {
    /// Maps a menu number to its entry, `None` for anything unlisted.
    pub fn from_number(number: i64) -> Option<Self> {
        let choice = match number {
            1 => Self::AddCustomer,
            2 => Self::AddMechanic,
            3 => Self::AddCar,
            4 => Self::InsertServiceRequest,
            5 => Self::CloseServiceRequest,
            6..=10 => Self::Report(Report::ALL[(number - 6) as usize]),
            11 => Self::Exit,
            _ => return None,
        };
        Some(choice)
    }

    fn label(self) -> &'static str {
        match self {
            Self::AddCustomer => "add_customer",
            Self::AddMechanic => "add_mechanic",
            Self::AddCar => "add_car",
            Self::InsertServiceRequest => "insert_service_request",
            Self::CloseServiceRequest => "close_service_request",
            Self::Report(_) => "report",
            Self::Exit => "exit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Running,
    Exiting,
}

impl<E: StatementExecutor, R: BufRead, W: Write> Session<E, R, W> {
    /// Runs the menu loop until the operator exits or input ends.
    pub fn run(&mut self) -> InputResult<()> {
        info!("event=session_start module=dispatch status=ok session_id={}", self.id());
        while self.step()? == DispatchState::Running {}
        info!("event=session_end module=dispatch status=ok session_id={}", self.id());
        Ok(())
    }

    /// Renders the menu, reads one choice and acts on it.
    pub fn step(&mut self) -> InputResult<DispatchState> {
        self.render_menu()?;
        let number = match self.read_choice() {
            Ok(number) => number,
            Err(InputError::Closed) => return Ok(DispatchState::Exiting),
            Err(err) => return Err(err),
        };

        let Some(choice) = MenuChoice::from_number(number) else {
            debug!("event=menu_choice module=dispatch status=ignored");
            return Ok(DispatchState::Running);
        };
        if choice == MenuChoice::Exit {
            return Ok(DispatchState::Exiting);
        }

        let outcome = self.perform(choice);
        self.settle(choice, outcome)
    }

    fn render_menu(&mut self) -> InputResult<()> {
        self.console.say("MAIN MENU")?;
        self.console.say("---------")?;
        for line in MENU {
            self.console.say(line)?;
        }
        Ok(())
    }

    fn read_choice(&mut self) -> InputResult<i64> {
        self.console.prompt_field(
            "Please make your choice:",
            |line: &str| {
                integer(line).map_err(|_| Rejection::Parse {
                    input: line.to_string(),
                    expected: "a menu number",
                })
            },
            accept,
        )
    }

    fn perform(&mut self, choice: MenuChoice) -> WorkflowResult<()> {
        match choice {
            MenuChoice::AddCustomer => self.add_customer().map(drop),
            MenuChoice::AddMechanic => self.add_mechanic().map(drop),
            MenuChoice::AddCar => self.add_car().map(drop),
            MenuChoice::InsertServiceRequest => self.insert_service_request().map(drop),
            MenuChoice::CloseServiceRequest => self.close_service_request().map(drop),
            MenuChoice::Report(report) => self.print_report(report),
            MenuChoice::Exit => Ok(()),
        }
    }

    /// Prints one canned report followed by its row count.
    pub fn print_report(&mut self, report: Report) -> WorkflowResult<()> {
        self.console.say(report.title())?;
        let limit = if report.takes_limit() {
            self.console.prompt_field(
                "Enter number of cars (k):",
                integer,
                rule(|value: i64| require_positive("k", value)),
            )?
        } else {
            0
        };

        let count = self
            .executor
            .query_print(&report.statement(limit), self.console.output())?;
        self.console.say(format!("{count} row(s)"))?;
        Ok(())
    }

    fn settle(
        &mut self,
        choice: MenuChoice,
        outcome: WorkflowResult<()>,
    ) -> InputResult<DispatchState> {
        match outcome {
            Ok(()) => Ok(DispatchState::Running),
            Err(WorkflowError::Input(InputError::Closed)) => {
                info!(
                    "event=workflow module=dispatch status=abandoned workflow={} reason=input_closed",
                    choice.label()
                );
                Ok(DispatchState::Exiting)
            }
            Err(WorkflowError::Input(err)) => Err(err),
            Err(err) => {
                warn!(
                    "event=workflow module=dispatch status=error workflow={} error={}",
                    choice.label(),
                    err
                );
                self.console
                    .say(format!("{} failed: {err}", choice.label()))?;
                Ok(DispatchState::Running)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MenuChoice, MENU};
    use crate::report::Report;

    #[test]
    fn menu_numbers_map_to_entries() {
        assert_eq!(MenuChoice::from_number(1), Some(MenuChoice::AddCustomer));
        assert_eq!(
            MenuChoice::from_number(9),
            Some(MenuChoice::Report(Report::TopCarsByServiceCount))
        );
        assert_eq!(MenuChoice::from_number(11), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::from_number(0), None);
        assert_eq!(MenuChoice::from_number(99), None);
    }

    #[test]
    fn menu_lists_eleven_numbered_entries() {
        for (index, line) in MENU.iter().enumerate() {
            assert!(line.starts_with(&format!("{}. ", index + 1)));
        }
    }
}
