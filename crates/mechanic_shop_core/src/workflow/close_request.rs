use super::{int_column, WorkflowError, WorkflowResult};
use crate::console::{integer, rule};
use crate::exec::StatementExecutor;
use crate::model::rules::{require_not_before, require_positive};
use crate::model::ClosedRequest;
use crate::repo::shop_statements::{
    insert_closed_request, mechanic_by_id, parse_request_state, request_status,
};
use crate::session::Session;
use log::info;
use std::io::{BufRead, Write};

impl<E: StatementExecutor, R: BufRead, W: Write> Session<E, R, W> {
    /// Closes an open service request.
    ///
    /// # Contract
    /// - The request must exist and be `Open`; otherwise the id is re-prompted.
    /// - The mechanic must exist; otherwise the id is re-prompted.
    /// - The closing date may not precede the request date and the bill must
    ///   be positive.
    /// - Issues one `Closed_Request` insert, which makes the request `Closed`.
    pub fn close_service_request(&mut self) -> WorkflowResult<ClosedRequest> {
        let (rid, opened_on) = self.prompt_open_request()?;
        let mid = self.prompt_known_mechanic()?;

        let console = &mut self.console;
        let wid = console.prompt_id("Enter closing id:", "wid")?;
        let date = console.prompt_field(
            "Enter closing date:",
            integer,
            rule(move |value: i64| require_not_before("date", value, opened_on)),
        )?;
        let comment = console.prompt_text("Enter closing comment:", "comment")?;
        let bill = console.prompt_field(
            "Enter bill amount:",
            integer,
            rule(|value: i64| require_positive("bill", value)),
        )?;

        let closing = ClosedRequest {
            wid,
            rid,
            mid,
            date,
            comment,
            bill,
        };
        self.executor
            .execute(&insert_closed_request(&closing, opened_on)?)?;
        info!(
            "event=request_closed module=workflow status=ok session_id={}",
            self.id()
        );
        self.console.say(format!("Service request {rid} closed."))?;
        Ok(closing)
    }

    /// Returns the id and opening date of an open request.
    fn prompt_open_request(&mut self) -> WorkflowResult<(i64, i64)> {
        loop {
            let rid = self.console.prompt_id("Enter request id:", "rid")?;
            let rows = self.executor.query_collect(&request_status(rid))?;
            let Some(row) = rows.first() else {
                self.console
                    .say(format!("No service request with id {rid}."))?;
                continue;
            };

            let opened_on = int_column(row, 0, "date")?;
            let state_label = row.get(1).map(String::as_str).unwrap_or_default();
            let state = parse_request_state(state_label).ok_or_else(|| {
                WorkflowError::InvalidData("unknown request state".to_string())
            })?;
            match state.close() {
                Some(_) => return Ok((rid, opened_on)),
                None => self
                    .console
                    .say(format!("Service request {rid} is already closed."))?,
            }
        }
    }

    fn prompt_known_mechanic(&mut self) -> WorkflowResult<i64> {
        loop {
            let mid = self.console.prompt_id("Enter mechanic id:", "mid")?;
            if self.executor.query_count(&mechanic_by_id(mid))? > 0 {
                return Ok(mid);
            }
            self.console.say(format!("No mechanic with id {mid}."))?;
        }
    }
}
