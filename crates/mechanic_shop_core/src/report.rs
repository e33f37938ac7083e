//! Canned reports printed straight from the menu.
//!
//! Statements are fixed text; only the top-K report binds a parameter.

use crate::exec::Statement;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    ClosedRequestsBilledUnder100,
    CustomersWithMoreThan20Cars,
    CarsBefore1995Under50000Miles,
    TopCarsByServiceCount,
    CustomersByTotalBillDesc,
}

impl Report {
    pub const ALL: [Report; 5] = [
        Report::ClosedRequestsBilledUnder100,
        Report::CustomersWithMoreThan20Cars,
        Report::CarsBefore1995Under50000Miles,
        Report::TopCarsByServiceCount,
        Report::CustomersByTotalBillDesc,
    ];

    /// Line printed above the report's rows.
    pub fn title(self) -> &'static str {
        match self {
            Self::ClosedRequestsBilledUnder100 => "Closed requests with a bill under 100:",
            Self::CustomersWithMoreThan20Cars => "Customers owning more than 20 cars:",
            Self::CarsBefore1995Under50000Miles => {
                "Cars built before 1995 serviced with less than 50,000 miles:"
            }
            Self::TopCarsByServiceCount => "Cars with the most service requests:",
            Self::CustomersByTotalBillDesc => "Customers by total bill, highest first:",
        }
    }

    /// Whether the report needs a row limit from the operator.
    pub fn takes_limit(self) -> bool {
        matches!(self, Self::TopCarsByServiceCount)
    }

    /// Builds the report statement; `limit` is bound only by reports that take one.
    pub fn statement(self, limit: i64) -> Statement {
        match self {
            Self::ClosedRequestsBilledUnder100 => Statement::new(
                "report_bill_under_100",
                "SELECT CR.date, CR.comment, CR.bill
                 FROM Closed_Request CR
                 WHERE CR.bill < 100
                 ORDER BY CR.date, CR.wid;",
            ),
            Self::CustomersWithMoreThan20Cars => Statement::new(
                "report_more_than_20_cars",
                "SELECT C.fname, C.lname
                 FROM Customer C
                 WHERE C.id IN (
                     SELECT O.customer_id FROM Owns O
                     GROUP BY O.customer_id
                     HAVING COUNT(DISTINCT O.car_vin) > 20
                 )
                 ORDER BY C.lname, C.fname;",
            ),
            Self::CarsBefore1995Under50000Miles => Statement::new(
                "report_before_1995_under_50000",
                "SELECT DISTINCT C.make, C.model, C.year
                 FROM Car C
                 JOIN Service_Request S ON S.car_vin = C.vin
                 WHERE C.year < 1995 AND S.odometer < 50000
                 ORDER BY C.year, C.make, C.model;",
            ),
            Self::TopCarsByServiceCount => Statement::new(
                "report_top_k_serviced_cars",
                "SELECT C.make, C.model, COUNT(S.rid) AS services
                 FROM Car C
                 JOIN Service_Request S ON S.car_vin = C.vin
                 GROUP BY C.vin, C.make, C.model
                 ORDER BY services DESC, C.vin
                 LIMIT ?1;",
            )
            .bind_int(limit),
            Self::CustomersByTotalBillDesc => Statement::new(
                "report_total_bill_desc",
                "SELECT C.fname, C.lname, SUM(CR.bill) AS total_bill
                 FROM Customer C
                 JOIN Service_Request S ON S.customer_id = C.id
                 JOIN Closed_Request CR ON CR.rid = S.rid
                 GROUP BY C.id, C.fname, C.lname
                 ORDER BY total_bill DESC, C.id;",
            ),
        }
    }
}
