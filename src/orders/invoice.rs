use chrono::NaiveDate;

use crate::models::order::SchoolOrderResponse;
use crate::ticketing::identity::format_long_date;

/// Minimal print-ready invoice document shown after a confirmed order:
/// invoice number, school, date, and the service's authoritative total.
pub fn printable_invoice(
    confirmation: &SchoolOrderResponse,
    school_name: &str,
    date: NaiveDate,
) -> String {
    format!(
        r#"<html>
  <body>
    <h1>Invoice {invoice}</h1>
    <p>School: {school}</p>
    <p>Date: {date}</p>
    <p>Total: CHF {total:.2}</p>
  </body>
</html>
"#,
        invoice = confirmation.invoice_number,
        school = school_name,
        date = format_long_date(date),
        total = confirmation.total,
    )
}
