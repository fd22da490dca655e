use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use crate::models::order::{SchoolOrderRecord, SchoolOrderRequest};

/// Invoice numbers are the order's creation instant in unix milliseconds.
pub fn next_invoice_number() -> String {
    format!("INV-{}", Utc::now().timestamp_millis())
}

/// Persists a school order and its line items as one unit: the order row
/// and its tickets commit together or not at all, so a half-written order
/// is never observable. The total is computed here, server-side, from the
/// submitted line items.
pub async fn create_school_order(
    pool: &SqlitePool,
    order: &SchoolOrderRequest,
) -> Result<SchoolOrderRecord, sqlx::Error> {
    let now = Utc::now();
    let total = order.discounted_total();
    let invoice_number = next_invoice_number();

    let mut tx = pool.begin().await?;

    let record: SchoolOrderRecord = sqlx::query_as(
        "INSERT INTO school_orders (school_name, contact_email, total_amount, invoice_number, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?) \
         RETURNING id, school_name, contact_email, total_amount, invoice_number, created_at",
    )
    .bind(&order.school_name)
    .bind(&order.contact_email)
    .bind(total)
    .bind(&invoice_number)
    .bind(now)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    for item in &order.tickets {
        sqlx::query(
            "INSERT INTO order_tickets (order_id, ticket_type, quantity, price, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(record.id)
        .bind(&item.ticket_type)
        .bind(item.quantity)
        .bind(item.price)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    info!(
        invoice = %record.invoice_number,
        total = record.total_amount,
        "School order persisted"
    );
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_number_format() {
        let invoice = next_invoice_number();
        let digits = invoice.strip_prefix("INV-").unwrap();
        assert!(!digits.is_empty());
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
    }
}
