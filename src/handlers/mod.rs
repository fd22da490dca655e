use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db;
use crate::models::order::{SchoolOrderRequest, SchoolOrderResponse};
use crate::utils::error::AppError;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "zoo-api",
    };

    Json(payload).into_response()
}

/// Accepts a school group order, persists it with its line items, and echoes
/// the invoice number and the server-computed total. The submitted client
/// total (if any) is ignored; this side is authoritative.
pub async fn create_school_order(
    State(pool): State<SqlitePool>,
    Json(payload): Json<SchoolOrderRequest>,
) -> Result<Json<SchoolOrderResponse>, AppError> {
    if payload.school_name.trim().is_empty() || payload.contact_email.trim().is_empty() {
        return Err(AppError::Validation(
            "School name and contact email are required".to_string(),
        ));
    }

    let record = db::create_school_order(&pool, &payload).await?;

    Ok(Json(SchoolOrderResponse {
        success: true,
        invoice_number: record.invoice_number,
        total: record.total_amount,
    }))
}
