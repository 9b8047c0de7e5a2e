use axum::extract::{Extension, Json, Path, State};
use baliquote_core::services::pdf_service::PdfService;
use baliquote_core::{AppState, CurrentAgent};
use baliquote_primitives::error::{ApiError, ApiErrorResponse};
use baliquote_primitives::models::dtos::quote_dto::QuotePdfResponse;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/quotes/{quote_id}/pdf",
    tag = "Quotes",
    summary = "Generate the client-facing PDF",
    description = "Renders the quote, uploads the document to storage and stores its public URL on the quote. \
                   Regenerating replaces the previous file.",
    operation_id = "generateQuotePdf",
    params(("quote_id" = Uuid, Path, description = "Quote ID")),
    responses(
        (status = 200, description = "PDF generated", body = QuotePdfResponse),
        (status = 400, description = "Quote is void or unpriced", body = ApiErrorResponse),
        (status = 404, description = "Quote not found", body = ApiErrorResponse),
        (status = 500, description = "Storage upload failed", body = ApiErrorResponse),
        (status = 502, description = "PDF renderer failed", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn generate_quote_pdf(
    State(state): State<Arc<AppState>>,
    Extension(agent): Extension<CurrentAgent>,
    Path(quote_id): Path<Uuid>,
) -> Result<Json<QuotePdfResponse>, ApiError> {
    Ok(Json(
        PdfService::generate_quote_pdf(&state, &agent.0, quote_id).await?,
    ))
}
