use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Form, State};
use axum::response::Html;
use tracing::{info, warn};

use crate::form::{parse_submission, FormState};
use crate::render::{self, Outcome};
use crate::UiState;

/// GET / - Empty form with default values.
pub async fn index(State(state): State<Arc<UiState>>) -> Html<String> {
    let form = FormState::defaults(state.catalog);
    Html(render::page(state.catalog, &form, None))
}

/// POST /evaluate - Submit the form to the risk service and show the verdict.
pub async fn evaluate(
    State(state): State<Arc<UiState>>,
    Form(submitted): Form<HashMap<String, String>>,
) -> Html<String> {
    let catalog = state.catalog;
    let form = FormState::from_submission(&submitted, catalog);

    let outcome = match parse_submission(&submitted, catalog) {
        Ok(record) => match state.client.assess(&record).await {
            Ok(verdict) => {
                info!(
                    class = verdict.predicted_class.as_u8(),
                    probability_default = verdict.probability_default,
                    "Assessment received"
                );
                Outcome::Assessed(verdict)
            }
            Err(e) => {
                warn!("Assessment failed: {e}");
                Outcome::from(e)
            }
        },
        Err(errors) => {
            warn!(fields = errors.len(), "Form rejected");
            Outcome::InvalidInput(errors)
        }
    };

    Html(render::page(catalog, &form, Some(&outcome)))
}
