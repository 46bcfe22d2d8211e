use crate::auth::{CredentialsVerifier, SignInForm};
use crate::models::{ActionOutcome, ActionState};
use crate::service::validation::InvoiceForm;
use crate::service::{actions, InvoiceActions};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Serialize;
use std::sync::Arc;

/// 共享状态
#[derive(Clone)]
pub struct AppState {
    pub actions: Arc<InvoiceActions>,
    pub verifier: Arc<dyn CredentialsVerifier>,
}

/// 登录响应体
#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub message: String,
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 成功路径回 303 跳转, 失败路径回传状态 JSON 供表单重渲染
fn outcome_response(outcome: ActionOutcome) -> Response {
    match outcome {
        ActionOutcome::Redirect(path) => Redirect::to(&path).into_response(),
        ActionOutcome::Render(state) => {
            let code = if state.errors.is_some() {
                StatusCode::UNPROCESSABLE_ENTITY
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (code, Json(state)).into_response()
        }
    }
}

/// 创建发票
pub async fn create_invoice(
    State(state): State<AppState>,
    Form(form): Form<InvoiceForm>,
) -> Response {
    let prev = ActionState::default();
    outcome_response(state.actions.create_invoice(&prev, &form).await)
}

/// 更新发票
pub async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<InvoiceForm>,
) -> Response {
    let prev = ActionState::default();
    outcome_response(state.actions.update_invoice(&id, &prev, &form).await)
}

/// 删除发票: 无论成败都回传状态, 调用方留在当前视图
pub async fn delete_invoice(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let action_state = state.actions.delete_invoice(&id).await;
    (StatusCode::OK, Json(action_state)).into_response()
}

/// 凭证登录
pub async fn authenticate(State(state): State<AppState>, Form(form): Form<SignInForm>) -> Response {
    match actions::authenticate(state.verifier.as_ref(), None, &form).await {
        Ok(None) => Redirect::to("/dashboard").into_response(),
        Ok(Some(message)) => {
            (StatusCode::UNAUTHORIZED, Json(SignInResponse { message })).into_response()
        }
        Err(e) => {
            tracing::error!("Sign-in failed: {}", e);
            let response = SignInResponse {
                message: format!("Error: {}", e),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response()
        }
    }
}
