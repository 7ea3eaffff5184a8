// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::UsuarioAutenticado,
    models::usuario::{AuthResponse, LoginPayload, UsuarioPublico},
};

// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Login bem-sucedido", body = AuthResponse),
        (status = 401, description = "Credenciais inválidas ou usuário inativo")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let (token, usuario) = app_state
        .auth_service
        .login(payload.matricula, &payload.senha)
        .await?;

    Ok((
        StatusCode::OK,
        Json(AuthResponse {
            token,
            usuario: usuario.into(),
        }),
    ))
}

// GET /api/auth/me
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Usuário autenticado", body = UsuarioPublico),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(usuario: UsuarioAutenticado) -> impl IntoResponse {
    Json(UsuarioPublico::from(usuario.0))
}
