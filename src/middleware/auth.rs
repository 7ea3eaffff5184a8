// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::{common::error::AppError, config::AppState, models::usuario::Usuario};

// O middleware em si: valida o Bearer token e injeta o usuário na requisição
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok());

    if let Some(auth_header) = auth_header {
        if let Some(token) = auth_header.strip_prefix("Bearer ") {
            let usuario = app_state.auth_service.validate_token(token).await?;

            // Insere o usuário nos "extensions" da requisição
            request.extensions_mut().insert(usuario);
            return Ok(next.run(request).await);
        }
    }

    Err(AppError::TokenInvalido)
}

// Extrator para obter o usuário autenticado diretamente nos handlers.
// É por aqui que os handlers carimbam criadoPor/modificadoPor.
pub struct UsuarioAutenticado(pub Usuario);

impl<S> FromRequestParts<S> for UsuarioAutenticado
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Usuario>()
            .cloned()
            .map(UsuarioAutenticado)
            .ok_or(AppError::TokenInvalido)
    }
}
