// src/handlers/usuarios.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::UsuarioAutenticado,
    models::usuario::{Perfil, Usuario, UsuarioPublico},
};

// Gestão de usuários é tela de administrador
fn exigir_admin(usuario: &Usuario) -> Result<(), AppError> {
    if usuario.perfil != Perfil::Administrador {
        return Err(AppError::AcessoNegado);
    }
    Ok(())
}

// ---
// Payload: CriarUsuario
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriarUsuarioPayload {
    pub matricula: i64,
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub senha: String,
    pub perfil: Perfil,
    #[serde(default = "ativo_padrao")]
    pub ativo: bool,
}

fn ativo_padrao() -> bool {
    true
}

// ---
// Payload: AtualizarUsuario
// A senha nunca entra na mescla direta: ela é hasheada pelo serviço.
// ---
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarUsuarioPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: Option<String>,
    #[serde(skip_serializing)]
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub senha: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perfil: Option<Perfil>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ativo: Option<bool>,
}

// GET /api/usuarios
#[utoipa::path(
    get,
    path = "/api/usuarios",
    tag = "Usuários",
    responses(
        (status = 200, description = "Usuários cadastrados", body = Vec<UsuarioPublico>),
        (status = 403, description = "Perfil sem acesso")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_usuarios(
    State(app_state): State<AppState>,
    usuario: UsuarioAutenticado,
) -> Result<impl IntoResponse, AppError> {
    exigir_admin(&usuario.0)?;

    let usuarios: Vec<UsuarioPublico> = app_state
        .usuario_service
        .list()
        .await?
        .into_iter()
        .map(UsuarioPublico::from)
        .collect();
    Ok(Json(usuarios))
}

// POST /api/usuarios
#[utoipa::path(
    post,
    path = "/api/usuarios",
    tag = "Usuários",
    request_body = CriarUsuarioPayload,
    responses(
        (status = 201, description = "Usuário criado", body = UsuarioPublico),
        (status = 403, description = "Perfil sem acesso"),
        (status = 409, description = "Matrícula já cadastrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_usuario(
    State(app_state): State<AppState>,
    usuario: UsuarioAutenticado,
    Json(payload): Json<CriarUsuarioPayload>,
) -> Result<impl IntoResponse, AppError> {
    exigir_admin(&usuario.0)?;
    payload.validate()?;

    let criado = app_state
        .usuario_service
        .create(
            payload.matricula,
            &payload.nome,
            &payload.senha,
            payload.perfil,
            payload.ativo,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(UsuarioPublico::from(criado))))
}

// PUT /api/usuarios/{matricula}
#[utoipa::path(
    put,
    path = "/api/usuarios/{matricula}",
    tag = "Usuários",
    params(("matricula" = i64, Path, description = "Matrícula do usuário")),
    request_body = AtualizarUsuarioPayload,
    responses(
        (status = 200, description = "Usuário atualizado", body = UsuarioPublico),
        (status = 403, description = "Perfil sem acesso"),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_usuario(
    State(app_state): State<AppState>,
    usuario: UsuarioAutenticado,
    Path(matricula): Path<i64>,
    Json(payload): Json<AtualizarUsuarioPayload>,
) -> Result<impl IntoResponse, AppError> {
    exigir_admin(&usuario.0)?;
    payload.validate()?;

    let parcial = serde_json::to_value(&payload)?;
    let atualizou = app_state
        .usuario_service
        .update(matricula, parcial, payload.senha)
        .await?;
    if !atualizou {
        return Err(AppError::UsuarioNaoEncontrado);
    }

    let atualizado = app_state
        .usuario_service
        .get_by_matricula(matricula)
        .await?
        .ok_or(AppError::UsuarioNaoEncontrado)?;
    Ok(Json(UsuarioPublico::from(atualizado)))
}

// DELETE /api/usuarios/{matricula}
#[utoipa::path(
    delete,
    path = "/api/usuarios/{matricula}",
    tag = "Usuários",
    params(("matricula" = i64, Path, description = "Matrícula do usuário")),
    responses(
        (status = 204, description = "Usuário excluído"),
        (status = 403, description = "Perfil sem acesso")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_usuario(
    State(app_state): State<AppState>,
    usuario: UsuarioAutenticado,
    Path(matricula): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    exigir_admin(&usuario.0)?;
    app_state.usuario_service.delete(matricula).await?;
    Ok(StatusCode::NO_CONTENT)
}
