// src/handlers/tabelas.rs

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
    models::tabelas::{Agente, TabelaAtividade, TabelaOcorrencia, TabelaProdutividade},
};

// As tabelas de apoio compartilham a mesma forma; criar é um "gravar"
// (insere ou substitui) sob o próprio código, como nas telas de cadastro.

// ---
// Payloads
// ---
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct AtualizarTabelaPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct AtualizarAgentePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ativo: Option<bool>,
}

// =========================================================================
//  TABELA DE ATIVIDADES
// =========================================================================

// GET /api/tabela-atividades
#[utoipa::path(
    get,
    path = "/api/tabela-atividades",
    tag = "Tabelas",
    responses((status = 200, description = "Catálogo de atividades", body = Vec<TabelaAtividade>)),
    security(("api_jwt" = []))
)]
pub async fn list_tabela_atividades(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let mut itens: Vec<TabelaAtividade> = app_state.tabela_atividades.list().await?;
    itens.sort_by_key(|i| i.codigo);
    Ok(Json(itens))
}

// POST /api/tabela-atividades
#[utoipa::path(
    post,
    path = "/api/tabela-atividades",
    tag = "Tabelas",
    request_body = TabelaAtividade,
    responses((status = 201, description = "Registro gravado", body = TabelaAtividade)),
    security(("api_jwt" = []))
)]
pub async fn gravar_tabela_atividade(
    State(app_state): State<AppState>,
    Json(item): Json<TabelaAtividade>,
) -> Result<impl IntoResponse, AppError> {
    app_state.tabela_atividades.gravar(item.codigo, &item).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

// PUT /api/tabela-atividades/{codigo}
#[utoipa::path(
    put,
    path = "/api/tabela-atividades/{codigo}",
    tag = "Tabelas",
    params(("codigo" = i64, Path, description = "Código do registro")),
    request_body = AtualizarTabelaPayload,
    responses(
        (status = 200, description = "Registro atualizado"),
        (status = 404, description = "Código não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_tabela_atividade(
    State(app_state): State<AppState>,
    Path(codigo): Path<i64>,
    Json(payload): Json<AtualizarTabelaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let atualizou = app_state
        .tabela_atividades
        .update(codigo, serde_json::to_value(&payload)?)
        .await?;
    if !atualizou {
        return Err(AppError::NaoEncontrado);
    }
    Ok(StatusCode::OK)
}

// DELETE /api/tabela-atividades/{codigo}
#[utoipa::path(
    delete,
    path = "/api/tabela-atividades/{codigo}",
    tag = "Tabelas",
    params(("codigo" = i64, Path, description = "Código do registro")),
    responses((status = 204, description = "Registro excluído")),
    security(("api_jwt" = []))
)]
pub async fn delete_tabela_atividade(
    State(app_state): State<AppState>,
    Path(codigo): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.tabela_atividades.delete(codigo).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =========================================================================
//  TABELA DE PRODUTIVIDADE
// =========================================================================

// GET /api/tabela-produtividade
#[utoipa::path(
    get,
    path = "/api/tabela-produtividade",
    tag = "Tabelas",
    responses((status = 200, description = "Catálogo de produtividade", body = Vec<TabelaProdutividade>)),
    security(("api_jwt" = []))
)]
pub async fn list_tabela_produtividade(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let mut itens: Vec<TabelaProdutividade> = app_state.tabela_produtividade.list().await?;
    itens.sort_by_key(|i| i.codigo);
    Ok(Json(itens))
}

// POST /api/tabela-produtividade
#[utoipa::path(
    post,
    path = "/api/tabela-produtividade",
    tag = "Tabelas",
    request_body = TabelaProdutividade,
    responses((status = 201, description = "Registro gravado", body = TabelaProdutividade)),
    security(("api_jwt" = []))
)]
pub async fn gravar_tabela_produtividade(
    State(app_state): State<AppState>,
    Json(item): Json<TabelaProdutividade>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .tabela_produtividade
        .gravar(item.codigo, &item)
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

// PUT /api/tabela-produtividade/{codigo}
#[utoipa::path(
    put,
    path = "/api/tabela-produtividade/{codigo}",
    tag = "Tabelas",
    params(("codigo" = i64, Path, description = "Código do registro")),
    request_body = AtualizarTabelaPayload,
    responses(
        (status = 200, description = "Registro atualizado"),
        (status = 404, description = "Código não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_tabela_produtividade(
    State(app_state): State<AppState>,
    Path(codigo): Path<i64>,
    Json(payload): Json<AtualizarTabelaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let atualizou = app_state
        .tabela_produtividade
        .update(codigo, serde_json::to_value(&payload)?)
        .await?;
    if !atualizou {
        return Err(AppError::NaoEncontrado);
    }
    Ok(StatusCode::OK)
}

// DELETE /api/tabela-produtividade/{codigo}
#[utoipa::path(
    delete,
    path = "/api/tabela-produtividade/{codigo}",
    tag = "Tabelas",
    params(("codigo" = i64, Path, description = "Código do registro")),
    responses((status = 204, description = "Registro excluído")),
    security(("api_jwt" = []))
)]
pub async fn delete_tabela_produtividade(
    State(app_state): State<AppState>,
    Path(codigo): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.tabela_produtividade.delete(codigo).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =========================================================================
//  TABELA DE OCORRÊNCIAS
// =========================================================================

// GET /api/tabela-ocorrencias
#[utoipa::path(
    get,
    path = "/api/tabela-ocorrencias",
    tag = "Tabelas",
    responses((status = 200, description = "Catálogo de ocorrências", body = Vec<TabelaOcorrencia>)),
    security(("api_jwt" = []))
)]
pub async fn list_tabela_ocorrencias(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let mut itens: Vec<TabelaOcorrencia> = app_state.tabela_ocorrencias.list().await?;
    itens.sort_by_key(|i| i.codigo);
    Ok(Json(itens))
}

// POST /api/tabela-ocorrencias
#[utoipa::path(
    post,
    path = "/api/tabela-ocorrencias",
    tag = "Tabelas",
    request_body = TabelaOcorrencia,
    responses((status = 201, description = "Registro gravado", body = TabelaOcorrencia)),
    security(("api_jwt" = []))
)]
pub async fn gravar_tabela_ocorrencia(
    State(app_state): State<AppState>,
    Json(item): Json<TabelaOcorrencia>,
) -> Result<impl IntoResponse, AppError> {
    app_state.tabela_ocorrencias.gravar(item.codigo, &item).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

// PUT /api/tabela-ocorrencias/{codigo}
#[utoipa::path(
    put,
    path = "/api/tabela-ocorrencias/{codigo}",
    tag = "Tabelas",
    params(("codigo" = i64, Path, description = "Código do registro")),
    request_body = AtualizarTabelaPayload,
    responses(
        (status = 200, description = "Registro atualizado"),
        (status = 404, description = "Código não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_tabela_ocorrencia(
    State(app_state): State<AppState>,
    Path(codigo): Path<i64>,
    Json(payload): Json<AtualizarTabelaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let atualizou = app_state
        .tabela_ocorrencias
        .update(codigo, serde_json::to_value(&payload)?)
        .await?;
    if !atualizou {
        return Err(AppError::NaoEncontrado);
    }
    Ok(StatusCode::OK)
}

// DELETE /api/tabela-ocorrencias/{codigo}
#[utoipa::path(
    delete,
    path = "/api/tabela-ocorrencias/{codigo}",
    tag = "Tabelas",
    params(("codigo" = i64, Path, description = "Código do registro")),
    responses((status = 204, description = "Registro excluído")),
    security(("api_jwt" = []))
)]
pub async fn delete_tabela_ocorrencia(
    State(app_state): State<AppState>,
    Path(codigo): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.tabela_ocorrencias.delete(codigo).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =========================================================================
//  AGENTES
// =========================================================================

// GET /api/agentes
#[utoipa::path(
    get,
    path = "/api/agentes",
    tag = "Agentes",
    responses((status = 200, description = "Agentes cadastrados", body = Vec<Agente>)),
    security(("api_jwt" = []))
)]
pub async fn list_agentes(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let mut agentes: Vec<Agente> = app_state.agentes.list().await?;
    agentes.sort_by_key(|a| a.matricula);
    Ok(Json(agentes))
}

// POST /api/agentes
#[utoipa::path(
    post,
    path = "/api/agentes",
    tag = "Agentes",
    request_body = Agente,
    responses((status = 201, description = "Agente gravado", body = Agente)),
    security(("api_jwt" = []))
)]
pub async fn gravar_agente(
    State(app_state): State<AppState>,
    Json(agente): Json<Agente>,
) -> Result<impl IntoResponse, AppError> {
    app_state.agentes.gravar(agente.matricula, &agente).await?;
    Ok((StatusCode::CREATED, Json(agente)))
}

// PUT /api/agentes/{matricula}
#[utoipa::path(
    put,
    path = "/api/agentes/{matricula}",
    tag = "Agentes",
    params(("matricula" = i64, Path, description = "Matrícula do agente")),
    request_body = AtualizarAgentePayload,
    responses(
        (status = 200, description = "Agente atualizado"),
        (status = 404, description = "Matrícula não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_agente(
    State(app_state): State<AppState>,
    Path(matricula): Path<i64>,
    Json(payload): Json<AtualizarAgentePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let atualizou = app_state
        .agentes
        .update(matricula, serde_json::to_value(&payload)?)
        .await?;
    if !atualizou {
        return Err(AppError::NaoEncontrado);
    }
    Ok(StatusCode::OK)
}

// DELETE /api/agentes/{matricula}
#[utoipa::path(
    delete,
    path = "/api/agentes/{matricula}",
    tag = "Agentes",
    params(("matricula" = i64, Path, description = "Matrícula do agente")),
    responses((status = 204, description = "Agente excluído")),
    security(("api_jwt" = []))
)]
pub async fn delete_agente(
    State(app_state): State<AppState>,
    Path(matricula): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.agentes.delete(matricula).await?;
    Ok(StatusCode::NO_CONTENT)
}
