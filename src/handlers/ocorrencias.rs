// src/handlers/ocorrencias.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::produtividade::FiltroItens,
    middleware::contexto::{ExigirContexto, ListaOcorrencia},
    models::ocorrencia::ItemOcorrencia,
};

// ---
// Payload: CriarItemOcorrencia
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriarOcorrenciaPayload {
    #[serde(default)]
    pub id_relatorio: String,
    /// Quando omitido, vem do contexto da navegação (parâmetro idAtividade).
    #[serde(default)]
    pub id_atividade: String,
    pub cod_ocor: i64,
    pub nome_ocorrencia: Option<String>,
    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero."))]
    pub qtd_ocor: i64,
    pub data: Option<DateTime<Utc>>,
}

// ---
// Payload: AtualizarItemOcorrencia (mescla rasa)
// ---
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarOcorrenciaPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cod_ocor: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome_ocorrencia: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero."))]
    pub qtd_ocor: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<DateTime<Utc>>,
}

// GET /api/item-ocorrencia
#[utoipa::path(
    get,
    path = "/api/item-ocorrencia",
    tag = "Ocorrências",
    params(
        ("idAtividade" = Option<String>, Query, description = "Itens de uma atividade"),
        ("idRelatorio" = Option<String>, Query, description = "Itens de um relatório")
    ),
    responses((status = 200, description = "Itens de ocorrência", body = Vec<ItemOcorrencia>)),
    security(("api_jwt" = []))
)]
pub async fn list_ocorrencias(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroItens>,
) -> Result<impl IntoResponse, AppError> {
    let itens = if let Some(id_atividade) = &filtro.id_atividade {
        app_state.ocorrencias.get_by_atividade(id_atividade)
    } else if let Some(id_relatorio) = &filtro.id_relatorio {
        app_state.ocorrencias.get_by_relatorio(id_relatorio)
    } else {
        app_state.ocorrencias.get_all()
    };

    Ok(Json(itens))
}

// POST /api/item-ocorrencia?idAtividade=...
// Mesmo guarda de contexto dos itens de produtividade.
#[utoipa::path(
    post,
    path = "/api/item-ocorrencia",
    tag = "Ocorrências",
    params(("idAtividade" = String, Query, description = "Atividade dona do item (contexto obrigatório)")),
    request_body = CriarOcorrenciaPayload,
    responses(
        (status = 201, description = "Item de ocorrência criado", body = ItemOcorrencia),
        (status = 303, description = "Sem contexto de atividade; redirecionado para a lista"),
        (status = 400, description = "Payload inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_ocorrencia(
    State(app_state): State<AppState>,
    contexto: ExigirContexto<ListaOcorrencia>,
    Json(payload): Json<CriarOcorrenciaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // O formulário preenche a FK a partir do contexto da navegação
    let id_atividade = if payload.id_atividade.trim().is_empty() {
        contexto.id_atividade
    } else {
        payload.id_atividade
    };

    let item = ItemOcorrencia {
        id_ocorrencia: String::new(),
        id_relatorio: payload.id_relatorio,
        id_atividade,
        cod_ocor: payload.cod_ocor,
        nome_ocorrencia: payload.nome_ocorrencia,
        qtd_ocor: payload.qtd_ocor,
        data: payload.data.or_else(|| Some(Utc::now())),
        created_at: None,
        updated_at: None,
    };

    let criado = app_state.ocorrencias.create(item).await?;
    Ok((StatusCode::CREATED, Json(criado)))
}

// PUT /api/item-ocorrencia/{id}
#[utoipa::path(
    put,
    path = "/api/item-ocorrencia/{id}",
    tag = "Ocorrências",
    params(("id" = String, Path, description = "Identificador do item")),
    request_body = AtualizarOcorrenciaPayload,
    responses(
        (status = 200, description = "Item atualizado", body = ItemOcorrencia),
        (status = 404, description = "Item não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_ocorrencia(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<AtualizarOcorrenciaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let parcial = serde_json::to_value(&payload)?;
    let atualizou = app_state.ocorrencias.update(&id, parcial).await?;
    if !atualizou {
        return Err(AppError::NaoEncontrado);
    }

    let item = app_state
        .ocorrencias
        .get_by_id(&id)
        .ok_or(AppError::NaoEncontrado)?;
    Ok(Json(item))
}

// DELETE /api/item-ocorrencia/{id}
#[utoipa::path(
    delete,
    path = "/api/item-ocorrencia/{id}",
    tag = "Ocorrências",
    params(("id" = String, Path, description = "Identificador do item")),
    responses(
        (status = 204, description = "Item excluído"),
        (status = 404, description = "Item não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_ocorrencia(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let removeu = app_state.ocorrencias.delete(&id).await?;
    if !removeu {
        return Err(AppError::NaoEncontrado);
    }
    Ok(StatusCode::NO_CONTENT)
}
