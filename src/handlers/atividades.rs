// src/handlers/atividades.rs

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
    common::error::AppError, config::AppState, models::atividade::ItemAtividade,
};

// ---
// Payload: CriarAtividade
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriarAtividadePayload {
    #[validate(length(min = 1, message = "O campo 'idRelatorio' é obrigatório."))]
    pub id_relatorio: String,
    pub item: i64,
    #[validate(length(min = 1, message = "O acionamento é obrigatório."))]
    pub acionamento: String,
    pub chegada: Option<DateTime<Utc>>,
    pub solucao: Option<DateTime<Utc>>,
    pub saida: Option<DateTime<Utc>>,
    pub cod_atv: i64,
    pub nome_atividade: Option<String>,
    #[validate(range(min = 1, message = "Informe ao menos um agente."))]
    pub qtd_agentes: i64,
    #[validate(length(min = 1, message = "O local é obrigatório."))]
    pub local: String,
    #[serde(default)]
    pub observacoes: String,
    pub data: Option<DateTime<Utc>>,
}

// ---
// Payload: AtualizarAtividade (mescla rasa)
// ---
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarAtividadePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acionamento: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chegada: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solucao: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saida: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cod_atv: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome_atividade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qtd_agentes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiltroAtividades {
    pub id_relatorio: Option<String>,
    pub local: Option<String>,
    pub cod_atv: Option<i64>,
}

// GET /api/item-atividade
#[utoipa::path(
    get,
    path = "/api/item-atividade",
    tag = "Atividades",
    params(
        ("idRelatorio" = Option<String>, Query, description = "Atividades de um relatório"),
        ("local" = Option<String>, Query, description = "Filtro por local (contém)"),
        ("codAtv" = Option<i64>, Query, description = "Filtro por código de atividade")
    ),
    responses((status = 200, description = "Atividades registradas", body = Vec<ItemAtividade>)),
    security(("api_jwt" = []))
)]
pub async fn list_atividades(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroAtividades>,
) -> Result<impl IntoResponse, AppError> {
    let mut atividades = if let Some(id_relatorio) = &filtro.id_relatorio {
        app_state.atividades.get_by_relatorio(id_relatorio)
    } else if let Some(local) = &filtro.local {
        app_state.atividades.get_by_local(local)
    } else if let Some(cod_atv) = filtro.cod_atv {
        app_state.atividades.get_by_cod_atv(cod_atv)
    } else {
        app_state.atividades.get_all()
    };

    // A listagem sai ordenada pelo número sequencial dentro do relatório
    atividades.sort_by_key(|a| a.item);
    Ok(Json(atividades))
}

// POST /api/item-atividade
#[utoipa::path(
    post,
    path = "/api/item-atividade",
    tag = "Atividades",
    request_body = CriarAtividadePayload,
    responses(
        (status = 201, description = "Atividade criada", body = ItemAtividade),
        (status = 400, description = "Payload inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_atividade(
    State(app_state): State<AppState>,
    Json(payload): Json<CriarAtividadePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // A data do turno vem desnormalizada do relatório pai quando não for
    // informada no formulário
    let data = match payload.data {
        Some(data) => Some(data),
        None => app_state
            .relatorios
            .get_by_id(&payload.id_relatorio)
            .and_then(|r| r.data),
    };

    let atividade = ItemAtividade {
        id_atividade: String::new(),
        id_relatorio: payload.id_relatorio,
        item: payload.item,
        acionamento: payload.acionamento,
        chegada: payload.chegada,
        solucao: payload.solucao,
        saida: payload.saida,
        cod_atv: payload.cod_atv,
        nome_atividade: payload.nome_atividade,
        qtd_agentes: payload.qtd_agentes,
        local: payload.local,
        observacoes: payload.observacoes,
        data,
        created_at: None,
        updated_at: None,
    };

    let criada = app_state.atividades.create(atividade).await?;
    Ok((StatusCode::CREATED, Json(criada)))
}

// GET /api/item-atividade/{id}
#[utoipa::path(
    get,
    path = "/api/item-atividade/{id}",
    tag = "Atividades",
    params(("id" = String, Path, description = "Identificador da atividade")),
    responses(
        (status = 200, description = "Atividade encontrada", body = ItemAtividade),
        (status = 404, description = "Atividade não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_atividade(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let atividade = app_state
        .atividades
        .get_by_id(&id)
        .ok_or(AppError::NaoEncontrado)?;
    Ok(Json(atividade))
}

// PUT /api/item-atividade/{id}
#[utoipa::path(
    put,
    path = "/api/item-atividade/{id}",
    tag = "Atividades",
    params(("id" = String, Path, description = "Identificador da atividade")),
    request_body = AtualizarAtividadePayload,
    responses(
        (status = 200, description = "Atividade atualizada", body = ItemAtividade),
        (status = 404, description = "Atividade não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_atividade(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<AtualizarAtividadePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let parcial = serde_json::to_value(&payload)?;
    let atualizou = app_state.atividades.update(&id, parcial).await?;
    if !atualizou {
        return Err(AppError::NaoEncontrado);
    }

    let atividade = app_state
        .atividades
        .get_by_id(&id)
        .ok_or(AppError::NaoEncontrado)?;
    Ok(Json(atividade))
}

// DELETE /api/item-atividade/{id}
// Excluir uma atividade varre antes os seus itens de produtividade e de
// ocorrência.
#[utoipa::path(
    delete,
    path = "/api/item-atividade/{id}",
    tag = "Atividades",
    params(("id" = String, Path, description = "Identificador da atividade")),
    responses(
        (status = 204, description = "Atividade e itens filhos excluídos"),
        (status = 404, description = "Atividade não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_atividade(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let removeu = app_state.cascata.delete_atividade(&id).await?;
    if !removeu {
        return Err(AppError::NaoEncontrado);
    }
    Ok(StatusCode::NO_CONTENT)
}
