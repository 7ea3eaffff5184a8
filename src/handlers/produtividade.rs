// src/handlers/produtividade.rs

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
    middleware::contexto::{ExigirContexto, ListaProdutividade},
    models::produtividade::ItemProdutividade,
};

// ---
// Payload: CriarItemProdutividade
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriarProdutividadePayload {
    #[serde(default)]
    pub id_relatorio: String,
    /// Quando omitido, vem do contexto da navegação (parâmetro idAtividade).
    #[serde(default)]
    pub id_atividade: String,
    pub cod_prod: i64,
    pub nome_produtividade: Option<String>,
    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero."))]
    pub qtd_prod: i64,
    pub data: Option<DateTime<Utc>>,
}

// ---
// Payload: AtualizarItemProdutividade (mescla rasa)
// ---
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarProdutividadePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cod_prod: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome_produtividade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero."))]
    pub qtd_prod: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiltroItens {
    pub id_atividade: Option<String>,
    pub id_relatorio: Option<String>,
}

// GET /api/item-produtividade
#[utoipa::path(
    get,
    path = "/api/item-produtividade",
    tag = "Produtividade",
    params(
        ("idAtividade" = Option<String>, Query, description = "Itens de uma atividade"),
        ("idRelatorio" = Option<String>, Query, description = "Itens de um relatório")
    ),
    responses((status = 200, description = "Itens de produtividade", body = Vec<ItemProdutividade>)),
    security(("api_jwt" = []))
)]
pub async fn list_produtividade(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroItens>,
) -> Result<impl IntoResponse, AppError> {
    let itens = if let Some(id_atividade) = &filtro.id_atividade {
        app_state.produtividades.get_by_atividade(id_atividade)
    } else if let Some(id_relatorio) = &filtro.id_relatorio {
        app_state.produtividades.get_by_relatorio(id_relatorio)
    } else {
        app_state.produtividades.get_all()
    };

    Ok(Json(itens))
}

// POST /api/item-produtividade?idAtividade=...
// O guarda de contexto exige o idAtividade nos parâmetros de consulta; sem
// ele a requisição é redirecionada para a lista com alert=missingContext.
#[utoipa::path(
    post,
    path = "/api/item-produtividade",
    tag = "Produtividade",
    params(("idAtividade" = String, Query, description = "Atividade dona do item (contexto obrigatório)")),
    request_body = CriarProdutividadePayload,
    responses(
        (status = 201, description = "Item de produtividade criado", body = ItemProdutividade),
        (status = 303, description = "Sem contexto de atividade; redirecionado para a lista"),
        (status = 400, description = "Payload inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_produtividade(
    State(app_state): State<AppState>,
    contexto: ExigirContexto<ListaProdutividade>,
    Json(payload): Json<CriarProdutividadePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // O formulário preenche a FK a partir do contexto da navegação
    let id_atividade = if payload.id_atividade.trim().is_empty() {
        contexto.id_atividade
    } else {
        payload.id_atividade
    };

    let item = ItemProdutividade {
        id_produtividade: String::new(),
        id_relatorio: payload.id_relatorio,
        id_atividade,
        cod_prod: payload.cod_prod,
        nome_produtividade: payload.nome_produtividade,
        qtd_prod: payload.qtd_prod,
        // Garante que exista uma data
        data: payload.data.or_else(|| Some(Utc::now())),
        created_at: None,
        updated_at: None,
    };

    let criado = app_state.produtividades.create(item).await?;
    Ok((StatusCode::CREATED, Json(criado)))
}

// PUT /api/item-produtividade/{id}
#[utoipa::path(
    put,
    path = "/api/item-produtividade/{id}",
    tag = "Produtividade",
    params(("id" = String, Path, description = "Identificador do item")),
    request_body = AtualizarProdutividadePayload,
    responses(
        (status = 200, description = "Item atualizado", body = ItemProdutividade),
        (status = 404, description = "Item não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_produtividade(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<AtualizarProdutividadePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let parcial = serde_json::to_value(&payload)?;
    let atualizou = app_state.produtividades.update(&id, parcial).await?;
    if !atualizou {
        return Err(AppError::NaoEncontrado);
    }

    let item = app_state
        .produtividades
        .get_by_id(&id)
        .ok_or(AppError::NaoEncontrado)?;
    Ok(Json(item))
}

// DELETE /api/item-produtividade/{id}
#[utoipa::path(
    delete,
    path = "/api/item-produtividade/{id}",
    tag = "Produtividade",
    params(("id" = String, Path, description = "Identificador do item")),
    responses(
        (status = 204, description = "Item excluído"),
        (status = 404, description = "Item não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_produtividade(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let removeu = app_state.produtividades.delete(&id).await?;
    if !removeu {
        return Err(AppError::NaoEncontrado);
    }
    Ok(StatusCode::NO_CONTENT)
}
