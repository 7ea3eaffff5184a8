// src/handlers/graficos.rs

use axum::{extract::State, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    models::graficos::GrupoGrafico,
    services::graficos,
};

// As três telas de gráficos consomem o mesmo formato: um grupo por código,
// com o eixo de meses compartilhado e zeros explícitos.

// GET /api/graficos/atividades
#[utoipa::path(
    get,
    path = "/api/graficos/atividades",
    tag = "Gráficos",
    responses((status = 200, description = "Contagem mensal de atividades por código", body = Vec<GrupoGrafico>)),
    security(("api_jwt" = []))
)]
pub async fn graficos_atividades(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let pontos = graficos::pontos_de_atividades(&app_state.atividades.get_all());
    Ok(Json(graficos::montar_grupos_mensais(&pontos)))
}

// GET /api/graficos/produtividade
#[utoipa::path(
    get,
    path = "/api/graficos/produtividade",
    tag = "Gráficos",
    responses((status = 200, description = "Soma mensal de produtividade por código", body = Vec<GrupoGrafico>)),
    security(("api_jwt" = []))
)]
pub async fn graficos_produtividade(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let pontos = graficos::pontos_de_produtividade(&app_state.produtividades.get_all());
    Ok(Json(graficos::montar_grupos_mensais(&pontos)))
}

// GET /api/graficos/ocorrencias
#[utoipa::path(
    get,
    path = "/api/graficos/ocorrencias",
    tag = "Gráficos",
    responses((status = 200, description = "Soma mensal de ocorrências por código", body = Vec<GrupoGrafico>)),
    security(("api_jwt" = []))
)]
pub async fn graficos_ocorrencias(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let pontos = graficos::pontos_de_ocorrencias(&app_state.ocorrencias.get_all());
    Ok(Json(graficos::montar_grupos_mensais(&pontos)))
}
