// src/handlers/relatorios.rs

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::UsuarioAutenticado,
    models::{
        relatorio::{RelatorioBase, StatusRelatorio},
        usuario::Perfil,
    },
    services::exportacao,
};

// ---
// Payload: CriarRelatorio
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriarRelatorioPayload {
    #[validate(length(min = 1, message = "A gerência é obrigatória."))]
    pub gerencia: String,
    pub data: Option<DateTime<Utc>>,
    #[validate(length(min = 1, message = "O dia da semana é obrigatório."))]
    pub dia_semana: String,
    #[validate(length(min = 1, message = "O turno é obrigatório."))]
    pub turno: String,
    pub mat1: i64,
    pub mat2: i64,
    pub coord: i64,
    pub superv: i64,
}

// ---
// Payload: AtualizarRelatorio (mescla rasa; só os campos enviados mudam)
// ---
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarRelatorioPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gerencia: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dia_semana: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turno: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mat1: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mat2: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coord: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub superv: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusRelatorio>,
}

#[derive(Debug, Deserialize)]
pub struct FiltroRelatorios {
    pub gerencia: Option<String>,
    pub turno: Option<String>,
    /// Dia exato, no formato YYYY-MM-DD
    pub data: Option<NaiveDate>,
}

// GET /api/relatorio-base
#[utoipa::path(
    get,
    path = "/api/relatorio-base",
    tag = "Relatórios",
    params(
        ("gerencia" = Option<String>, Query, description = "Filtro por gerência (contém)"),
        ("turno" = Option<String>, Query, description = "Filtro por turno (igualdade)"),
        ("data" = Option<String>, Query, description = "Filtro por dia (YYYY-MM-DD)")
    ),
    responses((status = 200, description = "Relatórios cadastrados", body = Vec<RelatorioBase>)),
    security(("api_jwt" = []))
)]
pub async fn list_relatorios(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroRelatorios>,
) -> Result<impl IntoResponse, AppError> {
    let relatorios = if let Some(gerencia) = &filtro.gerencia {
        app_state.relatorios.get_by_gerencia(gerencia)
    } else if let Some(turno) = &filtro.turno {
        app_state.relatorios.get_by_turno(turno)
    } else if let Some(dia) = filtro.data {
        app_state.relatorios.get_by_data(dia)
    } else {
        app_state.relatorios.get_all()
    };

    Ok(Json(relatorios))
}

// POST /api/relatorio-base
#[utoipa::path(
    post,
    path = "/api/relatorio-base",
    tag = "Relatórios",
    request_body = CriarRelatorioPayload,
    responses(
        (status = 201, description = "Relatório criado", body = RelatorioBase),
        (status = 400, description = "Payload inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_relatorio(
    State(app_state): State<AppState>,
    usuario: UsuarioAutenticado,
    Json(payload): Json<CriarRelatorioPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let relatorio = RelatorioBase {
        id_relatorio: String::new(),
        gerencia: payload.gerencia,
        data: payload.data,
        dia_semana: payload.dia_semana,
        turno: payload.turno,
        mat1: payload.mat1,
        mat2: payload.mat2,
        coord: payload.coord,
        superv: payload.superv,
        status: StatusRelatorio::Pendente,
        created_at: None,
        updated_at: None,
        criado_por: Some(usuario.0.matricula.to_string()),
        modificado_por: None,
    };

    let criado = app_state.relatorios.create(relatorio).await?;
    Ok((StatusCode::CREATED, Json(criado)))
}

// GET /api/relatorio-base/{id}
#[utoipa::path(
    get,
    path = "/api/relatorio-base/{id}",
    tag = "Relatórios",
    params(("id" = String, Path, description = "Identificador do relatório")),
    responses(
        (status = 200, description = "Relatório encontrado", body = RelatorioBase),
        (status = 404, description = "Relatório não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_relatorio(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let relatorio = app_state
        .relatorios
        .get_by_id(&id)
        .ok_or(AppError::NaoEncontrado)?;
    Ok(Json(relatorio))
}

// PUT /api/relatorio-base/{id}
#[utoipa::path(
    put,
    path = "/api/relatorio-base/{id}",
    tag = "Relatórios",
    params(("id" = String, Path, description = "Identificador do relatório")),
    request_body = AtualizarRelatorioPayload,
    responses(
        (status = 200, description = "Relatório atualizado", body = RelatorioBase),
        (status = 404, description = "Relatório não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_relatorio(
    State(app_state): State<AppState>,
    usuario: UsuarioAutenticado,
    Path(id): Path<String>,
    Json(payload): Json<AtualizarRelatorioPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut parcial = serde_json::to_value(&payload)?;
    if let Value::Object(mapa) = &mut parcial {
        mapa.insert(
            "modificadoPor".to_string(),
            Value::String(usuario.0.matricula.to_string()),
        );
    }

    let atualizou = app_state.relatorios.update(&id, parcial).await?;
    if !atualizou {
        return Err(AppError::NaoEncontrado);
    }

    let relatorio = app_state
        .relatorios
        .get_by_id(&id)
        .ok_or(AppError::NaoEncontrado)?;
    Ok(Json(relatorio))
}

// DELETE /api/relatorio-base/{id}
// A exclusão desce em cascata: produtividade e ocorrências das atividades,
// as atividades e por fim o próprio relatório.
#[utoipa::path(
    delete,
    path = "/api/relatorio-base/{id}",
    tag = "Relatórios",
    params(("id" = String, Path, description = "Identificador do relatório")),
    responses(
        (status = 204, description = "Relatório e dependentes excluídos"),
        (status = 404, description = "Relatório não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_relatorio(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let removeu = app_state.cascata.delete_relatorio(&id).await?;
    if !removeu {
        return Err(AppError::NaoEncontrado);
    }
    Ok(StatusCode::NO_CONTENT)
}

// PATCH /api/relatorio-base/{id}/lido
#[utoipa::path(
    patch,
    path = "/api/relatorio-base/{id}/lido",
    tag = "Relatórios",
    params(("id" = String, Path, description = "Identificador do relatório")),
    responses(
        (status = 200, description = "Relatório marcado como lido", body = RelatorioBase),
        (status = 403, description = "Perfil sem acesso"),
        (status = 404, description = "Relatório não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn marcar_como_lido(
    State(app_state): State<AppState>,
    usuario: UsuarioAutenticado,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    // Somente coordenação marca relatórios como lidos
    if !matches!(usuario.0.perfil, Perfil::Coordenador | Perfil::Administrador) {
        return Err(AppError::AcessoNegado);
    }

    let atualizou = app_state.relatorios.marcar_lido(&id).await?;
    if !atualizou {
        return Err(AppError::NaoEncontrado);
    }

    let relatorio = app_state
        .relatorios
        .get_by_id(&id)
        .ok_or(AppError::NaoEncontrado)?;
    Ok(Json(relatorio))
}

// GET /api/relatorio-base/exportar
#[utoipa::path(
    get,
    path = "/api/relatorio-base/exportar",
    tag = "Relatórios",
    responses((status = 200, description = "Planilha CSV dos relatórios")),
    security(("api_jwt" = []))
)]
pub async fn exportar_relatorios(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let relatorios = app_state.relatorios.get_all();
    let csv = exportacao::exportar_csv(&relatorios)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"relatorios.csv\"",
            ),
        ],
        csv,
    ))
}

// GET /api/relatorio-base/{id}/documento
#[utoipa::path(
    get,
    path = "/api/relatorio-base/{id}/documento",
    tag = "Relatórios",
    params(("id" = String, Path, description = "Identificador do relatório")),
    responses(
        (status = 200, description = "Documento PDF do relatório"),
        (status = 404, description = "Relatório não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn documento_relatorio(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let relatorio = app_state
        .relatorios
        .get_by_id(&id)
        .ok_or(AppError::NaoEncontrado)?;

    let atividades = app_state.atividades.get_by_relatorio(&id);
    let produtividades = app_state.produtividades.get_by_relatorio(&id);
    let ocorrencias = app_state.ocorrencias.get_by_relatorio(&id);

    let pdf = exportacao::gerar_documento_relatorio(
        &relatorio,
        &atividades,
        &produtividades,
        &ocorrencias,
    )?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"relatorio.pdf\"",
            ),
        ],
        pdf,
    ))
}
