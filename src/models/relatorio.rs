// src/models/relatorio.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{common::datas::data_flexivel, models::Documento};

/// Ciclo de leitura do relatório: nasce pendente, o coordenador marca como lido.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatusRelatorio {
    #[default]
    Pendente,
    Lido,
}

/// O registro de um turno ("Relatório Base").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelatorioBase {
    #[serde(default)]
    pub id_relatorio: String,
    #[serde(default)]
    pub gerencia: String,
    #[serde(default, deserialize_with = "data_flexivel")]
    pub data: Option<DateTime<Utc>>,
    #[serde(default)]
    pub dia_semana: String,
    #[serde(default)]
    pub turno: String,
    // Matrículas dos agentes escalados no turno
    #[serde(default)]
    pub mat1: i64,
    #[serde(default)]
    pub mat2: i64,
    #[serde(default)]
    pub coord: i64,
    #[serde(default)]
    pub superv: i64,
    #[serde(default)]
    pub status: StatusRelatorio,
    #[serde(default, deserialize_with = "data_flexivel")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "data_flexivel")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criado_por: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modificado_por: Option<String>,
}

impl Documento for RelatorioBase {
    const CAMPO_ID: &'static str = "idRelatorio";

    fn id(&self) -> &str {
        &self.id_relatorio
    }

    fn set_id(&mut self, id: String) {
        self.id_relatorio = id;
    }
}
