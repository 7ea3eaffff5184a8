// src/models/ocorrencia.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{common::datas::data_flexivel, models::Documento};

/// Um registro de ocorrência vinculado a uma atividade ("Item Ocorrência").
/// Mesma forma e ciclo de vida do item de produtividade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemOcorrencia {
    #[serde(default)]
    pub id_ocorrencia: String,
    #[serde(default)]
    pub id_relatorio: String,
    #[serde(default)]
    pub id_atividade: String,
    #[serde(default)]
    pub cod_ocor: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nome_ocorrencia: Option<String>,
    #[serde(default)]
    pub qtd_ocor: i64,
    #[serde(default, deserialize_with = "data_flexivel")]
    pub data: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "data_flexivel")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "data_flexivel")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Documento for ItemOcorrencia {
    const CAMPO_ID: &'static str = "idOcorrencia";

    fn id(&self) -> &str {
        &self.id_ocorrencia
    }

    fn set_id(&mut self, id: String) {
        self.id_ocorrencia = id;
    }
}
