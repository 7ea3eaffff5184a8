// src/models/produtividade.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{common::datas::data_flexivel, models::Documento};

/// Uma medição de produtividade vinculada a uma atividade ("Item Produtividade").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemProdutividade {
    #[serde(default)]
    pub id_produtividade: String,
    /// Desnormalizado do relatório dono da atividade.
    #[serde(default)]
    pub id_relatorio: String,
    /// Chave estrangeira obrigatória para a atividade.
    #[serde(default)]
    pub id_atividade: String,
    #[serde(default)]
    pub cod_prod: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nome_produtividade: Option<String>,
    #[serde(default)]
    pub qtd_prod: i64,
    #[serde(default, deserialize_with = "data_flexivel")]
    pub data: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "data_flexivel")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "data_flexivel")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Documento for ItemProdutividade {
    const CAMPO_ID: &'static str = "idProdutividade";

    fn id(&self) -> &str {
        &self.id_produtividade
    }

    fn set_id(&mut self, id: String) {
        self.id_produtividade = id;
    }
}
