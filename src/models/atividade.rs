// src/models/atividade.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{common::datas::data_flexivel, models::Documento};

/// Uma atividade registrada dentro de um relatório ("Item Atividade").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemAtividade {
    #[serde(default)]
    pub id_atividade: String,
    /// Chave estrangeira obrigatória para o relatório dono.
    #[serde(default)]
    pub id_relatorio: String,
    /// Número sequencial da atividade dentro do relatório.
    #[serde(default)]
    pub item: i64,
    #[serde(default)]
    pub acionamento: String,
    #[serde(default, deserialize_with = "data_flexivel")]
    pub chegada: Option<DateTime<Utc>>,
    // Atividades ainda em andamento não têm solução
    #[serde(default, deserialize_with = "data_flexivel")]
    pub solucao: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "data_flexivel")]
    pub saida: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cod_atv: i64,
    /// Nome desnormalizado da tabela de atividades, para exibição.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nome_atividade: Option<String>,
    #[serde(default)]
    pub qtd_agentes: i64,
    #[serde(default)]
    pub local: String,
    #[serde(default)]
    pub observacoes: String,
    /// Data do turno, desnormalizada do relatório pai.
    #[serde(default, deserialize_with = "data_flexivel")]
    pub data: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "data_flexivel")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "data_flexivel")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Documento for ItemAtividade {
    const CAMPO_ID: &'static str = "idAtividade";

    fn id(&self) -> &str {
        &self.id_atividade
    }

    fn set_id(&mut self, id: String) {
        self.id_atividade = id;
    }
}
