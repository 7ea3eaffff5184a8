// src/models/tabelas.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// As tabelas de apoio são catálogos código -> nome mantidos pela administração.
// O id do documento é o próprio código.

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TabelaAtividade {
    pub codigo: i64,
    #[serde(default)]
    pub nome: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TabelaProdutividade {
    pub codigo: i64,
    #[serde(default)]
    pub nome: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TabelaOcorrencia {
    pub codigo: i64,
    #[serde(default)]
    pub nome: String,
}

/// Agente operacional escalável nos turnos. O id do documento é a matrícula.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Agente {
    pub matricula: i64,
    #[serde(default)]
    pub nome: String,
    #[serde(default = "ativo_padrao")]
    pub ativo: bool,
}

fn ativo_padrao() -> bool {
    true
}
