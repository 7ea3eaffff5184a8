// src/models/graficos.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Entrada da agregação mensal: um registro datado, com chave de agrupamento
/// e quantidade. Atividades entram com quantidade 1; itens de produtividade
/// e ocorrência entram com seus campos `qtd*`.
#[derive(Debug, Clone)]
pub struct PontoGrafico {
    pub chave: String,
    pub nome: Option<String>,
    pub data: Option<DateTime<Utc>>,
    pub quantidade: i64,
}

/// Um ponto da série: rótulo "MM/YYYY" e valor somado do mês.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ValorMensal {
    pub name: String,
    pub value: i64,
}

/// Um gráfico por chave (código de atividade/produtividade/ocorrência),
/// todos compartilhando o mesmo eixo de meses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GrupoGrafico {
    pub key: String,
    pub title: String,
    pub results: Vec<ValorMensal>,
}
