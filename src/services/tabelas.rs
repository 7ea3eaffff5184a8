// src/services/tabelas.rs

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{common::error::AppError, db::ColecaoRemota};

/// Acesso às tabelas de apoio (catálogos código -> nome) e ao cadastro de
/// agentes. São coleções pequenas, com id natural (código ou matrícula),
/// lidas direto do armazenamento a cada chamada, sem cache.
#[derive(Clone)]
pub struct TabelaService {
    cliente: Arc<dyn ColecaoRemota>,
    colecao: &'static str,
}

impl TabelaService {
    pub fn new(cliente: Arc<dyn ColecaoRemota>, colecao: &'static str) -> Self {
        Self { cliente, colecao }
    }

    pub async fn list<T: DeserializeOwned>(&self) -> Result<Vec<T>, AppError> {
        let registros = self.cliente.list_all(self.colecao).await?;
        Ok(registros
            .into_iter()
            .filter_map(|r| match serde_json::from_value(r.dados) {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::warn!("Registro {} inválido em '{}': {}", r.id, self.colecao, e);
                    None
                }
            })
            .collect())
    }

    pub async fn get<T: DeserializeOwned>(&self, codigo: i64) -> Result<Option<T>, AppError> {
        let registro = self
            .cliente
            .get_one(self.colecao, &codigo.to_string())
            .await?;
        match registro {
            Some(registro) => Ok(serde_json::from_value(registro.dados)?),
            None => Ok(None),
        }
    }

    /// Grava (insere ou substitui) o registro sob o seu código.
    pub async fn gravar<T: Serialize>(&self, codigo: i64, item: &T) -> Result<(), AppError> {
        self.cliente
            .gravar(
                self.colecao,
                &codigo.to_string(),
                serde_json::to_value(item)?,
            )
            .await
    }

    pub async fn update(&self, codigo: i64, parcial: Value) -> Result<bool, AppError> {
        self.cliente
            .merge_update(self.colecao, &codigo.to_string(), parcial)
            .await
    }

    pub async fn delete(&self, codigo: i64) -> Result<(), AppError> {
        self.cliente.remove(self.colecao, &codigo.to_string()).await
    }
}
