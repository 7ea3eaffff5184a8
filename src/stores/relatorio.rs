// src/stores/relatorio.rs

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{json, Value};
use tokio::sync::watch;

use crate::{
    common::error::AppError,
    db::{colecoes, ColecaoRemota},
    models::relatorio::RelatorioBase,
    stores::Store,
};

/// Store dos relatórios de turno (coleção `relatorio-base`).
pub struct RelatorioStore {
    base: Store<RelatorioBase>,
}

impl RelatorioStore {
    pub async fn load(cliente: Arc<dyn ColecaoRemota>) -> Self {
        Self {
            base: Store::load(cliente, colecoes::RELATORIO_BASE).await,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<RelatorioBase>> {
        self.base.subscribe()
    }

    pub fn get_all(&self) -> Vec<RelatorioBase> {
        self.base.get_all()
    }

    pub fn get_by_id(&self, id: &str) -> Option<RelatorioBase> {
        self.base.get_by_id(id)
    }

    pub async fn create(&self, relatorio: RelatorioBase) -> Result<RelatorioBase, AppError> {
        self.base.create(relatorio).await
    }

    pub async fn update(&self, id: &str, parcial: Value) -> Result<bool, AppError> {
        self.base.update(id, parcial).await
    }

    /// Remove apenas o registro do relatório. A cascata sobre os filhos é
    /// responsabilidade do `CascataService`.
    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        self.base.delete(id).await
    }

    pub async fn marcar_lido(&self, id: &str) -> Result<bool, AppError> {
        self.base.update(id, json!({ "status": "lido" })).await
    }

    // Filtros e buscas
    pub fn get_by_gerencia(&self, gerencia: &str) -> Vec<RelatorioBase> {
        let alvo = gerencia.to_lowercase();
        self.base
            .filter(|r| r.gerencia.to_lowercase().contains(&alvo))
    }

    pub fn get_by_turno(&self, turno: &str) -> Vec<RelatorioBase> {
        self.base.filter(|r| r.turno == turno)
    }

    pub fn get_by_data(&self, dia: NaiveDate) -> Vec<RelatorioBase> {
        self.base
            .filter(|r| r.data.map(|d| d.date_naive()) == Some(dia))
    }

    pub fn get_by_periodo(
        &self,
        inicio: DateTime<Utc>,
        fim: DateTime<Utc>,
    ) -> Vec<RelatorioBase> {
        self.base
            .filter(|r| r.data.is_some_and(|d| d >= inicio && d <= fim))
    }
}
