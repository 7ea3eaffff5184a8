// src/stores/atividade.rs

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::sync::watch;

use crate::{
    common::error::AppError,
    db::{colecoes, ColecaoRemota},
    models::atividade::ItemAtividade,
    stores::Store,
};

/// Store das atividades (coleção `item-atividade`).
pub struct AtividadeStore {
    base: Store<ItemAtividade>,
}

impl AtividadeStore {
    pub async fn load(cliente: Arc<dyn ColecaoRemota>) -> Self {
        Self {
            base: Store::load(cliente, colecoes::ITEM_ATIVIDADE).await,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<ItemAtividade>> {
        self.base.subscribe()
    }

    pub fn get_all(&self) -> Vec<ItemAtividade> {
        self.base.get_all()
    }

    pub fn get_by_id(&self, id: &str) -> Option<ItemAtividade> {
        self.base.get_by_id(id)
    }

    pub fn get_by_relatorio(&self, id_relatorio: &str) -> Vec<ItemAtividade> {
        self.base.filter(|a| a.id_relatorio == id_relatorio)
    }

    pub async fn create(&self, atividade: ItemAtividade) -> Result<ItemAtividade, AppError> {
        self.base.create(atividade).await
    }

    pub async fn update(&self, id: &str, parcial: Value) -> Result<bool, AppError> {
        self.base.update(id, parcial).await
    }

    /// Remove apenas o registro da atividade; os filhos são varridos antes
    /// pelo `CascataService`.
    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        self.base.delete(id).await
    }

    pub async fn delete_by_relatorio(&self, id_relatorio: &str) -> Result<usize, AppError> {
        self.base.delete_where("idRelatorio", id_relatorio).await
    }

    // Filtros e buscas
    pub fn get_by_local(&self, local: &str) -> Vec<ItemAtividade> {
        let alvo = local.to_lowercase();
        self.base.filter(|a| a.local.to_lowercase().contains(&alvo))
    }

    pub fn get_by_cod_atv(&self, cod_atv: i64) -> Vec<ItemAtividade> {
        self.base.filter(|a| a.cod_atv == cod_atv)
    }

    pub fn get_by_periodo(
        &self,
        inicio: DateTime<Utc>,
        fim: DateTime<Utc>,
    ) -> Vec<ItemAtividade> {
        self.base
            .filter(|a| a.chegada.is_some_and(|c| c >= inicio && c <= fim))
    }
}
