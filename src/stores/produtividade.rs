// src/stores/produtividade.rs

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::watch;

use crate::{
    common::error::AppError,
    db::{colecoes, ColecaoRemota},
    models::produtividade::ItemProdutividade,
    stores::Store,
};

/// Store dos itens de produtividade (coleção `item-produtividade`).
pub struct ProdutividadeStore {
    base: Store<ItemProdutividade>,
}

impl ProdutividadeStore {
    pub async fn load(cliente: Arc<dyn ColecaoRemota>) -> Self {
        Self {
            base: Store::load(cliente, colecoes::ITEM_PRODUTIVIDADE).await,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<ItemProdutividade>> {
        self.base.subscribe()
    }

    pub fn get_all(&self) -> Vec<ItemProdutividade> {
        self.base.get_all()
    }

    pub fn get_by_id(&self, id: &str) -> Option<ItemProdutividade> {
        self.base.get_by_id(id)
    }

    pub fn get_by_atividade(&self, id_atividade: &str) -> Vec<ItemProdutividade> {
        self.base.filter(|i| i.id_atividade == id_atividade)
    }

    pub fn get_by_relatorio(&self, id_relatorio: &str) -> Vec<ItemProdutividade> {
        self.base.filter(|i| i.id_relatorio == id_relatorio)
    }

    pub async fn create(&self, item: ItemProdutividade) -> Result<ItemProdutividade, AppError> {
        self.base.create(item).await
    }

    pub async fn update(&self, id: &str, parcial: Value) -> Result<bool, AppError> {
        self.base.update(id, parcial).await
    }

    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        self.base.delete(id).await
    }

    pub async fn delete_by_atividade(&self, id_atividade: &str) -> Result<usize, AppError> {
        self.base.delete_where("idAtividade", id_atividade).await
    }

    pub async fn delete_by_relatorio(&self, id_relatorio: &str) -> Result<usize, AppError> {
        self.base.delete_where("idRelatorio", id_relatorio).await
    }

    // Análises
    pub fn total_por_atividade(&self, id_atividade: &str) -> i64 {
        self.get_by_atividade(id_atividade)
            .iter()
            .map(|i| i.qtd_prod)
            .sum()
    }

    pub fn total_por_relatorio(&self, id_relatorio: &str) -> i64 {
        self.get_by_relatorio(id_relatorio)
            .iter()
            .map(|i| i.qtd_prod)
            .sum()
    }
}
