// src/db/colecao.rs

use async_trait::async_trait;
use serde_json::Value;

use crate::common::error::AppError;

/// Um registro como ele existe no armazenamento: o identificador vive fora
/// do corpo do documento, exatamente como o backend hospedado o devolve.
#[derive(Debug, Clone)]
pub struct RegistroRemoto {
    pub id: String,
    pub dados: Value,
}

/// A fronteira com o banco de documentos hospedado.
///
/// Os stores só conversam com o armazenamento por esta interface; a
/// implementação concreta (Postgres/JSONB em produção, memória nos testes e
/// no modo de desenvolvimento) fica atrás do trait.
#[async_trait]
pub trait ColecaoRemota: Send + Sync {
    async fn list_all(&self, colecao: &str) -> Result<Vec<RegistroRemoto>, AppError>;

    async fn get_one(&self, colecao: &str, id: &str) -> Result<Option<RegistroRemoto>, AppError>;

    /// Insere um registro novo e devolve o identificador gerado.
    async fn insert(&self, colecao: &str, dados: Value) -> Result<String, AppError>;

    /// Grava (insere ou substitui) um registro com identificador conhecido.
    /// Usado pelas tabelas de apoio, cujo id é o próprio código.
    async fn gravar(&self, colecao: &str, id: &str, dados: Value) -> Result<(), AppError>;

    /// Mescla `parcial` no registro existente. `false` quando o id não existe.
    async fn merge_update(&self, colecao: &str, id: &str, parcial: Value)
        -> Result<bool, AppError>;

    /// Remove um registro. Remover um id inexistente não é erro.
    async fn remove(&self, colecao: &str, id: &str) -> Result<(), AppError>;

    /// Registros cujo campo `campo` (no corpo do documento) vale `valor`.
    async fn query_where(
        &self,
        colecao: &str,
        campo: &str,
        valor: &str,
    ) -> Result<Vec<RegistroRemoto>, AppError>;
}
