// src/db/documento_repo.rs

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::colecao::{ColecaoRemota, RegistroRemoto},
};

// O repositório de documentos: todas as coleções vivem na tabela 'documentos',
// uma linha por registro, corpo em JSONB.
#[derive(Clone)]
pub struct DocumentoRepository {
    pool: PgPool,
}

impl DocumentoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ColecaoRemota for DocumentoRepository {
    async fn list_all(&self, colecao: &str) -> Result<Vec<RegistroRemoto>, AppError> {
        let linhas = sqlx::query(
            "SELECT id, dados FROM documentos WHERE colecao = $1 ORDER BY created_at ASC",
        )
        .bind(colecao)
        .fetch_all(&self.pool)
        .await?;

        let mut registros = Vec::with_capacity(linhas.len());
        for linha in linhas {
            registros.push(RegistroRemoto {
                id: linha.try_get("id")?,
                dados: linha.try_get("dados")?,
            });
        }
        Ok(registros)
    }

    async fn get_one(&self, colecao: &str, id: &str) -> Result<Option<RegistroRemoto>, AppError> {
        let linha = sqlx::query("SELECT id, dados FROM documentos WHERE colecao = $1 AND id = $2")
            .bind(colecao)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match linha {
            Some(linha) => Ok(Some(RegistroRemoto {
                id: linha.try_get("id")?,
                dados: linha.try_get("dados")?,
            })),
            None => Ok(None),
        }
    }

    async fn insert(&self, colecao: &str, dados: Value) -> Result<String, AppError> {
        let id = Uuid::new_v4().to_string();
        sqlx::query("INSERT INTO documentos (colecao, id, dados) VALUES ($1, $2, $3)")
            .bind(colecao)
            .bind(&id)
            .bind(&dados)
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    async fn gravar(&self, colecao: &str, id: &str, dados: Value) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO documentos (colecao, id, dados)
            VALUES ($1, $2, $3)
            ON CONFLICT (colecao, id)
            DO UPDATE SET dados = EXCLUDED.dados, updated_at = NOW()
            "#,
        )
        .bind(colecao)
        .bind(id)
        .bind(&dados)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn merge_update(
        &self,
        colecao: &str,
        id: &str,
        parcial: Value,
    ) -> Result<bool, AppError> {
        // O operador || do JSONB faz exatamente a mescla rasa que queremos
        let resultado = sqlx::query(
            r#"
            UPDATE documentos
            SET dados = dados || $3, updated_at = NOW()
            WHERE colecao = $1 AND id = $2
            "#,
        )
        .bind(colecao)
        .bind(id)
        .bind(&parcial)
        .execute(&self.pool)
        .await?;
        Ok(resultado.rows_affected() > 0)
    }

    async fn remove(&self, colecao: &str, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM documentos WHERE colecao = $1 AND id = $2")
            .bind(colecao)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn query_where(
        &self,
        colecao: &str,
        campo: &str,
        valor: &str,
    ) -> Result<Vec<RegistroRemoto>, AppError> {
        let linhas = sqlx::query(
            "SELECT id, dados FROM documentos WHERE colecao = $1 AND dados ->> $2 = $3",
        )
        .bind(colecao)
        .bind(campo)
        .bind(valor)
        .fetch_all(&self.pool)
        .await?;

        let mut registros = Vec::with_capacity(linhas.len());
        for linha in linhas {
            registros.push(RegistroRemoto {
                id: linha.try_get("id")?,
                dados: linha.try_get("dados")?,
            });
        }
        Ok(registros)
    }
}
