// src/db/memoria.rs

use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    RwLock,
};

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    common::error::AppError,
    db::colecao::{ColecaoRemota, RegistroRemoto},
};

/// Armazenamento puramente em memória, com contador local de ids.
///
/// É o modo de desenvolvimento (sem DATABASE_URL) e o backend dos testes.
#[derive(Default)]
pub struct ColecaoMemoria {
    colecoes: RwLock<HashMap<String, Vec<RegistroRemoto>>>,
    proximo_id: AtomicU64,
}

impl ColecaoMemoria {
    pub fn new() -> Self {
        Self {
            colecoes: RwLock::new(HashMap::new()),
            proximo_id: AtomicU64::new(1),
        }
    }

    fn ler(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Vec<RegistroRemoto>>> {
        self.colecoes.read().unwrap_or_else(|e| e.into_inner())
    }

    fn escrever(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Vec<RegistroRemoto>>> {
        self.colecoes.write().unwrap_or_else(|e| e.into_inner())
    }
}

// Campos gravados por clientes antigos podem ser números; a comparação de
// chaves estrangeiras é sempre textual.
fn coagir_texto(valor: &Value) -> Option<String> {
    match valor {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[async_trait]
impl ColecaoRemota for ColecaoMemoria {
    async fn list_all(&self, colecao: &str) -> Result<Vec<RegistroRemoto>, AppError> {
        Ok(self.ler().get(colecao).cloned().unwrap_or_default())
    }

    async fn get_one(&self, colecao: &str, id: &str) -> Result<Option<RegistroRemoto>, AppError> {
        Ok(self
            .ler()
            .get(colecao)
            .and_then(|registros| registros.iter().find(|r| r.id == id).cloned()))
    }

    async fn insert(&self, colecao: &str, dados: Value) -> Result<String, AppError> {
        let id = self.proximo_id.fetch_add(1, Ordering::SeqCst).to_string();
        self.escrever()
            .entry(colecao.to_string())
            .or_default()
            .push(RegistroRemoto { id: id.clone(), dados });
        Ok(id)
    }

    async fn gravar(&self, colecao: &str, id: &str, dados: Value) -> Result<(), AppError> {
        let mut colecoes = self.escrever();
        let registros = colecoes.entry(colecao.to_string()).or_default();
        match registros.iter_mut().find(|r| r.id == id) {
            Some(registro) => registro.dados = dados,
            None => registros.push(RegistroRemoto { id: id.to_string(), dados }),
        }
        Ok(())
    }

    async fn merge_update(
        &self,
        colecao: &str,
        id: &str,
        parcial: Value,
    ) -> Result<bool, AppError> {
        let mut colecoes = self.escrever();
        let Some(registro) = colecoes
            .get_mut(colecao)
            .and_then(|registros| registros.iter_mut().find(|r| r.id == id))
        else {
            return Ok(false);
        };

        if let (Value::Object(destino), Value::Object(origem)) = (&mut registro.dados, &parcial) {
            for (chave, valor) in origem {
                destino.insert(chave.clone(), valor.clone());
            }
        }
        Ok(true)
    }

    async fn remove(&self, colecao: &str, id: &str) -> Result<(), AppError> {
        if let Some(registros) = self.escrever().get_mut(colecao) {
            registros.retain(|r| r.id != id);
        }
        Ok(())
    }

    async fn query_where(
        &self,
        colecao: &str,
        campo: &str,
        valor: &str,
    ) -> Result<Vec<RegistroRemoto>, AppError> {
        Ok(self
            .ler()
            .get(colecao)
            .map(|registros| {
                registros
                    .iter()
                    .filter(|r| {
                        r.dados
                            .get(campo)
                            .and_then(coagir_texto)
                            .is_some_and(|v| v == valor)
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn insert_gera_ids_sequenciais() {
        let memoria = ColecaoMemoria::new();
        let a = memoria.insert("c", json!({"x": 1})).await.unwrap();
        let b = memoria.insert("c", json!({"x": 2})).await.unwrap();
        assert_ne!(a, b);
        assert_eq!(memoria.list_all("c").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn query_where_coage_numeros_para_texto() {
        let memoria = ColecaoMemoria::new();
        memoria.insert("c", json!({"idRelatorio": 7})).await.unwrap();
        memoria
            .insert("c", json!({"idRelatorio": "7"}))
            .await
            .unwrap();
        memoria
            .insert("c", json!({"idRelatorio": "8"}))
            .await
            .unwrap();

        let encontrados = memoria.query_where("c", "idRelatorio", "7").await.unwrap();
        assert_eq!(encontrados.len(), 2);
    }

    #[tokio::test]
    async fn merge_update_mescla_raso_e_reporta_ausencia() {
        let memoria = ColecaoMemoria::new();
        let id = memoria
            .insert("c", json!({"nome": "antigo", "qtd": 1}))
            .await
            .unwrap();

        let ok = memoria
            .merge_update("c", &id, json!({"nome": "novo"}))
            .await
            .unwrap();
        assert!(ok);

        let registro = memoria.get_one("c", &id).await.unwrap().unwrap();
        assert_eq!(registro.dados["nome"], "novo");
        assert_eq!(registro.dados["qtd"], 1);

        let ausente = memoria
            .merge_update("c", "999", json!({"nome": "x"}))
            .await
            .unwrap();
        assert!(!ausente);
    }
}
