// src/stores/base.rs

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use futures_util::future::join_all;
use serde_json::{json, Value};
use tokio::sync::watch;

use crate::{
    common::error::AppError,
    db::{ColecaoRemota, RegistroRemoto},
    models::Documento,
};

/// Cache de uma coleção de documentos, com publicação da lista inteira a cada
/// mutação. Um store por tipo de entidade; os stores tipados em volta deste
/// adicionam os filtros de domínio.
///
/// Política adotada em todas as mutações: o cache só muda depois que a
/// operação remota confirma. Uma falha de I/O deixa o cache no último estado
/// bom conhecido e vira apenas log.
pub struct Store<T: Documento> {
    cliente: Arc<dyn ColecaoRemota>,
    colecao: &'static str,
    itens: RwLock<Vec<T>>,
    canal: watch::Sender<Vec<T>>,
}

impl<T: Documento> Store<T> {
    /// Constrói o store carregando a coleção inteira. Falha de inicialização
    /// não derruba a aplicação: loga e começa com o cache vazio.
    pub async fn load(cliente: Arc<dyn ColecaoRemota>, colecao: &'static str) -> Self {
        let itens: Vec<T> = match cliente.list_all(colecao).await {
            Ok(registros) => registros
                .into_iter()
                .filter_map(|r| materializar::<T>(colecao, r))
                .collect(),
            Err(e) => {
                tracing::error!("Erro ao carregar a coleção '{}': {}", colecao, e);
                Vec::new()
            }
        };

        let (canal, _assinante) = watch::channel(itens.clone());
        Self {
            cliente,
            colecao,
            itens: RwLock::new(itens),
            canal,
        }
    }

    /// Fluxo da coleção: o assinante recebe o valor atual imediatamente e a
    /// lista inteira (não deltas) a cada mutação.
    pub fn subscribe(&self) -> watch::Receiver<Vec<T>> {
        self.canal.subscribe()
    }

    pub fn get_all(&self) -> Vec<T> {
        self.ler().clone()
    }

    pub fn get_by_id(&self, id: &str) -> Option<T> {
        self.ler().iter().find(|i| i.id() == id).cloned()
    }

    /// Filtro puro sobre o snapshot do cache; nunca faz I/O.
    pub fn filter(&self, predicado: impl Fn(&T) -> bool) -> Vec<T> {
        self.ler().iter().filter(|i| predicado(i)).cloned().collect()
    }

    // CREATE
    pub async fn create(&self, item: T) -> Result<T, AppError> {
        let agora = Utc::now();
        let mut dados = serde_json::to_value(&item)?;
        if let Value::Object(mapa) = &mut dados {
            // O identificador é responsabilidade do armazenamento
            mapa.remove(T::CAMPO_ID);
            mapa.insert("createdAt".to_string(), json!(agora));
            mapa.insert("updatedAt".to_string(), json!(agora));
        }

        let id = self.cliente.insert(self.colecao, dados.clone()).await?;
        if let Value::Object(mapa) = &mut dados {
            mapa.insert(T::CAMPO_ID.to_string(), Value::String(id));
        }
        let novo: T = serde_json::from_value(dados)?;

        let publicacao = {
            let mut itens = self.escrever();
            itens.push(novo.clone());
            itens.clone()
        };
        self.publicar(publicacao);
        Ok(novo)
    }

    // UPDATE (mescla rasa)
    pub async fn update(&self, id: &str, mut parcial: Value) -> Result<bool, AppError> {
        let Some(atual) = self.get_by_id(id) else {
            return Ok(false);
        };

        if let Value::Object(mapa) = &mut parcial {
            mapa.remove(T::CAMPO_ID);
            mapa.insert("updatedAt".to_string(), json!(Utc::now()));
        }

        let existia = self
            .cliente
            .merge_update(self.colecao, id, parcial.clone())
            .await?;
        if !existia {
            tracing::warn!(
                "Registro {} de '{}' existe no cache mas não no armazenamento",
                id,
                self.colecao
            );
            return Ok(false);
        }

        // Espelha a mesma mescla no cache
        let mut dados = serde_json::to_value(&atual)?;
        if let (Value::Object(destino), Value::Object(origem)) = (&mut dados, &parcial) {
            for (chave, valor) in origem {
                destino.insert(chave.clone(), valor.clone());
            }
        }
        let atualizado: T = serde_json::from_value(dados)?;

        let publicacao = {
            let mut itens = self.escrever();
            if let Some(posicao) = itens.iter().position(|i| i.id() == id) {
                itens[posicao] = atualizado;
            }
            itens.clone()
        };
        self.publicar(publicacao);
        Ok(true)
    }

    // DELETE
    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        if self.get_by_id(id).is_none() {
            return Ok(false);
        }

        self.cliente.remove(self.colecao, id).await?;

        let publicacao = {
            let mut itens = self.escrever();
            itens.retain(|i| i.id() != id);
            itens.clone()
        };
        self.publicar(publicacao);
        Ok(true)
    }

    /// Varredura de exclusão por chave estrangeira (`campo` = `valor`).
    ///
    /// Consulta o armazenamento pelos registros alvo e os remove de forma
    /// independente; a varredura só termina quando todas as remoções
    /// assentaram, sem ordem garantida entre elas. Falhas individuais viram
    /// log e não interrompem as demais. Devolve quantos foram removidos.
    pub async fn delete_where(&self, campo: &str, valor: &str) -> Result<usize, AppError> {
        let alvos = self.cliente.query_where(self.colecao, campo, valor).await?;

        let tarefas = alvos.into_iter().map(|registro| {
            let cliente = Arc::clone(&self.cliente);
            let colecao = self.colecao;
            async move {
                let resultado = cliente.remove(colecao, &registro.id).await;
                (registro.id, resultado)
            }
        });

        let mut removidos: Vec<String> = Vec::new();
        for (id, resultado) in join_all(tarefas).await {
            match resultado {
                Ok(()) => removidos.push(id),
                Err(e) => tracing::warn!(
                    "Falha ao remover {} de '{}' na varredura por {}={}: {}",
                    id,
                    self.colecao,
                    campo,
                    valor,
                    e
                ),
            }
        }

        if !removidos.is_empty() {
            let publicacao = {
                let mut itens = self.escrever();
                itens.retain(|i| !removidos.iter().any(|r| r == i.id()));
                itens.clone()
            };
            self.publicar(publicacao);
        }
        Ok(removidos.len())
    }

    fn publicar(&self, itens: Vec<T>) {
        self.canal.send_replace(itens);
    }

    fn ler(&self) -> RwLockReadGuard<'_, Vec<T>> {
        self.itens.read().unwrap_or_else(|e| e.into_inner())
    }

    fn escrever(&self) -> RwLockWriteGuard<'_, Vec<T>> {
        self.itens.write().unwrap_or_else(|e| e.into_inner())
    }
}

/// Converte um registro remoto (id fora do corpo) na entidade tipada,
/// injetando o id no campo identificador. Registros que não desserializam
/// são ignorados com log, em vez de derrubar a coleção inteira.
fn materializar<T: Documento>(colecao: &str, registro: RegistroRemoto) -> Option<T> {
    let RegistroRemoto { id, mut dados } = registro;
    if let Value::Object(mapa) = &mut dados {
        mapa.insert(T::CAMPO_ID.to_string(), Value::String(id.clone()));
    }
    match serde_json::from_value(dados) {
        Ok(item) => Some(item),
        Err(e) => {
            tracing::warn!("Registro {} inválido na coleção '{}': {}", id, colecao, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{colecoes, ColecaoMemoria};
    use crate::models::relatorio::{RelatorioBase, StatusRelatorio};

    fn relatorio(gerencia: &str) -> RelatorioBase {
        RelatorioBase {
            id_relatorio: String::new(),
            gerencia: gerencia.to_string(),
            data: None,
            dia_semana: "Segunda-feira".to_string(),
            turno: "Manhã".to_string(),
            mat1: 12345,
            mat2: 67890,
            coord: 111,
            superv: 222,
            status: StatusRelatorio::Pendente,
            created_at: None,
            updated_at: None,
            criado_por: None,
            modificado_por: None,
        }
    }

    async fn store_vazio() -> Store<RelatorioBase> {
        let cliente = Arc::new(ColecaoMemoria::new());
        Store::load(cliente, colecoes::RELATORIO_BASE).await
    }

    #[tokio::test]
    async fn create_atribui_id_e_carimba_auditoria() {
        let store = store_vazio().await;
        let criado = store.create(relatorio("Operações")).await.unwrap();

        assert!(!criado.id_relatorio.is_empty());
        assert!(criado.created_at.is_some());
        assert!(criado.updated_at.is_some());
        assert_eq!(store.get_all().len(), 1);
    }

    #[tokio::test]
    async fn snapshot_e_fluxo_ficam_consistentes_apos_mutacoes() {
        let store = store_vazio().await;
        let assinante = store.subscribe();

        // O assinante vê o valor atual antes de qualquer mutação
        assert!(assinante.borrow().is_empty());

        let criado = store.create(relatorio("Operações")).await.unwrap();
        assert_eq!(*assinante.borrow(), store.get_all());

        store
            .update(&criado.id_relatorio, serde_json::json!({"turno": "Noite"}))
            .await
            .unwrap();
        assert_eq!(*assinante.borrow(), store.get_all());

        store.delete(&criado.id_relatorio).await.unwrap();
        assert_eq!(*assinante.borrow(), store.get_all());
        assert!(store.get_all().is_empty());
    }

    #[tokio::test]
    async fn update_mescla_sem_apagar_os_demais_campos() {
        let store = store_vazio().await;
        let criado = store.create(relatorio("Operações")).await.unwrap();

        let ok = store
            .update(&criado.id_relatorio, serde_json::json!({"turno": "Tarde"}))
            .await
            .unwrap();
        assert!(ok);

        let atualizado = store.get_by_id(&criado.id_relatorio).unwrap();
        assert_eq!(atualizado.turno, "Tarde");
        assert_eq!(atualizado.gerencia, "Operações");
        assert_eq!(atualizado.mat1, 12345);
    }

    #[tokio::test]
    async fn update_e_delete_de_id_desconhecido_sao_no_ops() {
        let store = store_vazio().await;
        store.create(relatorio("Operações")).await.unwrap();

        let atualizou = store
            .update("nao-existe", serde_json::json!({"turno": "X"}))
            .await
            .unwrap();
        let removeu = store.delete("nao-existe").await.unwrap();

        assert!(!atualizou);
        assert!(!removeu);
        assert_eq!(store.get_all().len(), 1);
    }

    #[tokio::test]
    async fn load_materializa_registros_preexistentes() {
        let cliente = Arc::new(ColecaoMemoria::new());
        let dados = serde_json::to_value(relatorio("Noturna")).unwrap();
        cliente
            .insert(colecoes::RELATORIO_BASE, dados)
            .await
            .unwrap();

        let store: Store<RelatorioBase> =
            Store::load(cliente, colecoes::RELATORIO_BASE).await;
        let itens = store.get_all();
        assert_eq!(itens.len(), 1);
        assert_eq!(itens[0].gerencia, "Noturna");
        assert!(!itens[0].id_relatorio.is_empty());
    }
}
