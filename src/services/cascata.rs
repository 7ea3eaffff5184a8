// src/services/cascata.rs

use std::sync::Arc;

use futures_util::future::join_all;

use crate::{
    common::error::AppError,
    stores::{AtividadeStore, OcorrenciaStore, ProdutividadeStore, RelatorioStore},
};

/// Orquestra a exclusão em cascata na hierarquia
/// Relatório -> Atividade -> {Produtividade, Ocorrência}.
///
/// O armazenamento de documentos não tem chave estrangeira nem cascata
/// nativa, então a limpeza referencial é feita aqui, fase a fase, das folhas
/// para a raiz. O serviço não guarda estado próprio: apenas sequencia
/// chamadas nos stores.
///
/// A cascata é melhor-esforço, não atômica: cada fase captura e loga as
/// próprias falhas e a exclusão segue adiante. Uma varredura de filhos que
/// falhe pode deixar órfãos; isso aparece apenas nos logs, nunca para o
/// usuário final.
#[derive(Clone)]
pub struct CascataService {
    relatorios: Arc<RelatorioStore>,
    atividades: Arc<AtividadeStore>,
    produtividades: Arc<ProdutividadeStore>,
    ocorrencias: Arc<OcorrenciaStore>,
}

impl CascataService {
    pub fn new(
        relatorios: Arc<RelatorioStore>,
        atividades: Arc<AtividadeStore>,
        produtividades: Arc<ProdutividadeStore>,
        ocorrencias: Arc<OcorrenciaStore>,
    ) -> Self {
        Self {
            relatorios,
            atividades,
            produtividades,
            ocorrencias,
        }
    }

    /// Exclui um relatório e tudo que depende dele.
    ///
    /// Fase 1: varredura direta dos itens de produtividade por `idRelatorio`.
    /// Fase 2: para cada atividade do relatório, varre os filhos por
    ///         `idAtividade` e então remove a atividade; as atividades são
    ///         processadas em paralelo e a fase termina quando todas
    ///         assentaram.
    /// Fase 3: remove o registro do próprio relatório; só então o cache de
    ///         relatórios solta a entrada.
    pub async fn delete_relatorio(&self, id_relatorio: &str) -> Result<bool, AppError> {
        // Fase 1
        if let Err(e) = self.produtividades.delete_by_relatorio(id_relatorio).await {
            tracing::warn!(
                "Varredura de produtividade do relatório {} falhou: {}",
                id_relatorio,
                e
            );
        }

        // Fase 2
        let atividades = self.atividades.get_by_relatorio(id_relatorio);
        let resultados = join_all(
            atividades
                .iter()
                .map(|a| self.delete_atividade_com_filhos(a.id_atividade.clone())),
        )
        .await;
        for (atividade, resultado) in atividades.iter().zip(resultados) {
            if let Err(e) = resultado {
                tracing::warn!(
                    "Cascata da atividade {} do relatório {} falhou: {}",
                    atividade.id_atividade,
                    id_relatorio,
                    e
                );
            }
        }

        // Fase 3
        self.relatorios.delete(id_relatorio).await
    }

    /// Exclui uma atividade isolada: varre os itens de produtividade e de
    /// ocorrência por `idAtividade` e então remove o registro da atividade.
    /// `false` quando a atividade não existe no cache.
    pub async fn delete_atividade(&self, id_atividade: &str) -> Result<bool, AppError> {
        self.delete_atividade_com_filhos(id_atividade.to_string())
            .await
    }

    async fn delete_atividade_com_filhos(&self, id_atividade: String) -> Result<bool, AppError> {
        if let Err(e) = self.produtividades.delete_by_atividade(&id_atividade).await {
            tracing::warn!(
                "Varredura de produtividade da atividade {} falhou: {}",
                id_atividade,
                e
            );
        }
        if let Err(e) = self.ocorrencias.delete_by_atividade(&id_atividade).await {
            tracing::warn!(
                "Varredura de ocorrências da atividade {} falhou: {}",
                id_atividade,
                e
            );
        }
        self.atividades.delete(&id_atividade).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::RwLock;

    use async_trait::async_trait;
    use serde_json::Value;

    use crate::db::{ColecaoMemoria, ColecaoRemota, RegistroRemoto};
    use crate::models::{
        atividade::ItemAtividade, ocorrencia::ItemOcorrencia,
        produtividade::ItemProdutividade, relatorio::RelatorioBase,
    };

    /// Cliente que delega para a memória, mas rejeita remoções configuradas.
    struct ClienteComFalhas {
        interno: ColecaoMemoria,
        remocoes_que_falham: RwLock<HashSet<String>>,
    }

    impl ClienteComFalhas {
        fn new() -> Self {
            Self {
                interno: ColecaoMemoria::new(),
                remocoes_que_falham: RwLock::new(HashSet::new()),
            }
        }

        fn falhar_remocao_de(&self, id: &str) {
            self.remocoes_que_falham
                .write()
                .unwrap()
                .insert(id.to_string());
        }
    }

    #[async_trait]
    impl ColecaoRemota for ClienteComFalhas {
        async fn list_all(&self, colecao: &str) -> Result<Vec<RegistroRemoto>, AppError> {
            self.interno.list_all(colecao).await
        }

        async fn get_one(
            &self,
            colecao: &str,
            id: &str,
        ) -> Result<Option<RegistroRemoto>, AppError> {
            self.interno.get_one(colecao, id).await
        }

        async fn insert(&self, colecao: &str, dados: Value) -> Result<String, AppError> {
            self.interno.insert(colecao, dados).await
        }

        async fn gravar(&self, colecao: &str, id: &str, dados: Value) -> Result<(), AppError> {
            self.interno.gravar(colecao, id, dados).await
        }

        async fn merge_update(
            &self,
            colecao: &str,
            id: &str,
            parcial: Value,
        ) -> Result<bool, AppError> {
            self.interno.merge_update(colecao, id, parcial).await
        }

        async fn remove(&self, colecao: &str, id: &str) -> Result<(), AppError> {
            if self.remocoes_que_falham.read().unwrap().contains(id) {
                return Err(AppError::InternalServerError(anyhow::anyhow!(
                    "falha simulada ao remover {id}"
                )));
            }
            self.interno.remove(colecao, id).await
        }

        async fn query_where(
            &self,
            colecao: &str,
            campo: &str,
            valor: &str,
        ) -> Result<Vec<RegistroRemoto>, AppError> {
            self.interno.query_where(colecao, campo, valor).await
        }
    }

    struct Cenario {
        cliente: Arc<ClienteComFalhas>,
        relatorios: Arc<RelatorioStore>,
        atividades: Arc<AtividadeStore>,
        produtividades: Arc<ProdutividadeStore>,
        ocorrencias: Arc<OcorrenciaStore>,
        cascata: CascataService,
    }

    async fn montar_cenario() -> Cenario {
        let cliente = Arc::new(ClienteComFalhas::new());
        let remoto: Arc<dyn ColecaoRemota> = cliente.clone();
        let relatorios = Arc::new(RelatorioStore::load(remoto.clone()).await);
        let atividades = Arc::new(AtividadeStore::load(remoto.clone()).await);
        let produtividades = Arc::new(ProdutividadeStore::load(remoto.clone()).await);
        let ocorrencias = Arc::new(OcorrenciaStore::load(remoto).await);
        let cascata = CascataService::new(
            relatorios.clone(),
            atividades.clone(),
            produtividades.clone(),
            ocorrencias.clone(),
        );
        Cenario {
            cliente,
            relatorios,
            atividades,
            produtividades,
            ocorrencias,
            cascata,
        }
    }

    fn relatorio() -> RelatorioBase {
        serde_json::from_value(serde_json::json!({
            "gerencia": "Operações",
            "diaSemana": "Terça-feira",
            "turno": "Manhã",
            "mat1": 1, "mat2": 2, "coord": 3, "superv": 4
        }))
        .unwrap()
    }

    fn atividade(id_relatorio: &str, item: i64) -> ItemAtividade {
        serde_json::from_value(serde_json::json!({
            "idRelatorio": id_relatorio,
            "item": item,
            "acionamento": "Chamado via rádio",
            "codAtv": 101,
            "qtdAgentes": 2,
            "local": "Setor A",
            "observacoes": ""
        }))
        .unwrap()
    }

    fn produtividade(id_relatorio: &str, id_atividade: &str, qtd: i64) -> ItemProdutividade {
        serde_json::from_value(serde_json::json!({
            "idRelatorio": id_relatorio,
            "idAtividade": id_atividade,
            "codProd": 301,
            "qtdProd": qtd
        }))
        .unwrap()
    }

    fn ocorrencia(id_relatorio: &str, id_atividade: &str, qtd: i64) -> ItemOcorrencia {
        serde_json::from_value(serde_json::json!({
            "idRelatorio": id_relatorio,
            "idAtividade": id_atividade,
            "codOcor": 201,
            "qtdOcor": qtd
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn cascata_remove_toda_a_hierarquia() {
        let c = montar_cenario().await;

        let r1 = c.relatorios.create(relatorio()).await.unwrap();
        let a1 = c
            .atividades
            .create(atividade(&r1.id_relatorio, 1))
            .await
            .unwrap();
        c.produtividades
            .create(produtividade(&r1.id_relatorio, &a1.id_atividade, 5))
            .await
            .unwrap();
        c.ocorrencias
            .create(ocorrencia(&r1.id_relatorio, &a1.id_atividade, 2))
            .await
            .unwrap();

        let removeu = c.cascata.delete_relatorio(&r1.id_relatorio).await.unwrap();
        assert!(removeu);

        assert!(c.relatorios.get_by_id(&r1.id_relatorio).is_none());
        assert!(c.atividades.get_by_relatorio(&r1.id_relatorio).is_empty());
        assert!(c
            .produtividades
            .get_by_relatorio(&r1.id_relatorio)
            .is_empty());
        assert!(c.ocorrencias.get_by_relatorio(&r1.id_relatorio).is_empty());
        assert!(c.produtividades.get_all().is_empty());
        assert!(c.ocorrencias.get_all().is_empty());
    }

    #[tokio::test]
    async fn cascata_varre_filhos_de_todas_as_atividades() {
        let c = montar_cenario().await;

        let r1 = c.relatorios.create(relatorio()).await.unwrap();
        let a1 = c
            .atividades
            .create(atividade(&r1.id_relatorio, 1))
            .await
            .unwrap();
        let a2 = c
            .atividades
            .create(atividade(&r1.id_relatorio, 2))
            .await
            .unwrap();
        for a in [&a1, &a2] {
            c.produtividades
                .create(produtividade(&r1.id_relatorio, &a.id_atividade, 3))
                .await
                .unwrap();
            c.ocorrencias
                .create(ocorrencia(&r1.id_relatorio, &a.id_atividade, 1))
                .await
                .unwrap();
        }

        c.cascata.delete_relatorio(&r1.id_relatorio).await.unwrap();

        // Independente da ordem em que as atividades assentaram, nada sobra
        assert!(c.atividades.get_all().is_empty());
        assert!(c.produtividades.get_all().is_empty());
        assert!(c.ocorrencias.get_all().is_empty());
        assert!(c.relatorios.get_all().is_empty());
    }

    #[tokio::test]
    async fn falha_em_um_filho_nao_bloqueia_o_resto_da_cascata() {
        let c = montar_cenario().await;

        let r1 = c.relatorios.create(relatorio()).await.unwrap();
        let a1 = c
            .atividades
            .create(atividade(&r1.id_relatorio, 1))
            .await
            .unwrap();
        let teimoso = c
            .produtividades
            .create(produtividade(&r1.id_relatorio, &a1.id_atividade, 5))
            .await
            .unwrap();
        let normal = c
            .produtividades
            .create(produtividade(&r1.id_relatorio, &a1.id_atividade, 7))
            .await
            .unwrap();
        c.ocorrencias
            .create(ocorrencia(&r1.id_relatorio, &a1.id_atividade, 2))
            .await
            .unwrap();

        c.cliente.falhar_remocao_de(&teimoso.id_produtividade);

        let removeu = c.cascata.delete_relatorio(&r1.id_relatorio).await.unwrap();
        assert!(removeu);

        // O relatório e os filhos saudáveis se foram; o item teimoso ficou
        // órfão, que é o resultado aceito da política de melhor esforço.
        assert!(c.relatorios.get_by_id(&r1.id_relatorio).is_none());
        assert!(c.atividades.get_all().is_empty());
        assert!(c.ocorrencias.get_all().is_empty());
        assert!(c
            .produtividades
            .get_by_id(&normal.id_produtividade)
            .is_none());
        assert!(c
            .produtividades
            .get_by_id(&teimoso.id_produtividade)
            .is_some());
    }

    #[tokio::test]
    async fn excluir_atividade_isolada_varre_os_dois_tipos_de_filho() {
        let c = montar_cenario().await;

        let r1 = c.relatorios.create(relatorio()).await.unwrap();
        let a1 = c
            .atividades
            .create(atividade(&r1.id_relatorio, 1))
            .await
            .unwrap();
        let a2 = c
            .atividades
            .create(atividade(&r1.id_relatorio, 2))
            .await
            .unwrap();
        c.produtividades
            .create(produtividade(&r1.id_relatorio, &a1.id_atividade, 4))
            .await
            .unwrap();
        c.ocorrencias
            .create(ocorrencia(&r1.id_relatorio, &a1.id_atividade, 1))
            .await
            .unwrap();
        c.produtividades
            .create(produtividade(&r1.id_relatorio, &a2.id_atividade, 9))
            .await
            .unwrap();

        c.cascata.delete_atividade(&a1.id_atividade).await.unwrap();

        // Só a subárvore de a1 desaparece; o relatório e a2 permanecem
        assert!(c.atividades.get_by_id(&a1.id_atividade).is_none());
        assert!(c
            .produtividades
            .get_by_atividade(&a1.id_atividade)
            .is_empty());
        assert!(c.ocorrencias.get_by_atividade(&a1.id_atividade).is_empty());
        assert!(c.relatorios.get_by_id(&r1.id_relatorio).is_some());
        assert_eq!(c.produtividades.get_by_atividade(&a2.id_atividade).len(), 1);
    }

    #[tokio::test]
    async fn excluir_relatorio_inexistente_e_no_op() {
        let c = montar_cenario().await;
        let removeu = c.cascata.delete_relatorio("nao-existe").await.unwrap();
        assert!(!removeu);
    }
}
