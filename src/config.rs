// src/config.rs

use std::{env, sync::Arc, time::Duration};

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{colecoes, ColecaoMemoria, ColecaoRemota, DocumentoRepository},
    services::{AuthService, CascataService, TabelaService, UsuarioService},
    stores::{AtividadeStore, OcorrenciaStore, ProdutividadeStore, RelatorioStore},
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: Option<PgPool>,
    pub jwt_secret: String,
    pub relatorios: Arc<RelatorioStore>,
    pub atividades: Arc<AtividadeStore>,
    pub produtividades: Arc<ProdutividadeStore>,
    pub ocorrencias: Arc<OcorrenciaStore>,
    pub cascata: CascataService,
    pub auth_service: AuthService,
    pub usuario_service: UsuarioService,
    pub tabela_atividades: TabelaService,
    pub tabela_produtividade: TabelaService,
    pub tabela_ocorrencias: TabelaService,
    pub agentes: TabelaService,
}

impl AppState {
    // Carrega as configurações e monta o gráfico de dependências:
    // cliente de documentos -> stores -> serviços
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Sem DATABASE_URL a aplicação sobe com o armazenamento em memória,
        // o modo de desenvolvimento local
        let (cliente, db_pool): (Arc<dyn ColecaoRemota>, Option<PgPool>) =
            match env::var("DATABASE_URL") {
                Ok(database_url) => {
                    let pool = PgPoolOptions::new()
                        .max_connections(5)
                        .acquire_timeout(Duration::from_secs(3))
                        .connect(&database_url)
                        .await?;
                    tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
                    (Arc::new(DocumentoRepository::new(pool.clone())), Some(pool))
                }
                Err(_) => {
                    tracing::warn!(
                        "DATABASE_URL não definida; usando armazenamento em memória."
                    );
                    (Arc::new(ColecaoMemoria::new()), None)
                }
            };

        // Cada store carrega a sua coleção uma vez na subida
        let relatorios = Arc::new(RelatorioStore::load(cliente.clone()).await);
        let atividades = Arc::new(AtividadeStore::load(cliente.clone()).await);
        let produtividades = Arc::new(ProdutividadeStore::load(cliente.clone()).await);
        let ocorrencias = Arc::new(OcorrenciaStore::load(cliente.clone()).await);

        let cascata = CascataService::new(
            relatorios.clone(),
            atividades.clone(),
            produtividades.clone(),
            ocorrencias.clone(),
        );

        let usuario_service = UsuarioService::new(cliente.clone());
        let auth_service = AuthService::new(usuario_service.clone(), jwt_secret.clone());

        Ok(Self {
            db_pool,
            jwt_secret,
            relatorios,
            atividades,
            produtividades,
            ocorrencias,
            cascata,
            auth_service,
            usuario_service,
            tabela_atividades: TabelaService::new(cliente.clone(), colecoes::TABELA_ATIVIDADES),
            tabela_produtividade: TabelaService::new(
                cliente.clone(),
                colecoes::TABELA_PRODUTIVIDADE,
            ),
            tabela_ocorrencias: TabelaService::new(cliente.clone(), colecoes::TABELA_OCORRENCIAS),
            agentes: TabelaService::new(cliente, colecoes::AGENTES),
        })
    }
}
