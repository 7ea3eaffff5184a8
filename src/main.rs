// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, patch, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;
mod stores;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // No modo Postgres as migrações rodam na subida
    if let Some(pool) = &app_state.db_pool {
        sqlx::migrate!()
            .run(pool)
            .await
            .expect("Falha ao rodar as migrações do banco de dados.");
        tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");
    }

    // Rotas públicas de autenticação
    let auth_routes = Router::new().route("/login", post(handlers::auth::login));

    let relatorio_routes = Router::new()
        .route(
            "/",
            post(handlers::relatorios::create_relatorio)
                .get(handlers::relatorios::list_relatorios),
        )
        .route("/exportar", get(handlers::relatorios::exportar_relatorios))
        .route(
            "/{id}",
            get(handlers::relatorios::get_relatorio)
                .put(handlers::relatorios::update_relatorio)
                .delete(handlers::relatorios::delete_relatorio),
        )
        .route("/{id}/lido", patch(handlers::relatorios::marcar_como_lido))
        .route(
            "/{id}/documento",
            get(handlers::relatorios::documento_relatorio),
        );

    let atividade_routes = Router::new()
        .route(
            "/",
            post(handlers::atividades::create_atividade)
                .get(handlers::atividades::list_atividades),
        )
        .route(
            "/{id}",
            get(handlers::atividades::get_atividade)
                .put(handlers::atividades::update_atividade)
                .delete(handlers::atividades::delete_atividade),
        );

    // A criação de itens filhos passa pelo guarda de contexto (extrator
    // ExigirContexto nos handlers de POST)
    let produtividade_routes = Router::new()
        .route(
            "/",
            post(handlers::produtividade::create_produtividade)
                .get(handlers::produtividade::list_produtividade),
        )
        .route(
            "/{id}",
            axum::routing::put(handlers::produtividade::update_produtividade)
                .delete(handlers::produtividade::delete_produtividade),
        );

    let ocorrencia_routes = Router::new()
        .route(
            "/",
            post(handlers::ocorrencias::create_ocorrencia)
                .get(handlers::ocorrencias::list_ocorrencias),
        )
        .route(
            "/{id}",
            axum::routing::put(handlers::ocorrencias::update_ocorrencia)
                .delete(handlers::ocorrencias::delete_ocorrencia),
        );

    let tabela_atividades_routes = Router::new()
        .route(
            "/",
            post(handlers::tabelas::gravar_tabela_atividade)
                .get(handlers::tabelas::list_tabela_atividades),
        )
        .route(
            "/{codigo}",
            axum::routing::put(handlers::tabelas::update_tabela_atividade)
                .delete(handlers::tabelas::delete_tabela_atividade),
        );

    let tabela_produtividade_routes = Router::new()
        .route(
            "/",
            post(handlers::tabelas::gravar_tabela_produtividade)
                .get(handlers::tabelas::list_tabela_produtividade),
        )
        .route(
            "/{codigo}",
            axum::routing::put(handlers::tabelas::update_tabela_produtividade)
                .delete(handlers::tabelas::delete_tabela_produtividade),
        );

    let tabela_ocorrencias_routes = Router::new()
        .route(
            "/",
            post(handlers::tabelas::gravar_tabela_ocorrencia)
                .get(handlers::tabelas::list_tabela_ocorrencias),
        )
        .route(
            "/{codigo}",
            axum::routing::put(handlers::tabelas::update_tabela_ocorrencia)
                .delete(handlers::tabelas::delete_tabela_ocorrencia),
        );

    let agente_routes = Router::new()
        .route(
            "/",
            post(handlers::tabelas::gravar_agente).get(handlers::tabelas::list_agentes),
        )
        .route(
            "/{matricula}",
            axum::routing::put(handlers::tabelas::update_agente)
                .delete(handlers::tabelas::delete_agente),
        );

    let usuario_routes = Router::new()
        .route(
            "/",
            post(handlers::usuarios::create_usuario).get(handlers::usuarios::list_usuarios),
        )
        .route(
            "/{matricula}",
            axum::routing::put(handlers::usuarios::update_usuario)
                .delete(handlers::usuarios::delete_usuario),
        );

    let grafico_routes = Router::new()
        .route("/atividades", get(handlers::graficos::graficos_atividades))
        .route(
            "/produtividade",
            get(handlers::graficos::graficos_produtividade),
        )
        .route(
            "/ocorrencias",
            get(handlers::graficos::graficos_ocorrencias),
        );

    // Tudo que mexe com dados exige o token
    let api_protegida = Router::new()
        .nest("/relatorio-base", relatorio_routes)
        .nest("/item-atividade", atividade_routes)
        .nest("/item-produtividade", produtividade_routes)
        .nest("/item-ocorrencia", ocorrencia_routes)
        .nest("/tabela-atividades", tabela_atividades_routes)
        .nest("/tabela-produtividade", tabela_produtividade_routes)
        .nest("/tabela-ocorrencias", tabela_ocorrencias_routes)
        .nest("/agentes", agente_routes)
        .nest("/usuarios", usuario_routes)
        .nest("/graficos", grafico_routes)
        .route("/auth/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api", api_protegida)
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        )
        .with_state(app_state);

    // Inicia o servidor
    let porta = std::env::var("PORTA").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{}", porta);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", addr);
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
