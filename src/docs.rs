// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Relatórios ---
        handlers::relatorios::list_relatorios,
        handlers::relatorios::create_relatorio,
        handlers::relatorios::get_relatorio,
        handlers::relatorios::update_relatorio,
        handlers::relatorios::delete_relatorio,
        handlers::relatorios::marcar_como_lido,
        handlers::relatorios::exportar_relatorios,
        handlers::relatorios::documento_relatorio,

        // --- Atividades ---
        handlers::atividades::list_atividades,
        handlers::atividades::create_atividade,
        handlers::atividades::get_atividade,
        handlers::atividades::update_atividade,
        handlers::atividades::delete_atividade,

        // --- Produtividade ---
        handlers::produtividade::list_produtividade,
        handlers::produtividade::create_produtividade,
        handlers::produtividade::update_produtividade,
        handlers::produtividade::delete_produtividade,

        // --- Ocorrências ---
        handlers::ocorrencias::list_ocorrencias,
        handlers::ocorrencias::create_ocorrencia,
        handlers::ocorrencias::update_ocorrencia,
        handlers::ocorrencias::delete_ocorrencia,

        // --- Tabelas de apoio ---
        handlers::tabelas::list_tabela_atividades,
        handlers::tabelas::gravar_tabela_atividade,
        handlers::tabelas::update_tabela_atividade,
        handlers::tabelas::delete_tabela_atividade,
        handlers::tabelas::list_tabela_produtividade,
        handlers::tabelas::gravar_tabela_produtividade,
        handlers::tabelas::update_tabela_produtividade,
        handlers::tabelas::delete_tabela_produtividade,
        handlers::tabelas::list_tabela_ocorrencias,
        handlers::tabelas::gravar_tabela_ocorrencia,
        handlers::tabelas::update_tabela_ocorrencia,
        handlers::tabelas::delete_tabela_ocorrencia,

        // --- Agentes ---
        handlers::tabelas::list_agentes,
        handlers::tabelas::gravar_agente,
        handlers::tabelas::update_agente,
        handlers::tabelas::delete_agente,

        // --- Usuários ---
        handlers::usuarios::list_usuarios,
        handlers::usuarios::create_usuario,
        handlers::usuarios::update_usuario,
        handlers::usuarios::delete_usuario,

        // --- Gráficos ---
        handlers::graficos::graficos_atividades,
        handlers::graficos::graficos_produtividade,
        handlers::graficos::graficos_ocorrencias,
    ),
    components(
        schemas(
            // --- Relatórios ---
            models::relatorio::RelatorioBase,
            models::relatorio::StatusRelatorio,
            handlers::relatorios::CriarRelatorioPayload,
            handlers::relatorios::AtualizarRelatorioPayload,

            // --- Atividades ---
            models::atividade::ItemAtividade,
            handlers::atividades::CriarAtividadePayload,
            handlers::atividades::AtualizarAtividadePayload,

            // --- Produtividade ---
            models::produtividade::ItemProdutividade,
            handlers::produtividade::CriarProdutividadePayload,
            handlers::produtividade::AtualizarProdutividadePayload,

            // --- Ocorrências ---
            models::ocorrencia::ItemOcorrencia,
            handlers::ocorrencias::CriarOcorrenciaPayload,
            handlers::ocorrencias::AtualizarOcorrenciaPayload,

            // --- Tabelas e agentes ---
            models::tabelas::TabelaAtividade,
            models::tabelas::TabelaProdutividade,
            models::tabelas::TabelaOcorrencia,
            models::tabelas::Agente,
            handlers::tabelas::AtualizarTabelaPayload,
            handlers::tabelas::AtualizarAgentePayload,

            // --- Auth e usuários ---
            models::usuario::Perfil,
            models::usuario::UsuarioPublico,
            models::usuario::LoginPayload,
            models::usuario::AuthResponse,
            handlers::usuarios::CriarUsuarioPayload,
            handlers::usuarios::AtualizarUsuarioPayload,

            // --- Gráficos ---
            models::graficos::GrupoGrafico,
            models::graficos::ValorMensal,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação por matrícula e senha"),
        (name = "Relatórios", description = "Relatórios de turno (Relatório Base)"),
        (name = "Atividades", description = "Atividades registradas nos relatórios"),
        (name = "Produtividade", description = "Itens de produtividade das atividades"),
        (name = "Ocorrências", description = "Itens de ocorrência das atividades"),
        (name = "Tabelas", description = "Catálogos de códigos (atividades, produtividade, ocorrências)"),
        (name = "Agentes", description = "Cadastro de agentes operacionais"),
        (name = "Usuários", description = "Gestão de usuários (administradores)"),
        (name = "Gráficos", description = "Séries mensais para os gráficos")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
