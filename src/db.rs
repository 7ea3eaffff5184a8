pub mod colecao;
pub use colecao::{ColecaoRemota, RegistroRemoto};
pub mod documento_repo;
pub use documento_repo::DocumentoRepository;
pub mod memoria;
pub use memoria::ColecaoMemoria;

/// Nomes das coleções no armazenamento de documentos.
pub mod colecoes {
    pub const RELATORIO_BASE: &str = "relatorio-base";
    pub const ITEM_ATIVIDADE: &str = "item-atividade";
    pub const ITEM_PRODUTIVIDADE: &str = "item-produtividade";
    pub const ITEM_OCORRENCIA: &str = "item-ocorrencia";
    pub const USUARIOS: &str = "usuarios";
    pub const AGENTES: &str = "agentes";
    pub const TABELA_ATIVIDADES: &str = "tabela-atividades";
    pub const TABELA_PRODUTIVIDADE: &str = "tabela-produtividade";
    pub const TABELA_OCORRENCIAS: &str = "tabela-ocorrencias";
}
