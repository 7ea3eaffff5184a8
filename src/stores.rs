pub mod base;
pub use base::Store;
pub mod relatorio;
pub use relatorio::RelatorioStore;
pub mod atividade;
pub use atividade::AtividadeStore;
pub mod produtividade;
pub use produtividade::ProdutividadeStore;
pub mod ocorrencia;
pub use ocorrencia::OcorrenciaStore;
