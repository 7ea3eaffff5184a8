use serde::{de::DeserializeOwned, Serialize};

pub mod atividade;
pub mod graficos;
pub mod ocorrencia;
pub mod produtividade;
pub mod relatorio;
pub mod tabelas;
pub mod usuario;

/// Um registro cacheável de uma coleção de documentos.
///
/// Cada entidade sabe o nome do seu campo identificador no corpo JSON
/// (`idRelatorio`, `idAtividade`, ...); o store usa esse nome para injetar o
/// id gerado pelo armazenamento de volta no registro materializado.
pub trait Documento: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    const CAMPO_ID: &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}
