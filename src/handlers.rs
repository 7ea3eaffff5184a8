pub mod atividades;
pub mod auth;
pub mod graficos;
pub mod ocorrencias;
pub mod produtividade;
pub mod relatorios;
pub mod tabelas;
pub mod usuarios;
