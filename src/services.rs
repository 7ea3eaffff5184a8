pub mod auth;
pub use auth::AuthService;
pub mod cascata;
pub use cascata::CascataService;
pub mod exportacao;
pub mod graficos;
pub mod tabelas;
pub use tabelas::TabelaService;
pub mod usuarios;
pub use usuarios::UsuarioService;
