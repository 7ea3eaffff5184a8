// src/models/usuario.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::common::datas::data_flexivel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Perfil {
    Administrador,
    Coordenador,
    Supervisor,
}

/// Usuário como persistido na coleção `usuarios` (id do documento = matrícula).
/// `senha_hash` nunca sai pela API; respostas usam [`UsuarioPublico`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usuario {
    pub matricula: i64,
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub senha_hash: String,
    pub perfil: Perfil,
    #[serde(default)]
    pub ativo: bool,
    #[serde(default, deserialize_with = "data_flexivel")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "data_flexivel")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Projeção do usuário sem o hash de senha.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsuarioPublico {
    pub matricula: i64,
    pub nome: String,
    pub perfil: Perfil,
    pub ativo: bool,
}

impl From<Usuario> for UsuarioPublico {
    fn from(usuario: Usuario) -> Self {
        Self {
            matricula: usuario.matricula,
            nome: usuario.nome,
            perfil: usuario.perfil,
            ativo: usuario.ativo,
        }
    }
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    pub matricula: i64,
    #[validate(length(min = 1, message = "A senha é obrigatória."))]
    pub senha: String,
}

// Resposta de autenticação com o token e o usuário logado
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub usuario: UsuarioPublico,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,    // Subject (matrícula do usuário)
    pub perfil: Perfil, // Perfil para exibição no menu, sem ida ao banco
    pub exp: usize,     // Expiration time (quando o token expira)
    pub iat: usize,     // Issued At (quando o token foi criado)
}
