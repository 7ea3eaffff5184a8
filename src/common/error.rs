use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Matrícula já cadastrada")]
    MatriculaJaExiste,

    #[error("Credenciais inválidas")]
    CredenciaisInvalidas,

    #[error("Usuário inativo")]
    UsuarioInativo,

    #[error("Token inválido")]
    TokenInvalido,

    #[error("Acesso negado")]
    AcessoNegado,

    #[error("Usuário não encontrado")]
    UsuarioNaoEncontrado,

    #[error("Registro não encontrado")]
    NaoEncontrado,

    #[error("Fonte não encontrada: {0}")]
    FonteNaoEncontrada(String),

    // Variante para erros do banco de documentos (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Registros são JSONB; falhas de (des)serialização chegam por aqui
    #[error("Erro de serialização")]
    SerializacaoError(#[from] serde_json::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::MatriculaJaExiste => {
                (StatusCode::CONFLICT, "Esta matrícula já está cadastrada.")
            }
            AppError::CredenciaisInvalidas => {
                (StatusCode::UNAUTHORIZED, "Matrícula ou senha inválidas.")
            }
            AppError::UsuarioInativo => (StatusCode::UNAUTHORIZED, "Usuário inativo."),
            AppError::TokenInvalido => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.",
            ),
            AppError::AcessoNegado => (
                StatusCode::FORBIDDEN,
                "Seu perfil não permite realizar esta ação.",
            ),
            AppError::UsuarioNaoEncontrado => (StatusCode::NOT_FOUND, "Usuário não encontrado."),
            AppError::NaoEncontrado => (StatusCode::NOT_FOUND, "Registro não encontrado."),

            // Todos os outros erros (DatabaseError, InternalServerError, ...) viram 500.
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
