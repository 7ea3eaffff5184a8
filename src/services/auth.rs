// src/services/auth.rs

use bcrypt::verify;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    common::error::AppError,
    models::usuario::{Claims, Usuario},
    services::usuarios::UsuarioService,
};

#[derive(Clone)]
pub struct AuthService {
    usuarios: UsuarioService,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(usuarios: UsuarioService, jwt_secret: String) -> Self {
        Self { usuarios, jwt_secret }
    }

    /// Login por matrícula e senha. Devolve o token e o usuário autenticado.
    pub async fn login(&self, matricula: i64, senha: &str) -> Result<(String, Usuario), AppError> {
        let usuario = self
            .usuarios
            .get_by_matricula(matricula)
            .await?
            .ok_or(AppError::CredenciaisInvalidas)?;

        if !usuario.ativo {
            return Err(AppError::UsuarioInativo);
        }

        let senha_clone = senha.to_owned();
        let hash_clone = usuario.senha_hash.clone();

        // Executa a verificação fora do executor
        let senha_valida = tokio::task::spawn_blocking(move || verify(&senha_clone, &hash_clone))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !senha_valida {
            return Err(AppError::CredenciaisInvalidas);
        }

        let token = self.create_token(&usuario)?;
        Ok((token, usuario))
    }

    pub async fn validate_token(&self, token: &str) -> Result<Usuario, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::TokenInvalido)?;

        let matricula: i64 = token_data
            .claims
            .sub
            .parse()
            .map_err(|_| AppError::TokenInvalido)?;

        self.usuarios
            .get_by_matricula(matricula)
            .await?
            .ok_or(AppError::UsuarioNaoEncontrado)
    }

    fn create_token(&self, usuario: &Usuario) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: usuario.matricula.to_string(),
            perfil: usuario.perfil,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
