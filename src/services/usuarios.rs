// src/services/usuarios.rs

use std::sync::Arc;

use bcrypt::hash;
use chrono::Utc;
use serde_json::{json, Value};

use crate::{
    common::error::AppError,
    db::{colecoes, ColecaoRemota},
    models::usuario::{Perfil, Usuario},
};

/// CRUD da coleção `usuarios`. O id do documento é a matrícula, então não há
/// cache nem id gerado: as leituras vão direto ao armazenamento.
#[derive(Clone)]
pub struct UsuarioService {
    cliente: Arc<dyn ColecaoRemota>,
}

impl UsuarioService {
    pub fn new(cliente: Arc<dyn ColecaoRemota>) -> Self {
        Self { cliente }
    }

    pub async fn list(&self) -> Result<Vec<Usuario>, AppError> {
        let registros = self.cliente.list_all(colecoes::USUARIOS).await?;
        let mut usuarios: Vec<Usuario> = registros
            .into_iter()
            .filter_map(|r| match serde_json::from_value(r.dados) {
                Ok(usuario) => Some(usuario),
                Err(e) => {
                    tracing::warn!("Usuário {} inválido na coleção: {}", r.id, e);
                    None
                }
            })
            .collect();
        usuarios.sort_by_key(|u| u.matricula);
        Ok(usuarios)
    }

    pub async fn get_by_matricula(&self, matricula: i64) -> Result<Option<Usuario>, AppError> {
        let registro = self
            .cliente
            .get_one(colecoes::USUARIOS, &matricula.to_string())
            .await?;
        match registro {
            Some(registro) => Ok(serde_json::from_value(registro.dados)?),
            None => Ok(None),
        }
    }

    pub async fn create(
        &self,
        matricula: i64,
        nome: &str,
        senha: &str,
        perfil: Perfil,
        ativo: bool,
    ) -> Result<Usuario, AppError> {
        if self.get_by_matricula(matricula).await?.is_some() {
            return Err(AppError::MatriculaJaExiste);
        }

        let senha_hash = hash_em_task(senha.to_owned()).await?;
        let agora = Utc::now();
        let usuario = Usuario {
            matricula,
            nome: nome.to_string(),
            senha_hash,
            perfil,
            ativo,
            created_at: Some(agora),
            updated_at: Some(agora),
        };

        self.cliente
            .gravar(
                colecoes::USUARIOS,
                &matricula.to_string(),
                serde_json::to_value(&usuario)?,
            )
            .await?;
        Ok(usuario)
    }

    /// Mescla `parcial` no usuário. Se uma nova senha vier junto, ela é
    /// hasheada antes de persistir.
    pub async fn update(
        &self,
        matricula: i64,
        mut parcial: Value,
        nova_senha: Option<String>,
    ) -> Result<bool, AppError> {
        if let Some(senha) = nova_senha {
            let senha_hash = hash_em_task(senha).await?;
            if let Value::Object(mapa) = &mut parcial {
                mapa.insert("senhaHash".to_string(), json!(senha_hash));
            }
        }
        if let Value::Object(mapa) = &mut parcial {
            mapa.remove("matricula");
            mapa.insert("updatedAt".to_string(), json!(Utc::now()));
        }

        self.cliente
            .merge_update(colecoes::USUARIOS, &matricula.to_string(), parcial)
            .await
    }

    pub async fn delete(&self, matricula: i64) -> Result<(), AppError> {
        self.cliente
            .remove(colecoes::USUARIOS, &matricula.to_string())
            .await
    }
}

// Hashing é caro; roda fora do executor, como manda o tokio.
async fn hash_em_task(senha: String) -> Result<String, AppError> {
    let resultado = tokio::task::spawn_blocking(move || hash(&senha, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))?;
    Ok(resultado?)
}
