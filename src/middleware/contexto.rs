// src/middleware/contexto.rs

use std::collections::HashMap;
use std::marker::PhantomData;

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};

/// Decisão do guarda de contexto, tomada uma única vez por requisição:
/// ou a navegação segue, ou é redirecionada para a tela de lista com o
/// marcador `alert=missingContext` (que a tela exibe como banner).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisaoContexto {
    Permitida { id_atividade: String },
    Redirecionada { destino: String },
}

/// Predicado puro: criar um item filho exige um `idAtividade` não vazio nos
/// parâmetros de consulta (a chave estrangeira obrigatória).
pub fn avaliar_contexto(
    params: &HashMap<String, String>,
    rota_lista: &str,
) -> DecisaoContexto {
    let id_atividade = params
        .get("idAtividade")
        .map(|v| v.trim())
        .unwrap_or_default();

    if id_atividade.is_empty() {
        DecisaoContexto::Redirecionada {
            destino: format!("{}?alert=missingContext", rota_lista),
        }
    } else {
        DecisaoContexto::Permitida {
            id_atividade: id_atividade.to_string(),
        }
    }
}

/// 1. O trait que aponta para a tela de lista do recurso guardado
pub trait RotaLista: Send + Sync + 'static {
    fn caminho() -> &'static str;
}

/// 2. O extrator (guardião): presente nos handlers de criação de itens
/// filhos. Sem contexto, a requisição nem chega ao handler.
pub struct ExigirContexto<R: RotaLista> {
    pub id_atividade: String,
    _rota: PhantomData<R>,
}

// 3. Implementação do FromRequestParts

impl<R, S> FromRequestParts<S> for ExigirContexto<R>
where
    R: RotaLista,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map(|Query(params)| params)
            .unwrap_or_default();

        match avaliar_contexto(&params, R::caminho()) {
            DecisaoContexto::Permitida { id_atividade } => Ok(ExigirContexto {
                id_atividade,
                _rota: PhantomData,
            }),
            DecisaoContexto::Redirecionada { destino } => {
                Err(Redirect::to(&destino).into_response())
            }
        }
    }
}

// ---
// DEFINIÇÃO DAS ROTAS DE LISTA (TIPOS)
// ---

pub struct ListaProdutividade;
impl RotaLista for ListaProdutividade {
    fn caminho() -> &'static str {
        "/item-produtividade"
    }
}

pub struct ListaOcorrencia;
impl RotaLista for ListaOcorrencia {
    fn caminho() -> &'static str {
        "/item-ocorrencia"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pares: &[(&str, &str)]) -> HashMap<String, String> {
        pares
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn permite_quando_id_atividade_presente() {
        let decisao = avaliar_contexto(
            &params(&[("idAtividade", "A123")]),
            ListaProdutividade::caminho(),
        );
        assert_eq!(
            decisao,
            DecisaoContexto::Permitida { id_atividade: "A123".to_string() }
        );
    }

    #[test]
    fn redireciona_quando_id_atividade_ausente() {
        let decisao = avaliar_contexto(&params(&[]), ListaProdutividade::caminho());
        assert_eq!(
            decisao,
            DecisaoContexto::Redirecionada {
                destino: "/item-produtividade?alert=missingContext".to_string()
            }
        );
    }

    #[test]
    fn id_em_branco_nao_conta_como_contexto() {
        let decisao = avaliar_contexto(
            &params(&[("idAtividade", "   ")]),
            ListaOcorrencia::caminho(),
        );
        assert_eq!(
            decisao,
            DecisaoContexto::Redirecionada {
                destino: "/item-ocorrencia?alert=missingContext".to_string()
            }
        );
    }

    #[test]
    fn id_relatorio_sozinho_nao_basta() {
        // Para criar item filho basta o idAtividade; o idRelatorio sozinho
        // não estabelece o contexto.
        let decisao = avaliar_contexto(
            &params(&[("idRelatorio", "R1")]),
            ListaProdutividade::caminho(),
        );
        assert!(matches!(decisao, DecisaoContexto::Redirecionada { .. }));
    }
}
