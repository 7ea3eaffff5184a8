// src/services/graficos.rs

use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;

use crate::models::{
    atividade::ItemAtividade,
    graficos::{GrupoGrafico, PontoGrafico, ValorMensal},
    ocorrencia::ItemOcorrencia,
    produtividade::ItemProdutividade,
};

/// Agregação mensal dos gráficos: um grupo por chave, com o eixo de meses
/// compartilhado entre todos os grupos.
///
/// O eixo vai do menor ao maior mês observado no conjunto inteiro (não por
/// grupo), com zero explícito nos meses em que o grupo não teve dados.
/// Registros sem data são ignorados e não influenciam o eixo.
pub fn montar_grupos_mensais(pontos: &[PontoGrafico]) -> Vec<GrupoGrafico> {
    // chave do grupo -> (ano, mês) -> soma
    let mut grupos: HashMap<String, BTreeMap<(i32, u32), i64>> = HashMap::new();
    let mut nomes: HashMap<String, String> = HashMap::new();

    for ponto in pontos {
        let Some(data) = ponto.data else { continue };
        let mes = (data.year(), data.month());
        *grupos
            .entry(ponto.chave.clone())
            .or_default()
            .entry(mes)
            .or_insert(0) += ponto.quantidade;
        if let Some(nome) = &ponto.nome {
            nomes
                .entry(ponto.chave.clone())
                .or_insert_with(|| nome.clone());
        }
    }

    if grupos.is_empty() {
        return Vec::new();
    }

    // Intervalo global de meses, considerando todos os grupos juntos
    let mut minimo: Option<(i32, u32)> = None;
    let mut maximo: Option<(i32, u32)> = None;
    for meses in grupos.values() {
        for mes in meses.keys() {
            minimo = Some(minimo.map_or(*mes, |m| m.min(*mes)));
            maximo = Some(maximo.map_or(*mes, |m| m.max(*mes)));
        }
    }
    let (Some(minimo), Some(maximo)) = (minimo, maximo) else {
        return Vec::new();
    };
    let eixo = meses_contiguos(minimo, maximo);

    // Ordena as chaves numericamente quando todas forem numéricas;
    // caso contrário, alfabeticamente.
    let mut chaves: Vec<String> = grupos.keys().cloned().collect();
    let todas_numericas = chaves.iter().all(|c| c.parse::<i64>().is_ok());
    if todas_numericas {
        chaves.sort_by_key(|c| c.parse::<i64>().unwrap_or(0));
    } else {
        chaves.sort();
    }

    chaves
        .into_iter()
        .map(|chave| {
            let meses = &grupos[&chave];
            let results = eixo
                .iter()
                .map(|(ano, mes)| ValorMensal {
                    name: format!("{:02}/{}", mes, ano),
                    value: meses.get(&(*ano, *mes)).copied().unwrap_or(0),
                })
                .collect();
            let title = match nomes.get(&chave) {
                Some(nome) => format!("{} — {}", chave, nome),
                None => chave.clone(),
            };
            GrupoGrafico { key: chave, title, results }
        })
        .collect()
}

fn meses_contiguos(inicio: (i32, u32), fim: (i32, u32)) -> Vec<(i32, u32)> {
    let mut meses = Vec::new();
    let (mut ano, mut mes) = inicio;
    loop {
        meses.push((ano, mes));
        if (ano, mes) == fim {
            break;
        }
        mes += 1;
        if mes > 12 {
            mes = 1;
            ano += 1;
        }
    }
    meses
}

// Adaptadores: cada tipo de registro vira pontos com a sua chave e
// quantidade. Atividades contam 1 por registro.

pub fn pontos_de_atividades(atividades: &[ItemAtividade]) -> Vec<PontoGrafico> {
    atividades
        .iter()
        .map(|a| PontoGrafico {
            chave: a.cod_atv.to_string(),
            nome: a.nome_atividade.clone(),
            data: a.data,
            quantidade: 1,
        })
        .collect()
}

pub fn pontos_de_produtividade(itens: &[ItemProdutividade]) -> Vec<PontoGrafico> {
    itens
        .iter()
        .map(|i| PontoGrafico {
            chave: i.cod_prod.to_string(),
            nome: i.nome_produtividade.clone(),
            data: i.data,
            quantidade: i.qtd_prod,
        })
        .collect()
}

pub fn pontos_de_ocorrencias(itens: &[ItemOcorrencia]) -> Vec<PontoGrafico> {
    itens
        .iter()
        .map(|i| PontoGrafico {
            chave: i.cod_ocor.to_string(),
            nome: i.nome_ocorrencia.clone(),
            data: i.data,
            quantidade: i.qtd_ocor,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn dia(ano: i32, mes: u32, dia: u32) -> Option<DateTime<Utc>> {
        Utc.with_ymd_and_hms(ano, mes, dia, 12, 0, 0).single()
    }

    fn ponto(chave: &str, data: Option<DateTime<Utc>>, quantidade: i64) -> PontoGrafico {
        PontoGrafico {
            chave: chave.to_string(),
            nome: None,
            data,
            quantidade,
        }
    }

    #[test]
    fn preenche_meses_sem_dados_com_zero() {
        let pontos = vec![
            ponto("301", dia(2025, 1, 10), 5),
            ponto("301", dia(2025, 3, 20), 7),
        ];

        let grupos = montar_grupos_mensais(&pontos);
        assert_eq!(grupos.len(), 1);
        assert_eq!(
            grupos[0].results,
            vec![
                ValorMensal { name: "01/2025".into(), value: 5 },
                ValorMensal { name: "02/2025".into(), value: 0 },
                ValorMensal { name: "03/2025".into(), value: 7 },
            ]
        );
    }

    #[test]
    fn eixo_de_meses_e_global_entre_os_grupos() {
        // O grupo 400 só tem dados em fevereiro, mas o eixo vai de
        // janeiro a março por causa do grupo 301.
        let pontos = vec![
            ponto("301", dia(2025, 1, 1), 1),
            ponto("301", dia(2025, 3, 1), 1),
            ponto("400", dia(2025, 2, 15), 9),
        ];

        let grupos = montar_grupos_mensais(&pontos);
        assert_eq!(grupos.len(), 2);
        for grupo in &grupos {
            assert_eq!(grupo.results.len(), 3);
            assert_eq!(grupo.results[0].name, "01/2025");
            assert_eq!(grupo.results[2].name, "03/2025");
        }
        let grupo_400 = grupos.iter().find(|g| g.key == "400").unwrap();
        assert_eq!(
            grupo_400.results[1],
            ValorMensal { name: "02/2025".into(), value: 9 }
        );
        assert_eq!(grupo_400.results[0].value, 0);
    }

    #[test]
    fn eixo_atravessa_a_virada_do_ano() {
        let pontos = vec![
            ponto("1", dia(2024, 11, 5), 1),
            ponto("1", dia(2025, 2, 5), 1),
        ];

        let grupos = montar_grupos_mensais(&pontos);
        let nomes: Vec<&str> = grupos[0].results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(nomes, vec!["11/2024", "12/2024", "01/2025", "02/2025"]);
    }

    #[test]
    fn registros_sem_data_nao_contam_nem_esticam_o_eixo() {
        let pontos = vec![
            ponto("301", dia(2025, 2, 1), 3),
            ponto("301", None, 100),
        ];

        let grupos = montar_grupos_mensais(&pontos);
        assert_eq!(grupos.len(), 1);
        assert_eq!(
            grupos[0].results,
            vec![ValorMensal { name: "02/2025".into(), value: 3 }]
        );
    }

    #[test]
    fn soma_quantidades_dentro_do_mesmo_mes() {
        let pontos = vec![
            ponto("301", dia(2025, 5, 2), 3),
            ponto("301", dia(2025, 5, 28), 4),
        ];

        let grupos = montar_grupos_mensais(&pontos);
        assert_eq!(
            grupos[0].results,
            vec![ValorMensal { name: "05/2025".into(), value: 7 }]
        );
    }

    #[test]
    fn ordena_chaves_numericas_por_valor() {
        let pontos = vec![
            ponto("10", dia(2025, 1, 1), 1),
            ponto("2", dia(2025, 1, 1), 1),
        ];

        let grupos = montar_grupos_mensais(&pontos);
        let chaves: Vec<&str> = grupos.iter().map(|g| g.key.as_str()).collect();
        // Numérico: 2 antes de 10 (alfabeticamente seria o contrário)
        assert_eq!(chaves, vec!["2", "10"]);
    }

    #[test]
    fn ordena_alfabeticamente_quando_ha_chave_nao_numerica() {
        let pontos = vec![
            ponto("B", dia(2025, 1, 1), 1),
            ponto("10", dia(2025, 1, 1), 1),
            ponto("A", dia(2025, 1, 1), 1),
        ];

        let grupos = montar_grupos_mensais(&pontos);
        let chaves: Vec<&str> = grupos.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(chaves, vec!["10", "A", "B"]);
    }

    #[test]
    fn titulo_usa_o_nome_quando_conhecido() {
        let pontos = vec![
            PontoGrafico {
                chave: "301".into(),
                nome: Some("Ronda preventiva".into()),
                data: dia(2025, 1, 1),
                quantidade: 1,
            },
            ponto("302", dia(2025, 1, 1), 1),
        ];

        let grupos = montar_grupos_mensais(&pontos);
        assert_eq!(grupos[0].title, "301 — Ronda preventiva");
        assert_eq!(grupos[1].title, "302");
    }

    #[test]
    fn entrada_vazia_produz_lista_vazia() {
        assert!(montar_grupos_mensais(&[]).is_empty());
        // Só registros sem data também não produzem grupos
        assert!(montar_grupos_mensais(&[ponto("1", None, 5)]).is_empty());
    }
}
