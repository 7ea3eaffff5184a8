// src/services/exportacao.rs

use chrono::{DateTime, Utc};
use genpdf::{elements, style, Element};
use serde::Serialize;
use serde_json::Value;

use crate::{
    common::error::AppError,
    models::{
        atividade::ItemAtividade, ocorrencia::ItemOcorrencia,
        produtividade::ItemProdutividade, relatorio::RelatorioBase,
    },
};

// Abaixo do limite de 32.767 caracteres por célula do Excel
const MAX_CELULA: usize = 30_000;

/// Exporta uma lista de registros como CSV separado por ponto e vírgula,
/// com BOM UTF-8 para o Excel abrir com a codificação certa.
pub fn exportar_csv<T: Serialize>(linhas: &[T]) -> Result<String, AppError> {
    let mut registros = Vec::with_capacity(linhas.len());
    for linha in linhas {
        registros.push(serde_json::to_value(linha)?);
    }

    let colunas: Vec<String> = registros
        .first()
        .and_then(|v| v.as_object())
        .map(|obj| obj.keys().cloned().collect())
        .unwrap_or_default();

    let mut saida = String::from("\u{feff}");
    saida.push_str(&colunas.join(";"));
    saida.push('\n');

    for registro in &registros {
        let campos: Vec<String> = colunas
            .iter()
            .map(|coluna| {
                let valor = registro.get(coluna).unwrap_or(&Value::Null);
                escapar_csv(&sanitizar_celula(valor))
            })
            .collect();
        saida.push_str(&campos.join(";"));
        saida.push('\n');
    }

    Ok(saida)
}

/// Neutraliza prefixos de fórmula em células de texto e limita o tamanho.
/// Números e booleanos passam direto.
fn sanitizar_celula(valor: &Value) -> String {
    match valor {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            let mut saida = if s.starts_with(['=', '+', '-', '@']) {
                format!("'{}", s)
            } else {
                s.clone()
            };
            if saida.chars().count() > MAX_CELULA {
                saida = saida.chars().take(MAX_CELULA).collect();
            }
            saida
        }
        outro => outro.to_string(),
    }
}

fn escapar_csv(campo: &str) -> String {
    if campo.contains([';', '"', '\n', '\r']) {
        format!("\"{}\"", campo.replace('"', "\"\""))
    } else {
        campo.to_string()
    }
}

fn formatar_dia(data: &Option<DateTime<Utc>>) -> String {
    data.map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_default()
}

fn formatar_hora(data: &Option<DateTime<Utc>>) -> String {
    data.map(|d| d.format("%H:%M").to_string())
        .unwrap_or_default()
}

/// Gera o documento imprimível de um relatório: cabeçalho do turno, tabela
/// de atividades e totais de produtividade e ocorrências.
pub fn gerar_documento_relatorio(
    relatorio: &RelatorioBase,
    atividades: &[ItemAtividade],
    produtividades: &[ItemProdutividade],
    ocorrencias: &[ItemOcorrencia],
) -> Result<Vec<u8>, AppError> {
    // Carrega a fonte da pasta 'fonts/'
    let font_family = genpdf::fonts::from_files("./fonts", "Roboto", None)
        .map_err(|_| AppError::FonteNaoEncontrada("Fonte não encontrada na pasta ./fonts".to_string()))?;

    let mut doc = genpdf::Document::new(font_family);
    doc.set_title(format!("Relatório {}", formatar_dia(&relatorio.data)));
    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(10);
    doc.set_page_decorator(decorator);

    // --- CABEÇALHO ---
    doc.push(
        elements::Paragraph::new("RELATÓRIO DIÁRIO OPERACIONAL")
            .styled(style::Style::new().bold().with_font_size(16)),
    );
    doc.push(elements::Break::new(1));

    doc.push(elements::Paragraph::new(format!(
        "Gerência: {}",
        relatorio.gerencia
    )));
    doc.push(elements::Paragraph::new(format!(
        "Data: {} ({}) - Turno: {}",
        formatar_dia(&relatorio.data),
        relatorio.dia_semana,
        relatorio.turno
    )));
    doc.push(elements::Paragraph::new(format!(
        "Agentes: {} / {} - Coordenador: {} - Supervisor: {}",
        relatorio.mat1, relatorio.mat2, relatorio.coord, relatorio.superv
    )));

    doc.push(elements::Break::new(2));

    // --- TABELA DE ATIVIDADES ---
    doc.push(
        elements::Paragraph::new("Atividades do turno")
            .styled(style::Style::new().bold().with_font_size(12)),
    );
    doc.push(elements::Break::new(1));

    let mut table = elements::TableLayout::new(vec![1, 3, 2, 2, 3, 1]);
    table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

    let style_bold = style::Style::new().bold();
    table
        .row()
        .element(elements::Paragraph::new("Item").styled(style_bold))
        .element(elements::Paragraph::new("Acionamento").styled(style_bold))
        .element(elements::Paragraph::new("Chegada").styled(style_bold))
        .element(elements::Paragraph::new("Saída").styled(style_bold))
        .element(elements::Paragraph::new("Local").styled(style_bold))
        .element(elements::Paragraph::new("Agentes").styled(style_bold))
        .push()
        .expect("Table error");

    for atividade in atividades {
        table
            .row()
            .element(elements::Paragraph::new(atividade.item.to_string()))
            .element(elements::Paragraph::new(atividade.acionamento.clone()))
            .element(elements::Paragraph::new(formatar_hora(&atividade.chegada)))
            .element(elements::Paragraph::new(formatar_hora(&atividade.saida)))
            .element(elements::Paragraph::new(atividade.local.clone()))
            .element(elements::Paragraph::new(atividade.qtd_agentes.to_string()))
            .push()
            .expect("Table row error");
    }

    doc.push(table);
    doc.push(elements::Break::new(2));

    // --- TOTAIS ---
    let total_produtividade: i64 = produtividades.iter().map(|i| i.qtd_prod).sum();
    let total_ocorrencias: i64 = ocorrencias.iter().map(|i| i.qtd_ocor).sum();

    doc.push(
        elements::Paragraph::new(format!(
            "Total de produtividade: {} - Total de ocorrências: {}",
            total_produtividade, total_ocorrencias
        ))
        .styled(style::Style::new().bold().with_font_size(11)),
    );

    // Renderiza para buffer em memória
    let mut buffer = Vec::new();
    doc.render(&mut buffer)
        .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sanitiza_prefixos_de_formula() {
        assert_eq!(sanitizar_celula(&json!("=SUM(A1)")), "'=SUM(A1)");
        assert_eq!(sanitizar_celula(&json!("+55 11 99999")), "'+55 11 99999");
        assert_eq!(sanitizar_celula(&json!("@usuario")), "'@usuario");
        assert_eq!(sanitizar_celula(&json!("texto normal")), "texto normal");
        assert_eq!(sanitizar_celula(&json!(42)), "42");
        assert_eq!(sanitizar_celula(&json!(null)), "");
    }

    #[test]
    fn escapa_separador_e_aspas() {
        assert_eq!(escapar_csv("a;b"), "\"a;b\"");
        assert_eq!(escapar_csv("com \"aspas\""), "\"com \"\"aspas\"\"\"");
        assert_eq!(escapar_csv("simples"), "simples");
    }

    #[test]
    fn csv_tem_cabecalho_e_uma_linha_por_registro() {
        #[derive(Serialize)]
        struct Linha {
            gerencia: String,
            turno: String,
        }

        let linhas = vec![
            Linha { gerencia: "Operações".into(), turno: "Manhã".into() },
            Linha { gerencia: "Logística".into(), turno: "Noite".into() },
        ];

        let csv = exportar_csv(&linhas).unwrap();
        let corpo = csv.trim_start_matches('\u{feff}');
        let linhas_csv: Vec<&str> = corpo.lines().collect();
        assert_eq!(linhas_csv[0], "gerencia;turno");
        assert_eq!(linhas_csv[1], "Operações;Manhã");
        assert_eq!(linhas_csv.len(), 3);
    }
}
