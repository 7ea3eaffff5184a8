// src/common/datas.rs

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Interpreta uma data vinda do armazenamento de documentos.
///
/// Os registros foram gravados por clientes diferentes ao longo do tempo:
/// alguns salvaram strings RFC 3339, outros apenas `YYYY-MM-DD`, outros o
/// timestamp em milissegundos. Qualquer coisa fora desses formatos vira
/// `None` e o registro segue sem data (os gráficos o ignoram).
pub fn parsear_data(valor: &Value) -> Option<DateTime<Utc>> {
    match valor {
        Value::String(s) => {
            let s = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc));
            }
            if let Ok(dia) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                return dia.and_hms_opt(0, 0, 0).map(|ndt| Utc.from_utc_datetime(&ndt));
            }
            None
        }
        Value::Number(n) => n.as_i64().and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    }
}

/// `deserialize_with` tolerante para os campos de data dos modelos.
pub fn data_flexivel<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let valor = Option::<Value>::deserialize(deserializer)?;
    Ok(valor.as_ref().and_then(parsear_data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use serde_json::json;

    #[test]
    fn aceita_rfc3339() {
        let data = parsear_data(&json!("2025-03-10T14:30:00Z")).unwrap();
        assert_eq!((data.year(), data.month(), data.day()), (2025, 3, 10));
    }

    #[test]
    fn aceita_data_simples() {
        let data = parsear_data(&json!("2025-03-10")).unwrap();
        assert_eq!((data.year(), data.month(), data.day()), (2025, 3, 10));
    }

    #[test]
    fn aceita_timestamp_em_milissegundos() {
        let data = parsear_data(&json!(1_741_600_000_000i64)).unwrap();
        assert_eq!(data.year(), 2025);
    }

    #[test]
    fn rejeita_formatos_invalidos() {
        assert!(parsear_data(&json!("10/03/2025")).is_none());
        assert!(parsear_data(&json!("nao-e-data")).is_none());
        assert!(parsear_data(&json!(null)).is_none());
        assert!(parsear_data(&json!(["2025"])).is_none());
    }
}
