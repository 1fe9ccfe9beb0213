use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use tracing::warn;

/// Draw identifier. Producers emit it either as a JSON string or a number,
/// both are kept as text so lookups match the selector values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DrawNumber(String);

impl DrawNumber {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DrawNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for DrawNumber {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DrawNumber {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for DrawNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => DrawNumber(text),
            Raw::Signed(n) => DrawNumber(n.to_string()),
            Raw::Unsigned(n) => DrawNumber(n.to_string()),
        })
    }
}

/// The document written by the results producer.
///
/// Draws and selector entries are decoded one by one: an entry that does not
/// fit is logged and left out instead of failing the whole document.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct ResultsDocument {
    #[serde(default, deserialize_with = "lenient_entry")]
    pub current_draw: Option<DrawRecord>,
    #[serde(default, deserialize_with = "lenient_map")]
    pub historical_draws: Option<HashMap<String, DrawRecord>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub available_draws: Option<Vec<AvailableDraw>>,
    pub scraped_at: Option<String>,
    pub source_url: Option<String>,
    pub total_draws_scraped: Option<u64>,
}

/// One lottery draw. Every field may be missing or `null` in the document.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct DrawRecord {
    #[serde(rename = "numero_sorteo")]
    pub number: Option<DrawNumber>,
    #[serde(rename = "fecha")]
    pub date: Option<String>,
    #[serde(rename = "numeros_telekino", default, deserialize_with = "lenient_numbers")]
    pub telekino: Option<Vec<u32>>,
    #[serde(rename = "numeros_rekino", default, deserialize_with = "lenient_numbers")]
    pub rekino: Option<Vec<u32>>,
    #[serde(rename = "premios")]
    pub prizes: Option<Map<String, Value>>,
    #[serde(rename = "tipo")]
    pub kind: Option<String>,
    #[serde(rename = "nota")]
    pub note: Option<String>,
}

impl DrawRecord {
    pub fn telekino_numbers(&self) -> &[u32] {
        self.telekino.as_deref().unwrap_or_default()
    }

    pub fn rekino_numbers(&self) -> &[u32] {
        self.rekino.as_deref().unwrap_or_default()
    }

    pub fn has_prizes(&self) -> bool {
        self.prizes.as_ref().is_some_and(|prizes| !prizes.is_empty())
    }

    /// Flattens the untyped prize mapping into rows. Only pools holding a list
    /// of `{categoria, ganadores, premio}` objects contribute; anything else is
    /// left out.
    pub fn prize_rows(&self) -> Vec<PrizeRow> {
        let Some(prizes) = &self.prizes else {
            return Vec::new();
        };

        prizes
            .iter()
            .filter_map(|(pool, value)| value.as_array().map(|items| (pool, items)))
            .flat_map(|(pool, items)| {
                items.iter().filter_map(move |item| {
                    serde_json::from_value::<PrizeEntry>(item.clone())
                        .ok()
                        .map(|entry| PrizeRow {
                            pool: pool.clone(),
                            category: entry.category,
                            winners: entry.winners,
                            amount: entry.amount,
                        })
                })
            })
            .collect()
    }
}

#[derive(Deserialize)]
struct PrizeEntry {
    #[serde(rename = "categoria")]
    category: String,
    #[serde(rename = "ganadores", default)]
    winners: String,
    #[serde(rename = "premio", default)]
    amount: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrizeRow {
    pub pool: String,
    pub category: String,
    pub winners: String,
    pub amount: String,
}

/// Selector entry; only describes a draw, it does not carry its numbers.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct AvailableDraw {
    #[serde(rename = "numero")]
    pub number: DrawNumber,
    #[serde(rename = "fecha")]
    pub date: Option<String>,
    pub color: Option<String>,
    #[serde(rename = "valor")]
    pub value: Option<String>,
    #[serde(rename = "texto_completo")]
    pub full_text: Option<String>,
}

impl AvailableDraw {
    /// `Sorteo <n> - <fecha> - <color>`, skipping the parts that are missing.
    pub fn label(&self) -> String {
        let mut parts = vec![format!("Sorteo {}", self.number)];
        parts.extend(self.date.iter().cloned());
        parts.extend(self.color.iter().cloned());
        parts.join(" - ")
    }
}

fn decode_entry<T: DeserializeOwned>(value: Value, entry: &str) -> Option<T> {
    if value.is_null() {
        return None;
    }
    match serde_json::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            warn!(entry = entry, error = %e, "skipping entry that does not decode");
            None
        }
    }
}

fn lenient_entry<'de, D>(deserializer: D) -> Result<Option<DrawRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| decode_entry(value, "current_draw")))
}

fn lenient_map<'de, D>(deserializer: D) -> Result<Option<HashMap<String, DrawRecord>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<HashMap<String, Value>>::deserialize(deserializer)?;
    Ok(raw.map(|entries| {
        entries
            .into_iter()
            .filter_map(|(number, value)| {
                decode_entry(value, &format!("historical_draws.{}", number))
                    .map(|record| (number, record))
            })
            .collect()
    }))
}

fn lenient_list<'de, D>(deserializer: D) -> Result<Option<Vec<AvailableDraw>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?;
    Ok(raw.map(|items| {
        items
            .into_iter()
            .enumerate()
            .filter_map(|(i, value)| decode_entry(value, &format!("available_draws[{}]", i)))
            .collect()
    }))
}

/// Numbers may come as integers or numeric strings (`"05"`). Anything else
/// in the list is dropped.
fn lenient_numbers<'de, D>(deserializer: D) -> Result<Option<Vec<u32>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?;
    Ok(raw.map(|items| {
        items
            .into_iter()
            .filter_map(|item| {
                let number = match &item {
                    Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
                    Value::String(text) => text.trim().parse().ok(),
                    _ => None,
                };
                if number.is_none() {
                    warn!(value = %item, "skipping drawn number that is not a number");
                }
                number
            })
            .collect()
    }))
}
