use serde::{Deserialize, Deserializer, Serialize};

/// A bookable service as listed by `GET /servicos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub nome: String,
    /// Duration in minutes.
    pub duracao: u32,
    /// Price in BRL.
    pub preco: f64,
}

/// A barber as listed by `GET /barbeiros`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barber {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub nome: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
    #[serde(
        rename = "fotoUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub foto_url: Option<String>,
}

/// Anything that can be listed alphabetically in a picker.
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for Service {
    fn name(&self) -> &str {
        &self.nome
    }
}

impl Named for Barber {
    fn name(&self) -> &str {
        &self.nome
    }
}

/// Sorts records by name, case-insensitively, keeping the order of equal names.
pub fn sort_by_name<T: Named>(items: &mut [T]) {
    items.sort_by_cached_key(|item| item.name().to_lowercase());
}

/// Backends disagree on id types; accept `1` as well as `"1"`.
pub(crate) fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Integer(number) => number.to_string(),
        RawId::Float(number) => number.to_string(),
    })
}
