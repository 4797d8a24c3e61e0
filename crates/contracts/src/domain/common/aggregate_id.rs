use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;
use uuid::Uuid;

/// Идентификатор агрегата поверх UUID (букеты, заказы).
///
/// Implementors only wrap and unwrap the UUID; text conversion is shared.
pub trait AggregateId:
    Clone + Copy + PartialEq + Eq + Hash + Serialize + DeserializeOwned + std::fmt::Debug
{
    fn from_uuid(value: Uuid) -> Self;

    fn uuid(&self) -> Uuid;

    fn as_string(&self) -> String {
        self.uuid().to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s.trim())
            .map(Self::from_uuid)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}
