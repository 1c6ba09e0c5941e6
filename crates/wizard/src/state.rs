// Archivo: state.rs
// Propósito: el registro agregado de la sesión (`RegistrationRecord`) y su
// único contrato de escritura: `merge` (por clave, gana la última escritura).
use crate::domain::{FieldValue, NormalizedFields};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Mapa clave -> valor normalizado acumulado a lo largo de los pasos.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RegistrationRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl RegistrationRecord {
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Atajo: contenido textual de una clave.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(FieldValue::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Objeto JSON `clave -> string` (los secretos incluidos en claro; sólo
    /// debe usarse para entregar el registro al colaborador de envío).
    pub fn to_json(&self) -> serde_json::Result<JsonValue> {
        serde_json::to_value(self)
    }

    /// Lectura tipada del registro completo.
    pub fn decode<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_value(self.to_json()?)
    }
}

/// Estado mutable de una sesión del asistente. Sólo se modifica con
/// `merge`; no existe operación de borrado.
#[derive(Debug, Clone, Default)]
pub struct RegistrationState {
    record: RegistrationRecord,
}

impl RegistrationState {
    /// Estado vacío al inicio del flujo.
    pub fn new() -> Self {
        Self::default()
    }

    /// Escribe (o sobrescribe) cada clave de `normalized`; las claves
    /// ausentes quedan intactas. No valida: por contrato sólo llega aquí la
    /// salida de un `ValidationResult::Valid`.
    pub fn merge(&mut self, normalized: NormalizedFields) {
        self.record.fields.extend(normalized);
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.record.get(key)
    }

    pub fn len(&self) -> usize {
        self.record.len()
    }

    pub fn is_empty(&self) -> bool {
        self.record.is_empty()
    }

    pub fn record(&self) -> &RegistrationRecord {
        &self.record
    }

    /// Consume el estado y entrega el registro final.
    pub fn into_record(self) -> RegistrationRecord {
        self.record
    }
}
