// Archivo: domain.rs
// Propósito: tipos de dominio del asistente: identificadores de paso,
// valores normalizados, entrada cruda, resultados de validación y
// transiciones emitidas por el controlador.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Identificador de un paso del asistente (por ejemplo `"PersonalInfo"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(String);

impl StepId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StepId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for StepId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<&str> for StepId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Valor opaco (contraseña, PIN). Nunca se imprime con `Debug`/`Display`.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Acceso explícito al contenido.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Valor normalizado guardado en el registro agregado.
///
/// Se serializa como el string plano que contiene, de modo que el registro
/// completo se vuelve un objeto JSON `clave -> string`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Texto libre.
    Text(String),
    /// Código de una lista cerrada (selector).
    Tag(String),
    /// Valor secreto.
    Secret(Secret),
}

impl FieldValue {
    pub fn text(v: impl Into<String>) -> Self {
        FieldValue::Text(v.into())
    }

    pub fn tag(v: impl Into<String>) -> Self {
        FieldValue::Tag(v.into())
    }

    pub fn secret(v: impl Into<String>) -> Self {
        FieldValue::Secret(Secret::new(v))
    }

    /// Contenido como `&str`, incluso para secretos.
    pub fn as_str(&self) -> &str {
        match self {
            FieldValue::Text(s) | FieldValue::Tag(s) => s,
            FieldValue::Secret(s) => s.expose(),
        }
    }

    pub fn is_secret(&self) -> bool {
        matches!(self, FieldValue::Secret(_))
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) | FieldValue::Tag(s) => f.write_str(s),
            FieldValue::Secret(_) => f.write_str("***"),
        }
    }
}

/// Entrada cruda de una pantalla: nombre de campo -> texto tal como se tecleó.
pub type RawInput = HashMap<String, String>;

/// Campos normalizados listos para fusionarse en el registro.
pub type NormalizedFields = BTreeMap<String, FieldValue>;

/// Errores por campo, en el orden en que el paso declara sus campos.
pub type FieldErrors = IndexMap<String, String>;

/// Resultado de validar una entrega de un paso. Nunca ambas cosas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid(NormalizedFields),
    Invalid(FieldErrors),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid(_))
    }

    /// Errores por campo; vacío cuando el resultado es válido.
    pub fn errors(&self) -> Option<&FieldErrors> {
        match self {
            ValidationResult::Invalid(e) => Some(e),
            ValidationResult::Valid(_) => None,
        }
    }
}

/// Destino de un paso: otro paso o el marcador terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextStep {
    Step(StepId),
    Terminal,
}

/// Posición del controlador en la cadena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cursor {
    At(StepId),
    Finished,
}

/// Resultado de `advance`: lo que el colaborador de navegación debe hacer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// La entrega no validó; estado sin cambios.
    Rejected(FieldErrors),
    /// Se fusionó la entrega y el cursor pasó de `from` a `to`.
    Moved { from: StepId, to: StepId },
    /// Se fusionó la entrega del último paso; el flujo terminó.
    Completed { last: StepId },
}

impl Transition {
    /// Paso destino, si la transición movió el cursor a otro paso.
    pub fn target(&self) -> Option<&StepId> {
        match self {
            Transition::Moved { to, .. } => Some(to),
            _ => None,
        }
    }
}
