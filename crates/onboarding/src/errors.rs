use thiserror::Error;

// Errores comunes del flujo de registro.
//
// Este enum centraliza los errores que pueden ocurrir al usar el flujo
// concreto: errores del motor del asistente (`WizardError`), errores de
// serializacion al leer el registro en forma tipada y valores de catalogo
// desconocidos.
#[derive(Error, Debug)]
pub enum OnboardingError {
  /// Errores originados por el crate `wizard`.
  #[error("Error del asistente: {0}")]
  Wizard(#[from] wizard::WizardError),

  /// Errores de serializacion/deserializacion JSON.
  #[error("Error de serializacion: {0}")]
  Serialization(#[from] serde_json::Error),

  /// Codigo que no pertenece a ningun catalogo (ocupacion, ingresos...).
  #[error("Codigo desconocido en {catalog}: {code}")]
  UnknownCode { catalog: &'static str, code: String },

  /// El registro aun no contiene todos los pasos.
  #[error("Registro incompleto: falta {0}")]
  Incomplete(String),
}

pub type Result<T> = std::result::Result<T, OnboardingError>;
