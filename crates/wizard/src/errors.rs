// Archivo: errors.rs
// Propósito: definir los errores del asistente (wizard) y el alias Result<T>
// usado por las APIs del crate. Los errores de validación de campos NO
// viven aquí: se devuelven como datos en `ValidationResult::Invalid`.
use thiserror::Error;

/// Errores del motor del asistente.
///
/// - `UnknownStep`: el paso pedido no existe en el registro (cadena mal
///   configurada; fatal para el flujo).
/// - `MalformedChain`: la tabla de pasos no forma una cadena simple.
/// - `InvalidNavigation`: se pidió volver a un paso no visitado.
/// - `FlowCompleted`: se intentó avanzar después del estado terminal.
/// - `Submission`: el colaborador de envío rechazó el registro final.
/// - `Storage`: error al acceder a un almacenamiento en memoria.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    /// Paso desconocido para el registro.
    #[error("Paso desconocido: {0}")]
    UnknownStep(String),
    /// La definición de pasos no es una cadena válida.
    #[error("Cadena de pasos mal formada: {0}")]
    MalformedChain(String),
    /// Navegación hacia atrás a un paso que no se ha visitado.
    #[error("Navegación inválida: {0}")]
    InvalidNavigation(String),
    /// El flujo ya alcanzó el estado terminal.
    #[error("El flujo ya fue completado")]
    FlowCompleted,
    /// Error del colaborador de envío.
    #[error("Error de envío: {0}")]
    Submission(String),
    /// Error genérico de almacenamiento.
    #[error("Error de almacenamiento: {0}")]
    Storage(String),
}

/// Alias de resultado usado por las APIs del crate.
pub type Result<T> = std::result::Result<T, WizardError>;
