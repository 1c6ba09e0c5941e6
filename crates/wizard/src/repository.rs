// Archivo: repository.rs
// Propósito: contratos con los colaboradores externos del asistente: el
// repositorio de envío (recibe el registro completo al llegar al terminal)
// y el navegador (interpreta los ids de paso emitidos por el controlador).
use crate::domain::StepId;
use crate::errors::Result;
use crate::state::RegistrationRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Registro completo listo para entregarse, con datos de la sesión.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionEnvelope {
    pub session_id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub record: RegistrationRecord,
}

/// Acuse devuelto por el repositorio de envío.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReceipt {
    pub submission_id: Uuid,
    pub session_id: Uuid,
    pub accepted_at: DateTime<Utc>,
}

/// Contrato del colaborador de envío: acepta el registro completo y
/// devuelve éxito o fallo. Debe ser idempotente por `session_id`: volver a
/// enviar la misma sesión devuelve el mismo acuse.
pub trait SubmissionRepository: Send + Sync {
    fn submit(&self, envelope: &SubmissionEnvelope) -> Result<SubmissionReceipt>;

    /// Acuse previo de una sesión, si existe.
    fn find_receipt(&self, session_id: &Uuid) -> Result<Option<SubmissionReceipt>>;
}

/// Colaborador de navegación: es dueño de las pantallas y de la pila de
/// vuelta atrás. El núcleo sólo le comunica ids de paso.
pub trait Navigator: Send + Sync {
    /// El flujo debe mostrar `step`.
    fn navigate(&self, session_id: Uuid, step: &StepId);

    /// El flujo alcanzó el terminal y el registro fue entregado.
    fn completed(&self, session_id: Uuid, receipt: &SubmissionReceipt);
}
