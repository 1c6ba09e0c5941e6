// Archivo: service.rs
// Propósito: implementar `WizardService`, una capa orquestadora que crea
// sesiones, entrega cada paso al controlador, avisa al navegador y, al
// llegar al terminal, entrega el registro completo al repositorio de envío.
use crate::domain::{RawInput, StepId, Transition};
use crate::engine::WizardController;
use crate::errors::{Result, WizardError};
use crate::repository::{Navigator, SubmissionEnvelope, SubmissionReceipt, SubmissionRepository};
use crate::schema::StepRegistry;
use chrono::{DateTime, Utc};
use log::{error, info};
use std::sync::Arc;
use uuid::Uuid;

/// Una ejecución del asistente: su controlador (y por tanto su estado) es
/// propio y no se comparte con otras sesiones.
#[derive(Debug, Clone)]
pub struct WizardSession {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    controller: WizardController,
    receipt: Option<SubmissionReceipt>,
}

impl WizardSession {
    pub fn controller(&self) -> &WizardController {
        &self.controller
    }

    pub fn current_step(&self) -> Option<&StepId> {
        self.controller.current_step()
    }

    pub fn is_complete(&self) -> bool {
        self.controller.is_complete()
    }

    /// Acuse del envío, una vez entregado el registro.
    pub fn receipt(&self) -> Option<&SubmissionReceipt> {
        self.receipt.as_ref()
    }

    /// Terminó el flujo pero el registro aún no fue aceptado.
    pub fn awaiting_submission(&self) -> bool {
        self.is_complete() && self.receipt.is_none()
    }
}

/// Servicio de alto nivel sobre sesiones del asistente.
///
/// Esta capa orquesta el registro de pasos, el repositorio de envío y el
/// navegador. Está pensada para ser invocada desde la capa de presentación.
pub struct WizardService<R>
    where R: SubmissionRepository
{
    repo: Arc<R>,
    registry: Arc<StepRegistry>,
    navigator: Option<Arc<dyn Navigator>>,
}

impl<R> WizardService<R> where R: SubmissionRepository + 'static
{
    /// Crea el servicio inyectando el repositorio de envío y el registro de
    /// pasos compartido por todas las sesiones.
    pub fn new(repo: Arc<R>, registry: Arc<StepRegistry>) -> Self {
        Self { repo,
               registry,
               navigator: None }
    }

    /// Conecta un navegador que recibirá los ids de paso emitidos.
    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn registry(&self) -> &Arc<StepRegistry> {
        &self.registry
    }

    /// Inicia una sesión nueva en el paso de entrada.
    pub fn start_session(&self) -> WizardSession {
        let session = WizardSession { id: Uuid::new_v4(),
                                      started_at: Utc::now(),
                                      controller: WizardController::new(Arc::clone(&self.registry)),
                                      receipt: None };
        info!("sesión {} iniciada en {}", session.id, self.registry.entry());
        if let Some(nav) = &self.navigator {
            nav.navigate(session.id, self.registry.entry());
        }
        session
    }

    /// Entrega la entrada `raw` del paso `step`. En una transición a otro
    /// paso avisa al navegador; al completar el flujo entrega el registro
    /// (ver `finish`). Si ese envío falla se devuelve el error, pero la
    /// sesión queda terminada y sin acuse: `finish` puede reintentarse.
    pub fn submit_step(&self, session: &mut WizardSession, step: &StepId, raw: &RawInput) -> Result<Transition> {
        let transition = session.controller.advance_from(step, raw)?;
        match &transition {
            Transition::Moved { to, .. } => {
                if let Some(nav) = &self.navigator {
                    nav.navigate(session.id, to);
                }
            }
            Transition::Completed { .. } => {
                self.finish(session)?;
            }
            Transition::Rejected(_) => {}
        }
        Ok(transition)
    }

    /// Vuelve a un paso ya visitado y avisa al navegador.
    pub fn go_back(&self, session: &mut WizardSession, step: &StepId) -> Result<()> {
        session.controller.back_to(step)?;
        if let Some(nav) = &self.navigator {
            nav.navigate(session.id, step);
        }
        Ok(())
    }

    /// Entrega el registro de una sesión terminada al repositorio. Puede
    /// reintentarse si el envío anterior falló; si ya hay acuse lo
    /// devuelve sin volver a enviar.
    pub fn finish(&self, session: &mut WizardSession) -> Result<SubmissionReceipt> {
        if !session.is_complete() {
            return Err(WizardError::Submission(format!("la sesión {} no ha terminado", session.id)));
        }
        if let Some(receipt) = &session.receipt {
            return Ok(receipt.clone());
        }
        let envelope = SubmissionEnvelope { session_id: session.id,
                                            submitted_at: Utc::now(),
                                            record: session.controller.record().clone() };
        let receipt = self.repo.submit(&envelope).map_err(|e| {
                                                     error!("envío de la sesión {} falló: {}", session.id, e);
                                                     e
                                                 })?;
        info!("sesión {} entregada: {}", session.id, receipt.submission_id);
        if let Some(nav) = &self.navigator {
            nav.completed(session.id, &receipt);
        }
        session.receipt = Some(receipt.clone());
        Ok(receipt)
    }
}
