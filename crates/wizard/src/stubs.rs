// Archivo: stubs.rs
// Propósito: implementaciones en memoria para pruebas y wiring rápido.
//
// Incluye un repositorio de envío en memoria (`InMemorySubmissionRepository`)
// y un navegador que sólo registra lo que se le pide
// (`RecordingNavigator`). No son durables; se usan en demos y pruebas.
use crate::domain::StepId;
use crate::errors::{Result, WizardError};
use crate::repository::{Navigator, SubmissionEnvelope, SubmissionReceipt, SubmissionRepository};
use crate::state::RegistrationRecord;
use chrono::Utc;
use log::info;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// Repositorio de envío en memoria, indexado por `session_id`.
pub struct InMemorySubmissionRepository {
    /// Registro y acuse por sesión.
    submissions: Mutex<HashMap<Uuid, (RegistrationRecord, SubmissionReceipt)>>,
}

impl InMemorySubmissionRepository {
    /// Crea una nueva instancia vacía.
    pub fn new() -> Self {
        Self { submissions: Mutex::new(HashMap::new()) }
    }

    /// Helper para mapear `Mutex::lock()` en un `Result` con
    /// `WizardError::Storage`.
    fn lock<'a, T>(&'a self, m: &'a Mutex<T>) -> std::result::Result<MutexGuard<'a, T>, WizardError> {
        m.lock().map_err(|e| WizardError::Storage(format!("mutex poisoned: {:?}", e)))
    }

    /// Registro entregado por una sesión, si existe.
    pub fn record_for(&self, session_id: &Uuid) -> Result<Option<RegistrationRecord>> {
        Ok(self.lock(&self.submissions)?.get(session_id).map(|(r, _)| r.clone()))
    }

    /// Número de sesiones entregadas.
    pub fn count(&self) -> Result<usize> {
        Ok(self.lock(&self.submissions)?.len())
    }
}

impl Default for InMemorySubmissionRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionRepository for InMemorySubmissionRepository {
    /// Guarda el registro. Si la sesión ya fue entregada devuelve el acuse
    /// existente sin sobrescribir nada.
    fn submit(&self, envelope: &SubmissionEnvelope) -> Result<SubmissionReceipt> {
        let mut subs = self.lock(&self.submissions)?;
        if let Some((_, receipt)) = subs.get(&envelope.session_id) {
            return Ok(receipt.clone());
        }
        if envelope.record.is_empty() {
            return Err(WizardError::Submission("registro vacío".into()));
        }
        let receipt = SubmissionReceipt { submission_id: Uuid::new_v4(),
                                          session_id: envelope.session_id,
                                          accepted_at: Utc::now() };
        subs.insert(envelope.session_id, (envelope.record.clone(), receipt.clone()));
        info!("[stub] registro de la sesión {} aceptado ({} claves)",
              envelope.session_id,
              envelope.record.len());
        Ok(receipt)
    }

    fn find_receipt(&self, session_id: &Uuid) -> Result<Option<SubmissionReceipt>> {
        Ok(self.lock(&self.submissions)?.get(session_id).map(|(_, r)| r.clone()))
    }
}

/// Evento observado por `RecordingNavigator`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    Navigate(Uuid, StepId),
    Completed(Uuid, Uuid),
}

/// Navegador que sólo acumula los eventos recibidos.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    events: Mutex<Vec<NavigationEvent>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copia de los eventos recibidos hasta ahora.
    pub fn events(&self) -> Vec<NavigationEvent> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn push(&self, event: NavigationEvent) {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).push(event);
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, session_id: Uuid, step: &StepId) {
        self.push(NavigationEvent::Navigate(session_id, step.clone()));
    }

    fn completed(&self, session_id: Uuid, receipt: &SubmissionReceipt) {
        self.push(NavigationEvent::Completed(session_id, receipt.submission_id));
    }
}
