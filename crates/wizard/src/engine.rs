// Archivo: engine.rs
// Propósito: implementar el `WizardController`, la máquina de estados que
// recorre la cadena de pasos, valida cada entrega con el registro, fusiona
// la salida válida en el `RegistrationState` y emite la transición.
//
// El controlador no conoce pantallas ni pilas de navegación: sólo devuelve
// el identificador del paso siguiente como valor.
use crate::domain::{Cursor, NextStep, RawInput, StepId, Transition, ValidationResult};
use crate::errors::{Result, WizardError};
use crate::schema::StepRegistry;
use crate::state::{RegistrationRecord, RegistrationState};
use log::{debug, info, warn};
use std::sync::Arc;

/// Controlador de una sesión del asistente.
///
/// Responsabilidades:
/// - Mantener el cursor (paso actual o terminal).
/// - Validar la entrega del paso actual contra el `StepRegistry`.
/// - Fusionar la salida normalizada y mover el cursor al siguiente paso.
/// - Permitir volver a pasos ya visitados sin borrar datos.
///
/// Una instancia pertenece a una sola sesión; no está pensada para
/// mutación concurrente.
#[derive(Debug, Clone)]
pub struct WizardController {
    registry: Arc<StepRegistry>,
    state: RegistrationState,
    cursor: Cursor,
    /// Pasos visitados antes del actual, del más antiguo al más reciente.
    history: Vec<StepId>,
}

impl WizardController {
    /// Crea un controlador situado en el paso de entrada, con estado vacío.
    pub fn new(registry: Arc<StepRegistry>) -> Self {
        let cursor = Cursor::At(registry.entry().clone());
        Self { registry,
               state: RegistrationState::new(),
               cursor,
               history: Vec::new() }
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Paso actual; `None` una vez alcanzado el terminal.
    pub fn current_step(&self) -> Option<&StepId> {
        match &self.cursor {
            Cursor::At(id) => Some(id),
            Cursor::Finished => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.cursor, Cursor::Finished)
    }

    pub fn history(&self) -> &[StepId] {
        &self.history
    }

    pub fn registry(&self) -> &StepRegistry {
        &self.registry
    }

    pub fn state(&self) -> &RegistrationState {
        &self.state
    }

    pub fn record(&self) -> &RegistrationRecord {
        self.state.record()
    }

    /// Consume el controlador y devuelve el registro acumulado.
    pub fn into_record(self) -> RegistrationRecord {
        self.state.into_record()
    }

    /// Procesa la entrega del paso actual.
    ///
    /// - `Transition::Rejected`: errores por campo; nada cambia.
    /// - `Transition::Moved`: se fusionó la entrega y el cursor avanzó.
    /// - `Transition::Completed`: se fusionó el último paso; terminal.
    ///
    /// Errores: `FlowCompleted` si ya se alcanzó el terminal y
    /// `UnknownStep` si la cadena apunta a un paso inexistente.
    pub fn advance(&mut self, raw: &RawInput) -> Result<Transition> {
        let current = match &self.cursor {
            Cursor::At(id) => id.clone(),
            Cursor::Finished => return Err(WizardError::FlowCompleted),
        };
        let registry = Arc::clone(&self.registry);
        let def = registry.get(&current)?;

        let normalized = match def.validate(raw) {
            ValidationResult::Invalid(errors) => {
                warn!("paso {} rechazado: {:?}", current, errors.keys().collect::<Vec<_>>());
                return Ok(Transition::Rejected(errors));
            }
            ValidationResult::Valid(fields) => fields,
        };

        debug_assert!({
            let declared = registry.declared_keys();
            normalized.keys().all(|k| declared.contains(k))
        });

        // Comprobar el destino antes de tocar el estado.
        let next = def.next().clone();
        if let NextStep::Step(id) = &next {
            registry.get(id)?;
        }

        self.state.merge(normalized);
        self.history.push(current.clone());
        match next {
            NextStep::Step(to) => {
                info!("paso {} -> {}", current, to);
                self.cursor = Cursor::At(to.clone());
                Ok(Transition::Moved { from: current, to })
            }
            NextStep::Terminal => {
                info!("paso {} completó el flujo ({} claves)", current, self.state.len());
                self.cursor = Cursor::Finished;
                Ok(Transition::Completed { last: current })
            }
        }
    }

    /// Igual que `advance`, pero exige que `step` sea el paso actual. Útil
    /// cuando la capa de presentación envía el id del paso junto con la
    /// entrada.
    pub fn advance_from(&mut self, step: &StepId, raw: &RawInput) -> Result<Transition> {
        self.registry.get(step)?;
        match &self.cursor {
            Cursor::At(current) if current == step => self.advance(raw),
            Cursor::At(current) => {
                Err(WizardError::InvalidNavigation(format!("se entregó {} pero el paso actual es {}", step, current)))
            }
            Cursor::Finished => Err(WizardError::FlowCompleted),
        }
    }

    /// Vuelve a un paso ya visitado. Sólo mueve el cursor: el registro no
    /// se modifica. Volver al paso actual no tiene efecto.
    pub fn back_to(&mut self, step: &StepId) -> Result<()> {
        self.registry.get(step)?;
        let current = match &self.cursor {
            Cursor::At(id) => id,
            Cursor::Finished => return Err(WizardError::FlowCompleted),
        };
        if current == step {
            return Ok(());
        }
        let pos = self.history
                      .iter()
                      .rposition(|s| s == step)
                      .ok_or_else(|| WizardError::InvalidNavigation(format!("el paso {} no ha sido visitado", step)))?;
        debug!("volviendo de {} a {}", current, step);
        self.history.truncate(pos);
        self.cursor = Cursor::At(step.clone());
        Ok(())
    }

    /// Vuelve al paso visitado inmediatamente antes del actual y lo
    /// devuelve.
    pub fn back(&mut self) -> Result<StepId> {
        let previous = self.history
                           .last()
                           .cloned()
                           .ok_or_else(|| WizardError::InvalidNavigation("no hay paso anterior".into()))?;
        self.back_to(&previous)?;
        Ok(previous)
    }
}
