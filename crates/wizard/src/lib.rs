//! Crate `wizard`: asistente de registro por pasos
//!
//! Este crate define los tipos de dominio (`StepId`, `FieldValue`,
//! `ValidationResult`), los validadores de campo, el registro declarativo
//! de pasos (`StepRegistry`), el estado agregado (`RegistrationState`) y el
//! controlador que recorre la cadena (`WizardController`). También expone
//! el servicio `WizardService`, que entrega el registro final a un
//! `SubmissionRepository`, y stubs en memoria útiles para pruebas.
//!
//! Diseño resumido:
//! - Pasos como datos: cada paso es una `StepDefinition` con sus campos,
//!   validadores y normalización.
//! - Validación exhaustiva: una entrega devuelve todos los errores de campo
//!   a la vez y nunca modifica el estado.
//! - Fusión por clave: la salida válida se fusiona en el registro (gana la
//!   última escritura); volver atrás no borra nada.
//!
//! Ejemplo rápido:
//! ```rust
//! use std::collections::HashMap;
//! use std::sync::Arc;
//! use wizard::{FieldSpec, StepDefinition, StepRegistry, Transition, WizardController};
//!
//! let registry = StepRegistry::new("Address",
//!                                  vec![StepDefinition::new("Address")
//!                                       .field(FieldSpec::text("city").required("City is required"))
//!                                       .terminal()]).unwrap();
//! let mut wizard = WizardController::new(Arc::new(registry));
//! let raw: HashMap<String, String> = [("city".to_string(), "NYC".to_string())].into();
//! assert!(matches!(wizard.advance(&raw).unwrap(), Transition::Completed { .. }));
//! assert_eq!(wizard.record().get_str("city"), Some("NYC"));
//! ```
pub mod domain;
pub mod engine;
pub mod errors;
pub mod repository;
pub mod schema;
pub mod service;
pub mod state;
pub mod stubs;
pub mod validators;

pub use domain::*;
pub use engine::*;
pub use errors::*;
pub use repository::*;
pub use schema::*;
pub use service::*;
pub use state::*;
pub use stubs::*;
