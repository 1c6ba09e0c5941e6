// registration/mod.rs
//
// Flujo concreto de alta de usuario: seis pasos encadenados desde los
// datos personales hasta el PIN. La tabla de pasos vive en `steps`; aqui
// solo se arma el registro y el servicio.
pub mod steps;

use std::sync::Arc;
use crate::catalog::{IncomeRange, LiquidityLevel, Occupation, RiskTolerance};
use wizard::{StepRegistry, SubmissionRepository, WizardService};

pub use steps::personal_info::ID as ENTRY;

/// Construye el registro de pasos del alta, comprobando la cadena.
pub fn registry() -> wizard::Result<StepRegistry> {
  StepRegistry::new(ENTRY,
                    vec![steps::personal_info::definition(),
                         steps::address::definition(),
                         steps::occupation::definition(),
                         steps::risk_tolerance::definition(),
                         steps::password::definition(),
                         steps::set_pin::definition()])
}

/// Servicio de sesiones del alta con el repositorio de envio indicado.
pub fn service<R>(repo: Arc<R>) -> wizard::Result<WizardService<R>>
  where R: SubmissionRepository + 'static
{
  Ok(WizardService::new(repo, Arc::new(registry()?)))
}

/// Opciones de los campos selector del alta; `None` para campos libres.
pub fn choices(field: &str) -> Option<Vec<(&'static str, &'static str)>> {
  match field {
    "occupation" => Some(Occupation::choices()),
    "incomeRange" => Some(IncomeRange::choices()),
    "liquidityLevel" => Some(LiquidityLevel::choices()),
    "riskTolerance" => Some(RiskTolerance::choices()),
    _ => None,
  }
}
