use crate::catalog::{IncomeRange, LiquidityLevel, Occupation, RiskTolerance};
use crate::errors::{OnboardingError, Result};
use serde::{Deserialize, Serialize};
use wizard::{RegistrationRecord, StepRegistry};

/// Vista tipada de un registro completo, sin los valores secretos
/// (`password`, `pin`), que se ignoran al deserializar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationSummary {
  pub name: String,
  pub email: String,
  pub phone: String,
  pub alt_email: String,
  pub national_id: String,
  pub day_of_birth: String,
  pub country: String,
  pub state: String,
  pub city: String,
  pub address_line: String,
  pub zip_code: String,
  pub occupation: Occupation,
  pub income_range: IncomeRange,
  pub liquidity_level: LiquidityLevel,
  pub risk_tolerance: RiskTolerance,
}

impl RegistrationSummary {
  /// Lee el registro en forma tipada. Falla con `Incomplete` si falta
  /// alguna clave declarada por `registry`.
  pub fn from_record(registry: &StepRegistry, record: &RegistrationRecord) -> Result<Self> {
    if let Some(missing) = registry.declared_keys().into_iter().find(|k| !record.contains_key(k)) {
      log::debug!("resumen pedido con el registro incompleto: falta {}", missing);
      return Err(OnboardingError::Incomplete(missing));
    }
    Ok(record.decode()?)
  }
}
