use crate::errors::OnboardingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Genera un enum de catalogo (lista cerrada de un selector) con su codigo
/// de almacenamiento, su etiqueta visible, `Display` y `FromStr`.
macro_rules! catalog {
  ($(#[$meta:meta])* $name:ident, $catalog:literal { $($variant:ident => ($code:literal, $label:literal)),+ $(,)? }) => {
    $(#[$meta])*
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum $name {
      $(
        #[serde(rename = $code)]
        $variant,
      )+
    }

    impl $name {
      /// Todos los valores, en el orden del selector.
      pub const ALL: &'static [$name] = &[$($name::$variant),+];

      /// Nombre del catalogo (para mensajes de error).
      pub const CATALOG: &'static str = $catalog;

      /// Codigo guardado en el registro.
      pub fn code(&self) -> &'static str {
        match self {
          $($name::$variant => $code),+
        }
      }

      /// Etiqueta mostrada al usuario.
      pub fn label(&self) -> &'static str {
        match self {
          $($name::$variant => $label),+
        }
      }

      pub fn codes() -> Vec<&'static str> {
        Self::ALL.iter().map(|v| v.code()).collect()
      }

      /// Pares (codigo, etiqueta) para presentar el selector.
      pub fn choices() -> Vec<(&'static str, &'static str)> {
        Self::ALL.iter().map(|v| (v.code(), v.label())).collect()
      }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
      }
    }

    impl FromStr for $name {
      type Err = OnboardingError;

      fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.iter()
                 .find(|v| v.code() == s)
                 .copied()
                 .ok_or_else(|| OnboardingError::UnknownCode { catalog: $catalog, code: s.to_string() })
      }
    }
  };
}

catalog!(
  /// Ocupacion declarada por el usuario.
  Occupation, "occupation" {
    Employee => ("EMP", "Employee"),
    SelfEmployed => ("SEL", "Self-employed"),
    BusinessOwner => ("BUS", "Business Owner"),
    Student => ("STU", "Student"),
    Homemaker => ("HOM", "Homemaker"),
    Retired => ("RET", "Retired"),
    Unemployed => ("UNP", "Unemployed"),
    PublicEmployee => ("GOV", "Public Employee"),
    Technician => ("TEC", "Technician"),
    Professional => ("PRO", "Professional"),
    Military => ("MIL", "Military"),
    Other => ("OTH", "Other"),
  }
);

catalog!(
  /// Rango de ingreso anual.
  IncomeRange, "income_range" {
    UpTo25K => ("0-25K", "0 - 25K"),
    From26KTo50K => ("26-50K", "26 - 50K"),
    From51KTo100K => ("51-100K", "51 - 100K"),
    From101KTo250K => ("101-250K", "101 - 250K"),
    Over250K => ("250K+", "250K+"),
  }
);

catalog!(
  /// Plazo en dias en que el usuario necesitaria disponer de su dinero.
  LiquidityLevel, "liquidity_level" {
    UpTo30Days => ("0-30", "0 - 30 Days"),
    From30To60Days => ("30-60", "30 - 60 Days"),
    From60To90Days => ("60-90", "60 - 90 Days"),
  }
);

catalog!(
  /// Tolerancia al riesgo del perfil de inversion.
  RiskTolerance, "risk_tolerance" {
    High => ("HIGH", "High"),
    Medium => ("MEDIUM", "Medium"),
    Low => ("LOW", "Low"),
  }
);

impl Default for RiskTolerance {
  fn default() -> Self {
    RiskTolerance::Medium
  }
}
