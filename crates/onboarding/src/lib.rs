//! onboarding: flujo de alta de usuarios de Bons-AI
//!
//! Crate que define el flujo concreto de registro sobre el crate `wizard`:
//! la tabla de pasos (datos personales, direccion, ocupacion, tolerancia al
//! riesgo, contraseña y PIN), los catalogos de los selectores y la lectura
//! tipada del registro completo (`RegistrationSummary`).

pub mod catalog;
pub mod errors;
pub mod flows;
pub mod summary;

pub use catalog::{IncomeRange, LiquidityLevel, Occupation, RiskTolerance};
pub use errors::OnboardingError;
pub use flows::registration;
pub use summary::RegistrationSummary;
