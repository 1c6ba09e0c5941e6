//! bonsai-onboarding: aplicacion de alta de usuarios de Bons-AI.
//!
//! Une el flujo de registro (`onboarding`, sobre el motor `wizard`) con su
//! presentacion en terminal y el backend HTTP que expone la prueba de
//! conectividad a la base de datos (`bonsai-persistence`).

pub mod cli;
pub mod config;
pub mod errors;
pub mod server;

pub use config::AppConfig;
pub use errors::{AppError, Result};
