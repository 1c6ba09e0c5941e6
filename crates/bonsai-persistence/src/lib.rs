//! Acceso a base de datos del backend de Bons-AI.
//!
//! Por ahora solo expone la sonda de conectividad usada por `GET /api/test`:
//! abre una sesion por llamada, ejecuta una consulta fija que devuelve la
//! hora del servidor y la libera. El backend (Postgres o SQLite) se elige en
//! tiempo de ejecucion a partir de la configuracion.

pub mod config;
pub mod errors;
mod probe;

pub use config::{DbConfig, DbTarget};
pub use errors::{ConnectivityError, Result};
pub use probe::{ConnectivityProbe, ProbeReport, PROBE_QUERY};
