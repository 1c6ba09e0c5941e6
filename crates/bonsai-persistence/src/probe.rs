// Archivo: probe.rs
// Propósito: comprobar que la base de datos responde. Cada llamada abre una
// sesion propia, ejecuta una consulta fija de solo lectura y la cierra al
// salir del alcance, tanto si tuvo exito como si no.

use crate::config::{DbConfig, DbTarget};
use crate::errors::{ConnectivityError, Result};
use diesel::prelude::*;
use diesel::result::ConnectionError;
use diesel::sql_types::Text;
use serde::Serialize;

/// Fecha/hora actual del servidor como texto. Valida en Postgres y SQLite.
pub const PROBE_QUERY: &str = "SELECT CAST(CURRENT_TIMESTAMP AS TEXT) AS date";

#[derive(Debug, QueryableByName)]
struct ProbeRow {
  #[diesel(sql_type = Text)]
  date: String,
}

/// Resultado satisfactorio de la sonda.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
  pub backend: &'static str,
  pub date: String,
}

/// Sonda de conectividad sin estado: solo guarda la configuracion.
#[derive(Debug, Clone)]
pub struct ConnectivityProbe {
  config: DbConfig,
}

impl ConnectivityProbe {
  pub fn new(config: DbConfig) -> Self {
    ConnectivityProbe { config }
  }

  pub fn from_env() -> Self {
    Self::new(DbConfig::from_env())
  }

  pub fn config(&self) -> &DbConfig {
    &self.config
  }

  /// Abre una sesion, consulta la hora del servidor y la libera.
  pub fn run(&self) -> Result<ProbeReport> {
    let target = self.config.target().map_err(|e| {
                                      log::error!("sonda: {}", e);
                                      e
                                    })?;
    let backend = target.backend();
    log::debug!("sonda: abriendo sesion {}", backend);
    let outcome = match &target {
      DbTarget::Postgres(conninfo) => {
        let mut conn = PgConnection::establish(conninfo).map_err(map_conn_err)?;
        fetch_date(diesel::sql_query(PROBE_QUERY).get_result::<ProbeRow>(&mut conn))
      }
      DbTarget::Sqlite(path) => {
        let mut conn = SqliteConnection::establish(path).map_err(map_conn_err)?;
        fetch_date(diesel::sql_query(PROBE_QUERY).get_result::<ProbeRow>(&mut conn))
      }
    };
    match outcome {
      Ok(date) => {
        log::info!("sonda {} correcta: {}", backend, date);
        Ok(ProbeReport { backend, date })
      }
      Err(e) => {
        log::error!("sonda {}: {}", backend, e);
        Err(e)
      }
    }
  }
}

fn fetch_date(row: QueryResult<ProbeRow>) -> Result<String> {
  row.map(|r| r.date).map_err(|e| ConnectivityError::Query(e.to_string()))
}

fn map_conn_err(e: ConnectionError) -> ConnectivityError {
  let err = ConnectivityError::Connection(e.to_string());
  log::error!("sonda: {}", err);
  err
}
