// Archivo: config.rs
// Propósito: leer los parametros de conexion desde el entorno (con soporte
// `.env` via dotenvy) y traducirlos al destino concreto de Diesel.

use crate::errors::{ConnectivityError, Result};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

pub const ENV_URL: &str = "DATABASE_URL";
pub const ENV_USER: &str = "DB_USER";
pub const ENV_PASSWORD: &str = "DB_PASSWORD";
pub const ENV_DSN: &str = "DB_DSN";
pub const ENV_WALLET_LOCATION: &str = "DB_WALLET_LOCATION";
pub const ENV_WALLET_PASSWORD: &str = "DB_WALLET_PASSWORD";

/// Segundos que espera libpq antes de abandonar el intento de conexion.
const CONNECT_TIMEOUT_SECS: u32 = 10;

/// Parametros de conexion. Las credenciales nunca aparecen en `Debug`.
#[derive(Clone, Default)]
pub struct DbConfig {
  pub url: Option<String>,
  pub user: Option<String>,
  pub password: Option<String>,
  pub dsn: Option<String>,
  pub wallet_location: Option<PathBuf>,
  pub wallet_password: Option<String>,
}

/// Destino resuelto: qué backend de Diesel usar y con qué cadena.
#[derive(Clone, PartialEq, Eq)]
pub enum DbTarget {
  Postgres(String),
  Sqlite(String),
}

impl DbTarget {
  pub fn backend(&self) -> &'static str {
    match self {
      DbTarget::Postgres(_) => "postgres",
      DbTarget::Sqlite(_) => "sqlite",
    }
  }
}

impl fmt::Debug for DbTarget {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    // la cadena de Postgres puede llevar contraseñas
    match self {
      DbTarget::Postgres(_) => f.write_str("Postgres(***)"),
      DbTarget::Sqlite(path) => f.debug_tuple("Sqlite").field(path).finish(),
    }
  }
}

impl fmt::Debug for DbConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let redact = |v: &Option<String>| v.as_ref().map(|_| "***");
    f.debug_struct("DbConfig")
     .field("url", &redact(&self.url))
     .field("user", &self.user)
     .field("password", &redact(&self.password))
     .field("dsn", &self.dsn)
     .field("wallet_location", &self.wallet_location)
     .field("wallet_password", &redact(&self.wallet_password))
     .finish()
  }
}

impl DbConfig {
  /// Lee la configuracion del entorno del proceso, cargando antes `.env` si
  /// existe.
  pub fn from_env() -> Self {
    dotenvy::dotenv().ok();
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Igual que `from_env` pero con una fuente arbitraria (util en tests).
  pub fn from_lookup<F>(lookup: F) -> Self
    where F: Fn(&str) -> Option<String>
  {
    let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
    DbConfig { url:             get(ENV_URL),
               user:            get(ENV_USER),
               password:        get(ENV_PASSWORD),
               dsn:             get(ENV_DSN),
               wallet_location: get(ENV_WALLET_LOCATION).map(PathBuf::from),
               wallet_password: get(ENV_WALLET_PASSWORD) }
  }

  pub fn from_map(vars: &HashMap<String, String>) -> Self {
    Self::from_lookup(|key| vars.get(key).cloned())
  }

  /// Configuracion que apunta directamente a una URL (Postgres o ruta
  /// SQLite).
  pub fn with_url(url: impl Into<String>) -> Self {
    DbConfig { url: Some(url.into()),
               ..Default::default() }
  }

  /// Resuelve el destino. `DATABASE_URL` tiene prioridad; si no existe se
  /// construye una cadena de conexion Postgres a partir de usuario,
  /// contraseña, DSN y, opcionalmente, el directorio de certificados.
  pub fn target(&self) -> Result<DbTarget> {
    if let Some(url) = &self.url {
      return Ok(classify_url(url));
    }

    let missing: Vec<&str> = [(ENV_USER, self.user.is_none()),
                              (ENV_PASSWORD, self.password.is_none()),
                              (ENV_DSN, self.dsn.is_none())].iter()
                                                            .filter(|(_, absent)| *absent)
                                                            .map(|(name, _)| *name)
                                                            .collect();
    if !missing.is_empty() {
      return Err(ConnectivityError::Config(format!("faltan variables: {} (o {})", missing.join(", "), ENV_URL)));
    }

    let dsn = self.dsn.as_deref().unwrap_or_default();
    let (host, port, dbname) = parse_dsn(dsn)?;
    let mut parts = vec![kv("host", &host)];
    if let Some(port) = port {
      parts.push(kv("port", &port.to_string()));
    }
    parts.push(kv("dbname", &dbname));
    parts.push(kv("user", self.user.as_deref().unwrap_or_default()));
    parts.push(kv("password", self.password.as_deref().unwrap_or_default()));
    parts.push(kv("connect_timeout", &CONNECT_TIMEOUT_SECS.to_string()));

    if let Some(dir) = &self.wallet_location {
      parts.push(kv("sslmode", "verify-full"));
      parts.push(kv("sslrootcert", &dir.join("root.crt").to_string_lossy()));
      parts.push(kv("sslcert", &dir.join("postgresql.crt").to_string_lossy()));
      parts.push(kv("sslkey", &dir.join("postgresql.key").to_string_lossy()));
      if let Some(pass) = &self.wallet_password {
        parts.push(kv("sslpassword", pass));
      }
    } else if self.wallet_password.is_some() {
      log::warn!("{} definido sin {}; se ignora", ENV_WALLET_PASSWORD, ENV_WALLET_LOCATION);
    }

    Ok(DbTarget::Postgres(parts.join(" ")))
  }
}

fn classify_url(url: &str) -> DbTarget {
  let l = url.to_lowercase();
  if l.starts_with("postgres://") || l.starts_with("postgresql://") || l.contains("host=") {
    DbTarget::Postgres(url.to_string())
  } else {
    DbTarget::Sqlite(url.strip_prefix("sqlite://").unwrap_or(url).to_string())
  }
}

/// `host[:port]/dbname`
fn parse_dsn(dsn: &str) -> Result<(String, Option<u16>, String)> {
  let bad = || ConnectivityError::Config(format!("{} debe tener la forma host[:puerto]/base, se recibio '{}'", ENV_DSN, dsn));
  let (addr, dbname) = dsn.split_once('/').ok_or_else(bad)?;
  if addr.is_empty() || dbname.is_empty() {
    return Err(bad());
  }
  match addr.rsplit_once(':') {
    Some((host, port)) => {
      let port = port.parse::<u16>().map_err(|_| bad())?;
      if host.is_empty() {
        return Err(bad());
      }
      Ok((host.to_string(), Some(port), dbname.to_string()))
    }
    None => Ok((addr.to_string(), None, dbname.to_string())),
  }
}

/// Par `clave='valor'` con las comillas y barras escapadas como espera
/// libpq.
fn kv(key: &str, value: &str) -> String {
  let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
  format!("{}='{}'", key, escaped)
}
