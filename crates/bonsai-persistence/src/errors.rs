use thiserror::Error;

/// Fallos de la sonda de conectividad. Cada variante lleva el mensaje del
/// driver (o de la validacion de configuracion) tal como se devuelve al
/// cliente HTTP.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectivityError {
  /// Faltan variables de entorno o tienen un formato invalido.
  #[error("configuracion de base de datos invalida: {0}")]
  Config(String),

  /// No se pudo abrir la sesion con el servidor.
  #[error("no se pudo conectar a la base de datos: {0}")]
  Connection(String),

  /// La sesion se abrio pero la consulta fallo.
  #[error("fallo la consulta de prueba: {0}")]
  Query(String),
}

pub type Result<T> = std::result::Result<T, ConnectivityError>;
