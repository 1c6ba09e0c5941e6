// Archivo: config.rs
// Propósito: configuracion del servidor HTTP leida del entorno (`.env`
// incluido).

use crate::errors::{AppError, Result};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_PORT: u16 = 3001;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig { bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
                    port:      DEFAULT_PORT }
    }
}

impl AppConfig {
    /// `PORT` y `BIND_ADDR`; los ausentes toman el valor por defecto.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
        where F: Fn(&str) -> Option<String>
    {
        let mut cfg = AppConfig::default();
        if let Some(port) = lookup("PORT").filter(|v| !v.trim().is_empty()) {
            cfg.port = port.trim()
                           .parse()
                           .map_err(|_| AppError::Config(format!("PORT no es un puerto valido: '{}'", port)))?;
        }
        if let Some(addr) = lookup("BIND_ADDR").filter(|v| !v.trim().is_empty()) {
            cfg.bind_addr = addr.trim()
                                .parse()
                                .map_err(|_| AppError::Config(format!("BIND_ADDR no es una IP valida: '{}'", addr)))?;
        }
        Ok(cfg)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}
