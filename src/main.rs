use bonsai_onboarding::server::{self, AppState};
use bonsai_onboarding::{cli, AppConfig};
use bonsai_persistence::ConnectivityProbe;
use onboarding::registration;
use std::error::Error;
use std::io;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use wizard::InMemorySubmissionRepository;

/// Menú interactivo del backend de Bons-AI.
///
/// Opciones soportadas:
/// 1) Completar el alta de usuario en la terminal
/// 2) Probar la conexion con la base de datos
/// 3) Levantar el servidor HTTP (bloquea hasta Ctrl+C)
/// 4) Salir
fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let repo = Arc::new(InMemorySubmissionRepository::new());
    let service = registration::service(repo.clone())?;

    loop {
        println!("\n== Bons-AI menu ==");
        println!("1) Alta de usuario");
        println!("2) Probar conexion a la base de datos");
        println!("3) Levantar servidor HTTP");
        println!("4) Salir");
        let choice = match cli::prompt(&mut io::stdin().lock(), &mut io::stdout(), "Elige una opción: ")? {
            Some(c) => c,
            None => break,
        };
        match choice.trim() {
            "1" => {
                let stdin = io::stdin();
                let mut input = stdin.lock();
                let mut output = io::stdout();
                match cli::run_wizard(&service, &mut input, &mut output) {
                    Ok(Some(receipt)) => println!("Recibo: {} ({} envios en memoria)",
                                                  receipt.submission_id,
                                                  repo.count().unwrap_or(0)),
                    Ok(None) => {}
                    Err(e) => eprintln!("Error en el alta: {}", e),
                }
            }
            "2" => match ConnectivityProbe::from_env().run() {
                Ok(report) => println!("Conexion correcta ({}): {}", report.backend, report.date),
                Err(e) => eprintln!("Conexion fallida: {}", e),
            },
            "3" => {
                let config = AppConfig::from_env()?;
                let state = AppState::new(ConnectivityProbe::from_env());
                let runtime = tokio::runtime::Runtime::new()?;
                runtime.block_on(async {
                           tokio::select! {
                               res = server::serve(&config, state) => res,
                               _ = tokio::signal::ctrl_c() => {
                                   tracing::info!("servidor detenido");
                                   Ok(())
                               }
                           }
                       })?;
            }
            "4" => break,
            other => eprintln!("Opción no válida: {}", other),
        }
    }
    Ok(())
}
