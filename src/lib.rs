// ============================================================================
// BOXY PARTNER APP - FRONTEND MVVM ESTRICTO (RUST PURO)
// ============================================================================
// Arquitectura MVVM estricta:
// - Views: Funciones que renderizan DOM (sin lógica)
// - ViewModels: Estado + Lógica UI
// - Services: SOLO comunicación API
// - State: State Management con Rc<RefCell>
// - Models: Estructuras compartidas con backend
// ============================================================================

mod app;
mod config;
mod dom;
mod models;
mod services;
mod state;
mod utils;
mod viewmodels;
mod views;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wasm_logger::Config;

use crate::app::App;
use crate::state::app_state::UpdateType;

// Variable estática global para mantener la instancia de App
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Inicializar panic hook para mejor debugging
    console_error_panic_hook::set_once();

    // Inicializar logging
    if config::CONFIG.is_logging_enabled() {
        wasm_logger::init(Config::default());
    }
    log::info!("🚀 Boxy Partner App - Rust Puro + MVVM");

    // Crear y renderizar app
    let mut app = App::new()?;
    app.render()?;

    // Guardar app en variable global
    APP.with(|app_cell| {
        *app_cell.borrow_mut() = Some(app);
    });

    Ok(())
}

/// Re-render completo de la app
pub fn rerender_app() {
    rerender_app_with_type(UpdateType::FullRender);
}

/// Actualizar la app con tipo específico (incremental o completo)
pub fn rerender_app_with_type(update_type: UpdateType) {
    APP.with(|app_cell| {
        match update_type {
            UpdateType::Incremental(inc_type) => {
                log::debug!("🔄 [UPDATE] Actualización incremental: {:?}", inc_type);
                // Primero intentamos actualización incremental; si la sección
                // no existe todavía caemos a un re-render completo
                let needs_full_render = {
                    if let Some(ref app) = *app_cell.borrow() {
                        match app.update_incremental(inc_type) {
                            Ok(()) => false,
                            Err(e) => {
                                let error_str = format!("{:?}", e);
                                if error_str.contains("needs full render") {
                                    log::debug!("🔄 [UPDATE] Cambiando a re-render completo");
                                    true
                                } else {
                                    log::error!("❌ Error en actualización incremental: {:?}", e);
                                    false
                                }
                            }
                        }
                    } else {
                        log::warn!("⚠️ [UPDATE] App no está inicializada");
                        false
                    }
                };

                if needs_full_render {
                    if let Some(ref mut app_mut) = *app_cell.borrow_mut() {
                        if let Err(e) = app_mut.render() {
                            log::error!("❌ Error re-renderizando: {:?}", e);
                        }
                    }
                }
            }
            UpdateType::FullRender => {
                if let Some(ref mut app_mut) = *app_cell.borrow_mut() {
                    if let Err(e) = app_mut.render() {
                        log::error!("❌ Error re-renderizando: {:?}", e);
                    }
                } else {
                    log::warn!("⚠️ [RERENDER] App no está inicializada");
                }
            }
        }
    });
}
