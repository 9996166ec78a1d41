// ============================================================================
// DIALOG HELPERS - alert/confirm nativos del navegador
// ============================================================================
// Los fallos de red y de aplicación se muestran con alerts bloqueantes.
// Sin window (tests nativos) son no-op.
// ============================================================================

use web_sys::window;

/// Mostrar alert bloqueante
pub fn alert(message: &str) {
    if let Some(win) = window() {
        let _ = win.alert_with_message(message);
    } else {
        log::warn!("⚠️ [DIALOG] alert sin window disponible: {}", message);
    }
}

/// Mostrar confirm bloqueante - devuelve false si no hay window
pub fn confirm(message: &str) -> bool {
    match window() {
        Some(win) => win.confirm_with_message(message).unwrap_or(false),
        None => false,
    }
}
