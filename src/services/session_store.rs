// ============================================================================
// SESSION STORE - Persistencia del partner en localStorage
// ============================================================================
// Un solo blob JSON (`currentPartner`), sobrescrito completo en cada login
// y cambio de estado, eliminado en logout.
// ============================================================================

use crate::models::Partner;
use crate::utils::storage::{load_from_storage, remove_from_storage, save_to_storage};

const PARTNER_STORAGE_KEY: &str = "currentPartner";

pub struct SessionStore;

impl SessionStore {
    /// Guardar el partner completo (sobrescribe el blob anterior)
    pub fn save(partner: &Partner) -> Result<(), String> {
        save_to_storage(PARTNER_STORAGE_KEY, partner)?;
        log::info!("💾 Partner guardado en localStorage: {}", partner.id);
        Ok(())
    }

    /// Cargar el partner cacheado, si existe
    pub fn load() -> Option<Partner> {
        let partner: Option<Partner> = load_from_storage(PARTNER_STORAGE_KEY);
        if let Some(ref p) = partner {
            log::info!("📋 Partner restaurado de localStorage: {}", p.id);
        }
        partner
    }

    /// Eliminar el partner cacheado (logout)
    pub fn clear() -> Result<(), String> {
        remove_from_storage(PARTNER_STORAGE_KEY)?;
        log::info!("🗑️ Partner eliminado de localStorage");
        Ok(())
    }
}
