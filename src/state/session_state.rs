// ============================================================================
// SESSION STATE - Estado de la sesión del partner
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::{Partner, PartnerStatus};
use crate::services::SessionStore;

/// Estado de sesión del partner
#[derive(Clone)]
pub struct SessionState {
    pub partner: Rc<RefCell<Option<Partner>>>,
    pub loading: Rc<RefCell<bool>>,
}

impl SessionState {
    /// Crear nuevo estado de sesión
    pub fn new() -> Self {
        Self {
            partner: Rc::new(RefCell::new(None)),
            loading: Rc::new(RefCell::new(false)),
        }
    }

    /// Establecer partner - se persiste el blob completo en cada mutación
    pub fn set_partner(&self, partner: Option<Partner>) {
        if let Some(ref p) = partner {
            if let Err(e) = SessionStore::save(p) {
                log::error!("❌ Error guardando partner en storage: {}", e);
            }
        }
        *self.partner.borrow_mut() = partner;
    }

    /// Obtener partner
    pub fn get_partner(&self) -> Option<Partner> {
        self.partner.borrow().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.partner.borrow().is_some()
    }

    /// El partner está online ("live")
    pub fn is_live(&self) -> bool {
        self.partner
            .borrow()
            .as_ref()
            .map(|p| p.status.is_online())
            .unwrap_or(false)
    }

    /// Actualizar solo el estado de disponibilidad, persistiendo el blob
    pub fn set_status(&self, status: PartnerStatus) {
        let updated = {
            let mut partner = self.partner.borrow_mut();
            if let Some(ref mut p) = *partner {
                p.status = status;
                Some(p.clone())
            } else {
                None
            }
        };
        if let Some(p) = updated {
            if let Err(e) = SessionStore::save(&p) {
                log::error!("❌ Error guardando partner en storage: {}", e);
            }
        }
    }

    /// Establecer loading
    pub fn set_loading(&self, loading: bool) {
        *self.loading.borrow_mut() = loading;
    }

    /// Obtener loading
    pub fn get_loading(&self) -> bool {
        *self.loading.borrow()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
