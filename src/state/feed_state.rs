// ============================================================================
// FEED STATE - Último snapshot del feed de entregas
// ============================================================================
// El feed es una copia de solo lectura que se reemplaza completa en cada
// refresh; las vistas nunca lo mutan.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};

use crate::viewmodels::feed_viewmodel::FeedModel;

/// Estado del feed
#[derive(Clone)]
pub struct FeedState {
    pub model: Rc<RefCell<Option<FeedModel>>>,
    pub last_refresh: Rc<RefCell<Option<DateTime<Utc>>>>,
}

impl FeedState {
    pub fn new() -> Self {
        Self {
            model: Rc::new(RefCell::new(None)),
            last_refresh: Rc::new(RefCell::new(None)),
        }
    }

    /// Reemplazar el snapshot completo del feed
    pub fn set_model(&self, model: FeedModel) {
        *self.model.borrow_mut() = Some(model);
        *self.last_refresh.borrow_mut() = Some(Utc::now());
    }

    pub fn get_model(&self) -> Option<FeedModel> {
        self.model.borrow().clone()
    }

    /// Vaciar el feed (logout / al entrar offline se reconstruye sin disponibles)
    pub fn clear(&self) {
        *self.model.borrow_mut() = None;
        *self.last_refresh.borrow_mut() = None;
    }

    pub fn get_last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_refresh.borrow()
    }
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new()
    }
}
