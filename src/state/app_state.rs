// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================
// Un solo objeto construido en page-load; toda mutación pasa por aquí.
// Sin variables libres de módulo: partner, flag de live y handle del
// timer viven juntos con un único dueño lógico.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::services::FeedPoller;
use crate::state::{FeedState, SessionState};

/// Tipo de actualización del DOM
#[derive(Clone, Debug)]
pub enum UpdateType {
    /// Actualización incremental (solo secciones específicas)
    Incremental(IncrementalUpdate),
    /// Re-render completo (login/logout, cambio de vista)
    FullRender,
}

/// Tipo de actualización incremental específica
#[derive(Clone, Debug)]
pub enum IncrementalUpdate {
    /// Re-renderizar las listas del feed (disponibles + activas + completadas)
    Feed,
    /// Actualizar los controles de Go Live (botones, mensajes offline)
    GoLiveControls,
}

/// Estado global de la aplicación
#[derive(Clone)]
pub struct AppState {
    pub session: SessionState,
    pub feed: FeedState,
    pub poller: FeedPoller,

    // UI State
    pub show_register: Rc<RefCell<bool>>,
    pub auth_error: Rc<RefCell<Option<String>>>,
    pub register_success: Rc<RefCell<bool>>,
}

impl AppState {
    /// Crear nuevo estado de aplicación
    pub fn new() -> Self {
        Self {
            session: SessionState::new(),
            feed: FeedState::new(),
            poller: FeedPoller::new(),

            show_register: Rc::new(RefCell::new(false)),
            auth_error: Rc::new(RefCell::new(None)),
            register_success: Rc::new(RefCell::new(false)),
        }
    }

    /// Cambiar entre formulario de login y de registro
    pub fn set_show_register(&self, show: bool) {
        *self.show_register.borrow_mut() = show;
        *self.auth_error.borrow_mut() = None;
        if show {
            *self.register_success.borrow_mut() = false;
        }
        crate::rerender_app();
    }

    pub fn set_auth_error(&self, error: Option<String>) {
        *self.auth_error.borrow_mut() = error;
    }

    pub fn get_auth_error(&self) -> Option<String> {
        self.auth_error.borrow().clone()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
