// ============================================================================
// FEED POLLER - Timer de refresco del feed de entregas
// ============================================================================
// Garantía de orden: como máximo UN timer activo a la vez. El handle se
// guarda en un slot y se consulta antes de crear uno nuevo.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;

use crate::config::CONFIG;

/// Slot que mantiene como máximo un handle vivo. La fábrica solo se
/// invoca si el slot está libre; un slot ocupado nunca se reemplaza.
struct HandleSlot<T> {
    handle: Rc<RefCell<Option<T>>>,
}

impl<T> HandleSlot<T> {
    fn new() -> Self {
        Self {
            handle: Rc::new(RefCell::new(None)),
        }
    }

    /// true si el slot estaba libre y el handle nuevo quedó guardado
    fn occupy<F: FnOnce() -> T>(&self, make: F) -> bool {
        let mut handle = self.handle.borrow_mut();
        if handle.is_some() {
            return false;
        }
        *handle = Some(make());
        true
    }

    /// Liberar el slot devolviendo el handle (el drop del caller lo cancela)
    fn release(&self) -> Option<T> {
        self.handle.borrow_mut().take()
    }
}

impl<T> Clone for HandleSlot<T> {
    fn clone(&self) -> Self {
        Self {
            handle: self.handle.clone(),
        }
    }
}

/// Poller del feed con protección contra timers duplicados
#[derive(Clone)]
pub struct FeedPoller {
    slot: HandleSlot<Interval>,
}

impl FeedPoller {
    pub fn new() -> Self {
        Self {
            slot: HandleSlot::new(),
        }
    }

    /// Arrancar el poll. Si ya hay un timer activo la llamada se ignora:
    /// dos toggles seguidos a online no pueden crear dos pollers.
    pub fn start<F>(&self, tick: F)
    where
        F: Fn() + 'static,
    {
        let interval_ms = CONFIG.poll_interval_ms();
        let started = self.slot.occupy(|| Interval::new(interval_ms, tick));
        if started {
            log::info!("⏰ FeedPoller: refrescando feed cada {} segundos", interval_ms / 1000);
        } else {
            log::warn!("⚠️ FeedPoller: ya hay un poll activo, ignorando start duplicado");
        }
    }

    /// Parar el poll (drop del Interval cancela el timer del navegador)
    pub fn stop(&self) {
        if self.slot.release().is_some() {
            log::info!("⏹️ FeedPoller: poll detenido");
        }
    }
}

impl Default for FeedPoller {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn un_segundo_start_no_crea_otro_timer() {
        let slot: HandleSlot<u32> = HandleSlot::new();
        assert!(slot.occupy(|| 1));

        // El slot ocupado ignora el segundo handle: ni lo crea ni lo guarda
        let mut factory_called = false;
        assert!(!slot.occupy(|| {
            factory_called = true;
            2
        }));
        assert!(!factory_called);

        // El handle original sigue siendo el vivo
        assert_eq!(slot.release(), Some(1));
    }

    #[test]
    fn tras_release_se_puede_volver_a_ocupar() {
        let slot: HandleSlot<u32> = HandleSlot::new();
        assert!(slot.occupy(|| 1));
        assert_eq!(slot.release(), Some(1));
        // stop sin timer activo es inocuo
        assert_eq!(slot.release(), None);
        assert!(slot.occupy(|| 2));
    }

    #[test]
    fn los_clones_comparten_el_slot() {
        // El guard protege aunque el toggle use un clone del poller
        let slot: HandleSlot<u32> = HandleSlot::new();
        let alias = slot.clone();
        assert!(slot.occupy(|| 1));
        assert!(!alias.occupy(|| 2));
        assert_eq!(alias.release(), Some(1));
    }
}
