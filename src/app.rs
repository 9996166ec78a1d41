// ============================================================================
// APP - Aplicación principal
// ============================================================================
// Construye el AppState único en page-load, dispara el bootstrap de sesión
// y es el único sitio que toca el nodo raíz del DOM.
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, get_element_by_id, set_inner_html};
use crate::state::app_state::{AppState, IncrementalUpdate};
use crate::viewmodels::SessionViewModel;
use crate::views::auth::render_auth;
use crate::views::dashboard::{render_dashboard, render_go_live_controls, render_stats_row, GO_LIVE_CONTROLS_ID, STATS_ROW_ID};
use crate::views::feed::{render_feed, FEED_CONTAINER_ID};

/// Aplicación principal
pub struct App {
    state: AppState,
    root: Element,
}

impl App {
    /// Crear la aplicación y arrancar el bootstrap de sesión
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let state = AppState::new();

        // Restaurar sesión cacheada y reconciliar con el servidor
        {
            let state_clone = state.clone();
            wasm_bindgen_futures::spawn_local(async move {
                SessionViewModel::new().bootstrap(&state_clone).await;
            });
        }

        Ok(Self { state, root })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Re-render completo: reconstruye la vista entera bajo #app
    pub fn render(&mut self) -> Result<(), JsValue> {
        set_inner_html(&self.root, "");

        let view = if self.state.session.is_logged_in() {
            render_dashboard(&self.state)?
        } else {
            render_auth(&self.state)?
        };
        append_child(&self.root, &view)?;

        Ok(())
    }

    /// Actualización incremental: reemplaza solo la sección afectada.
    /// Si la sección no está en el DOM (p.ej. aún en la vista de login),
    /// devuelve error y el caller cae a un re-render completo.
    pub fn update_incremental(&self, update: IncrementalUpdate) -> Result<(), JsValue> {
        match update {
            IncrementalUpdate::Feed => {
                // Las stats se derivan del mismo snapshot del feed
                self.replace_section(FEED_CONTAINER_ID, render_feed(&self.state)?)?;
                self.replace_section(STATS_ROW_ID, render_stats_row(&self.state)?)
            }
            IncrementalUpdate::GoLiveControls => {
                self.replace_section(GO_LIVE_CONTROLS_ID, render_go_live_controls(&self.state)?)
            }
        }
    }

    fn replace_section(&self, id: &str, new_el: Element) -> Result<(), JsValue> {
        let old_el = get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("Section #{} not found, needs full render", id)))?;
        let parent = old_el
            .parent_element()
            .ok_or_else(|| JsValue::from_str("Section has no parent, needs full render"))?;
        parent.replace_child(&new_el, &old_el)?;
        Ok(())
    }
}
