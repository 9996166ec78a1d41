// ============================================================================
// SESSION VIEWMODEL - LÓGICA DE SESIÓN Y DISPONIBILIDAD
// ============================================================================
// Bootstrap de sesión (cache local + reconciliación con el servidor),
// login/registro/logout y el toggle de Go Live que arranca y para el
// poller del feed.
// ============================================================================

use wasm_bindgen_futures::spawn_local;

use crate::services::{ApiClient, RegisterRequest, SessionStore};
use crate::state::app_state::{AppState, IncrementalUpdate, UpdateType};
use crate::utils::dialog;
use crate::viewmodels::feed_viewmodel::{clear_available_for_offline, FeedViewModel};

/// ViewModel de sesión del partner
pub struct SessionViewModel {
    api_client: ApiClient,
}

impl SessionViewModel {
    pub fn new() -> Self {
        Self {
            api_client: ApiClient::new(),
        }
    }

    /// Bootstrap en page-load: restaurar el partner cacheado para pintar
    /// rápido y reconciliar el estado online/offline con el servidor.
    /// El servidor es la fuente de verdad; si no responde, se mantiene
    /// el estado cacheado hasta que responda.
    pub async fn bootstrap(&self, state: &AppState) {
        let cached = SessionStore::load();
        let Some(partner) = cached else {
            log::info!("🔐 Sin sesión cacheada, mostrando login");
            crate::rerender_app();
            return;
        };

        state.session.set_partner(Some(partner));
        crate::rerender_app();

        match self.api_client.get_partner_status().await {
            Ok(server_status) => {
                log::info!("✅ Estado reconciliado con el servidor: {}", server_status.as_str());
                state.session.set_status(server_status);
            }
            Err(e) => {
                log::warn!("⚠️ No se pudo reconciliar estado, usando cache: {}", e);
            }
        }

        if state.session.is_live() {
            self.start_polling(state);
            FeedViewModel::new().refresh(state).await;
        } else {
            // Hay que pintar el feed aunque esté offline (activas + completadas)
            FeedViewModel::new().refresh(state).await;
        }
        crate::rerender_app();
    }

    /// Login con email y password
    pub async fn login(&self, state: &AppState, email: &str, password: &str) {
        state.session.set_loading(true);
        state.set_auth_error(None);

        match self.api_client.login(email, password).await {
            Ok(partner) => {
                log::info!("✅ Login correcto: {}", partner.display_name());
                state.session.set_loading(false);
                state.session.set_partner(Some(partner));
                crate::rerender_app();

                if state.session.is_live() {
                    self.start_polling(state);
                }
                FeedViewModel::new().refresh(state).await;
            }
            Err(e) => {
                log::error!("❌ Error en login: {}", e);
                state.session.set_loading(false);
                state.set_auth_error(Some(e));
                crate::rerender_app();
            }
        }
    }

    /// Registro de un partner nuevo. La confirmación de password se valida
    /// en cliente antes de llamar al backend.
    pub async fn register(&self, state: &AppState, request: RegisterRequest, confirm_password: &str) {
        if request.password != confirm_password {
            dialog::alert("Passwords do not match!");
            return;
        }

        state.session.set_loading(true);
        state.set_auth_error(None);

        match self.api_client.register(&request).await {
            Ok(()) => {
                log::info!("✅ Registro correcto: {}", request.email);
                state.session.set_loading(false);
                *state.register_success.borrow_mut() = true;
                state.set_show_register(false);
            }
            Err(e) => {
                log::error!("❌ Error en registro: {}", e);
                state.session.set_loading(false);
                state.set_auth_error(Some(e));
                crate::rerender_app();
            }
        }
    }

    /// Logout: la sesión local se limpia aunque el backend falle
    pub async fn logout(&self, state: &AppState) {
        if let Err(e) = self.api_client.logout().await {
            log::warn!("⚠️ Logout en el servidor falló: {}", e);
        }
        if let Err(e) = SessionStore::clear() {
            log::error!("❌ Error limpiando storage: {}", e);
        }

        state.poller.stop();
        state.feed.clear();
        *state.session.partner.borrow_mut() = None;
        log::info!("🔐 Sesión cerrada");
        crate::rerender_app();
    }

    /// Toggle de Go Live. El nuevo estado solo se adopta cuando el
    /// servidor confirma el POST; si falla, el estado local no cambia y
    /// no hay retry (el partner puede volver a pulsar).
    pub async fn toggle_go_live(&self, state: &AppState) {
        let Some(partner) = state.session.get_partner() else {
            dialog::alert("Please login first");
            return;
        };

        let new_status = partner.status.toggled();
        log::info!("🔄 Cambiando estado: {} → {}", partner.status.as_str(), new_status.as_str());

        match self.api_client.set_partner_status(new_status).await {
            Ok(()) => {
                state.session.set_status(new_status);

                // Verificación read-after-write: el estado mostrado es el
                // que el servidor tiene realmente
                match self.api_client.get_partner_status().await {
                    Ok(server_status) => {
                        if server_status != new_status {
                            log::warn!(
                                "⚠️ El servidor reporta {} tras el toggle, adoptándolo",
                                server_status.as_str()
                            );
                            state.session.set_status(server_status);
                        }
                    }
                    Err(e) => log::warn!("⚠️ No se pudo verificar el estado: {}", e),
                }

                if state.session.is_live() {
                    self.start_polling(state);
                } else {
                    state.poller.stop();
                    // La lista de disponibles se vacía en cliente, antes y
                    // con independencia del fetch: si la red falla no pueden
                    // quedar cards aceptables en pantalla
                    if let Some(model) = state.feed.get_model() {
                        state.feed.set_model(clear_available_for_offline(model));
                    }
                    crate::rerender_app_with_type(UpdateType::Incremental(
                        IncrementalUpdate::Feed,
                    ));
                }
                crate::rerender_app_with_type(UpdateType::Incremental(
                    IncrementalUpdate::GoLiveControls,
                ));
                // Refresh inmediato: online pobla disponibles al instante,
                // offline reconcilia activas y completadas cuando responda
                FeedViewModel::new().refresh(state).await;
            }
            Err(e) => {
                log::error!("❌ Error cambiando estado: {}", e);
                dialog::alert(&format!("Failed to update status: {}", e));
            }
        }
    }

    /// Arrancar el poller del feed. La protección contra timers duplicados
    /// vive en FeedPoller.
    fn start_polling(&self, state: &AppState) {
        let tick_state = state.clone();
        state.poller.start(move || {
            let state = tick_state.clone();
            spawn_local(async move {
                FeedViewModel::new().refresh(&state).await;
            });
        });
    }
}

impl Default for SessionViewModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::models::PartnerStatus;

    #[test]
    fn el_toggle_es_el_complemento() {
        assert_eq!(PartnerStatus::Offline.toggled(), PartnerStatus::Online);
        assert_eq!(PartnerStatus::Online.toggled(), PartnerStatus::Offline);
    }
}
