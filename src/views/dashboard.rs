// ============================================================================
// DASHBOARD VIEW - Vista principal del partner logueado
// ============================================================================
// Header con bienvenida y logout, fila de stats, controles de Go Live y
// el feed de entregas debajo.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, on_click, ElementBuilder};
use crate::state::AppState;
use crate::viewmodels::feed_viewmodel::FeedStats;
use crate::viewmodels::SessionViewModel;
use crate::views::feed::render_feed;

pub const GO_LIVE_CONTROLS_ID: &str = "go-live-controls";
pub const STATS_ROW_ID: &str = "dashboard-stats";

/// Renderizar el dashboard completo
pub fn render_dashboard(state: &AppState) -> Result<Element, JsValue> {
    let container = ElementBuilder::new("div")?.class("dashboard").build();

    let display_name = state
        .session
        .get_partner()
        .map(|p| p.display_name())
        .unwrap_or_else(|| "Partner".to_string());

    // Header
    let header = ElementBuilder::new("header")?
        .class("dashboard-header")
        .child(
            ElementBuilder::new("h1")?
                .class("dashboard-title")
                .text("Boxy Partner")
                .build(),
        )?
        .child(
            ElementBuilder::new("span")?
                .class("dashboard-welcome")
                .text(&format!("Welcome, {}", display_name))
                .build(),
        )?
        .build();

    let logout_btn = ElementBuilder::new("button")?
        .class("btn btn-secondary")
        .text("Logout")
        .build();
    {
        let state_clone = state.clone();
        on_click(&logout_btn, move |_| {
            let state = state_clone.clone();
            spawn_local(async move {
                SessionViewModel::new().logout(&state).await;
            });
        })?;
    }
    append_child(&header, &logout_btn)?;
    append_child(&container, &header)?;

    // Stats
    let stats_row = render_stats_row(state)?;
    append_child(&container, &stats_row)?;

    // Controles Go Live
    let controls = render_go_live_controls(state)?;
    append_child(&container, &controls)?;

    // Feed
    let feed = render_feed(state)?;
    append_child(&container, &feed)?;

    Ok(container)
}

/// Fila de stats del header
pub fn render_stats_row(state: &AppState) -> Result<Element, JsValue> {
    let stats = state
        .feed
        .get_model()
        .map(|m| m.stats)
        .unwrap_or_else(FeedStats::default);

    let row = ElementBuilder::new("div")?
        .class("stats-row")
        .id(STATS_ROW_ID)?
        .build();

    append_stat(&row, "Total", &stats.total.to_string())?;
    append_stat(&row, "Completed", &stats.completed.to_string())?;
    append_stat(&row, "In Progress", &stats.in_progress.to_string())?;
    append_stat(&row, "Earnings", &format!("₹{:.2}", stats.earnings))?;

    Ok(row)
}

fn append_stat(row: &Element, label: &str, value: &str) -> Result<(), JsValue> {
    let card = ElementBuilder::new("div")?
        .class("stat-card")
        .child(
            ElementBuilder::new("div")?
                .class("stat-value")
                .text(value)
                .build(),
        )?
        .child(
            ElementBuilder::new("div")?
                .class("stat-label")
                .text(label)
                .build(),
        )?
        .build();
    append_child(row, &card)
}

/// Controles de Go Live: indicador de estado + botón de toggle.
/// El botón solo dispara el viewmodel; el estado mostrado viene del
/// estado confirmado por el servidor, nunca de un update optimista.
pub fn render_go_live_controls(state: &AppState) -> Result<Element, JsValue> {
    let is_live = state.session.is_live();

    let controls = ElementBuilder::new("div")?
        .class("go-live-controls")
        .id(GO_LIVE_CONTROLS_ID)?
        .build();

    let indicator_class = if is_live {
        "status-indicator online"
    } else {
        "status-indicator offline"
    };
    let indicator_text = if is_live {
        "You are Online"
    } else {
        "You are Offline"
    };
    let indicator = ElementBuilder::new("div")?
        .class(indicator_class)
        .child(ElementBuilder::new("span")?.class("status-dot").build())?
        .child(ElementBuilder::new("span")?.text(indicator_text).build())?
        .build();
    append_child(&controls, &indicator)?;

    let (btn_class, btn_text) = if is_live {
        ("btn btn-danger", "Go Offline")
    } else {
        ("btn btn-success", "Go Live")
    };
    let toggle_btn = ElementBuilder::new("button")?
        .class(btn_class)
        .text(btn_text)
        .build();
    {
        let state_clone = state.clone();
        on_click(&toggle_btn, move |_| {
            let state = state_clone.clone();
            spawn_local(async move {
                SessionViewModel::new().toggle_go_live(&state).await;
            });
        })?;
    }
    append_child(&controls, &toggle_btn)?;

    Ok(controls)
}
