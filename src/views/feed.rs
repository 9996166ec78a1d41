// ============================================================================
// FEED VIEW - Las tres listas del feed de entregas
// ============================================================================
// Disponibles / activas / completadas. Cada sección tiene siempre un
// contenido: cards, mensaje de vacío o affordance de "buscando".
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, ElementBuilder};
use crate::state::AppState;
use crate::viewmodels::feed_viewmodel::{AvailableSection, DeliveryCard};
use crate::views::delivery_card::render_delivery_card;

pub const FEED_CONTAINER_ID: &str = "delivery-feed";

/// Renderizar el feed completo (las tres secciones)
pub fn render_feed(state: &AppState) -> Result<Element, JsValue> {
    let container = ElementBuilder::new("div")?
        .class("delivery-feed")
        .id(FEED_CONTAINER_ID)?
        .build();

    if let Some(timestamp) = state.feed.get_last_refresh() {
        let updated = ElementBuilder::new("div")?
            .class("feed-last-refresh")
            .text(&format!("Last updated: {}", timestamp.format("%H:%M:%S")))
            .build();
        append_child(&container, &updated)?;
    }

    let model = state.feed.get_model();

    // Sección de disponibles
    let available_section = ElementBuilder::new("section")?
        .class("feed-section")
        .child(
            ElementBuilder::new("h2")?
                .class("section-title")
                .text("Available Deliveries")
                .build(),
        )?
        .build();

    match model.as_ref().map(|m| &m.available) {
        Some(AvailableSection::Cards(cards)) => {
            append_cards(&available_section, cards, state)?;
        }
        Some(AvailableSection::Looking) => {
            let looking = ElementBuilder::new("div")?
                .class("feed-empty feed-looking")
                .child(ElementBuilder::new("div")?.class("spinner").build())?
                .child(
                    ElementBuilder::new("p")?
                        .text("Looking for deliveries...")
                        .build(),
                )?
                .build();
            append_child(&available_section, &looking)?;
        }
        Some(AvailableSection::Offline) | None => {
            let offline = ElementBuilder::new("div")?
                .class("feed-empty feed-offline")
                .text("You are offline. Go live to receive delivery requests.")
                .build();
            append_child(&available_section, &offline)?;
        }
    }
    append_child(&container, &available_section)?;

    // Sección de activas
    let active_section = feed_list_section(
        "Active Deliveries",
        model.as_ref().map(|m| m.active.as_slice()).unwrap_or(&[]),
        "No active deliveries.",
        state,
    )?;
    append_child(&container, &active_section)?;

    // Sección de completadas
    let completed_section = feed_list_section(
        "Completed Deliveries",
        model.as_ref().map(|m| m.completed.as_slice()).unwrap_or(&[]),
        "No completed deliveries yet.",
        state,
    )?;
    append_child(&container, &completed_section)?;

    Ok(container)
}

fn feed_list_section(
    title: &str,
    cards: &[DeliveryCard],
    empty_message: &str,
    state: &AppState,
) -> Result<Element, JsValue> {
    let section = ElementBuilder::new("section")?
        .class("feed-section")
        .child(
            ElementBuilder::new("h2")?
                .class("section-title")
                .text(title)
                .build(),
        )?
        .build();

    if cards.is_empty() {
        let empty = ElementBuilder::new("div")?
            .class("feed-empty")
            .text(empty_message)
            .build();
        append_child(&section, &empty)?;
    } else {
        append_cards(&section, cards, state)?;
    }

    Ok(section)
}

fn append_cards(section: &Element, cards: &[DeliveryCard], state: &AppState) -> Result<(), JsValue> {
    let list = ElementBuilder::new("div")?.class("delivery-list").build();
    for card in cards {
        let card_el = render_delivery_card(card, state)?;
        append_child(&list, &card_el)?;
    }
    append_child(section, &list)
}
