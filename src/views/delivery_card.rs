// ============================================================================
// DELIVERY CARD VIEW - Render de una card de entrega
// ============================================================================
// Renderiza la descripción pura (DeliveryCard) que produce el viewmodel;
// toda la lógica de qué acciones mostrar vive allí, no aquí.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, on_click, ElementBuilder};
use crate::models::DeliveryStatus;
use crate::state::AppState;
use crate::viewmodels::feed_viewmodel::{CardAction, DeliveryCard, FeedViewModel};

/// Renderizar una card de entrega
pub fn render_delivery_card(card: &DeliveryCard, state: &AppState) -> Result<Element, JsValue> {
    let card_el = ElementBuilder::new("div")?
        .class("delivery-card")
        .attr("data-delivery-id", &card.delivery_id)?
        .build();

    // Header: tracking id + badge de estado
    let header = ElementBuilder::new("div")?
        .class("delivery-header")
        .child(
            ElementBuilder::new("span")?
                .class("delivery-id")
                .text(&card.delivery_id)
                .build(),
        )?
        .child(
            ElementBuilder::new("span")?
                .class(&format!(
                    "status-badge status-{}",
                    card.status_label.to_lowercase().replace(' ', "-")
                ))
                .text(card.status_label)
                .build(),
        )?
        .build();
    append_child(&card_el, &header)?;

    // Detalles
    let details = ElementBuilder::new("div")?.class("delivery-details").build();
    append_detail_row(&details, "From", &card.from)?;
    if let Some(ref to) = card.to {
        append_detail_row(&details, "To", to)?;
    }
    if let Some(ref receiver) = card.receiver {
        append_detail_row(&details, "Receiver", receiver)?;
    }
    append_detail_row(&details, "Weight", &format!("{} kg", card.weight_kg))?;
    append_detail_row(&details, "Type", &card.parcel_type)?;
    if card.total_stops > 1 {
        append_detail_row(&details, "Stops", &card.total_stops.to_string())?;
    }
    append_child(&card_el, &details)?;

    // Paradas de entregas multi-destino, con su botón por parada pendiente
    if !card.stops.is_empty() {
        let stops_el = ElementBuilder::new("div")?.class("delivery-stops").build();
        for stop in &card.stops {
            let stop_class = if stop.delivered {
                "stop-row stop-delivered"
            } else {
                "stop-row"
            };
            let stop_el = ElementBuilder::new("div")?
                .class(stop_class)
                .child(
                    ElementBuilder::new("div")?
                        .class("stop-info")
                        .text(&format!(
                            "Stop {}: {} ({}) - {}",
                            stop.stop_number, stop.receiver_name, stop.receiver_phone, stop.drop_address
                        ))
                        .build(),
                )?
                .build();

            if stop.delivered {
                let done = ElementBuilder::new("span")?
                    .class("stop-done")
                    .text("✓ Delivered")
                    .build();
                append_child(&stop_el, &done)?;
            } else if stop.can_deliver {
                let btn = ElementBuilder::new("button")?
                    .class("btn btn-small btn-primary")
                    .text("Mark Delivered")
                    .build();
                let state_clone = state.clone();
                let delivery_id = card.delivery_id.clone();
                let stop_number = stop.stop_number;
                on_click(&btn, move |_| {
                    let state = state_clone.clone();
                    let delivery_id = delivery_id.clone();
                    spawn_local(async move {
                        FeedViewModel::new()
                            .deliver_stop(&state, &delivery_id, stop_number)
                            .await;
                    });
                })?;
                append_child(&stop_el, &btn)?;
            }
            append_child(&stops_el, &stop_el)?;
        }
        append_child(&card_el, &stops_el)?;
    }

    // Línea de pago de entregas terminadas
    if let Some(ref payment) = card.payment {
        let mut text = format!("Payment: {}", payment.status_label);
        if let Some(ref method) = payment.method {
            text.push_str(&format!(" ({})", method));
        }
        if let Some(amount) = payment.amount {
            text.push_str(&format!(" - ₹{:.2}", amount));
        }
        let payment_el = ElementBuilder::new("div")?
            .class("delivery-payment")
            .text(&text)
            .build();
        append_child(&card_el, &payment_el)?;
    }

    // Botones de acción
    if !card.actions.is_empty() {
        let actions_el = ElementBuilder::new("div")?.class("delivery-actions").build();
        for action in &card.actions {
            let btn = render_action_button(action, &card.delivery_id, state)?;
            append_child(&actions_el, &btn)?;
        }
        append_child(&card_el, &actions_el)?;
    }

    Ok(card_el)
}

fn append_detail_row(parent: &Element, label: &str, value: &str) -> Result<(), JsValue> {
    let row = ElementBuilder::new("div")?
        .class("detail-row")
        .child(
            ElementBuilder::new("span")?
                .class("detail-label")
                .text(&format!("{}:", label))
                .build(),
        )?
        .child(
            ElementBuilder::new("span")?
                .class("detail-value")
                .text(value)
                .build(),
        )?
        .build();
    append_child(parent, &row)
}

fn render_action_button(
    action: &CardAction,
    delivery_id: &str,
    state: &AppState,
) -> Result<Element, JsValue> {
    let class = match action {
        CardAction::Accept => "btn btn-success",
        CardAction::ConfirmCash => "btn btn-warning",
        _ => "btn btn-primary",
    };
    let btn = ElementBuilder::new("button")?
        .class(class)
        .text(action.label())
        .build();

    let action = action.clone();
    let delivery_id = delivery_id.to_string();
    let state_clone = state.clone();
    on_click(&btn, move |_| {
        let action = action.clone();
        let delivery_id = delivery_id.clone();
        let state = state_clone.clone();
        spawn_local(async move {
            let vm = FeedViewModel::new();
            match action {
                CardAction::Accept => vm.accept(&state, &delivery_id).await,
                CardAction::MarkPicked => {
                    vm.advance_status(&state, &delivery_id, DeliveryStatus::Picked).await
                }
                CardAction::MarkOnTheWay => {
                    vm.advance_status(&state, &delivery_id, DeliveryStatus::OnTheWay).await
                }
                CardAction::MarkDelivered => {
                    vm.advance_status(&state, &delivery_id, DeliveryStatus::Delivered).await
                }
                CardAction::ConfirmCash => vm.confirm_cash(&state, &delivery_id).await,
            }
        });
    })?;

    Ok(btn)
}
