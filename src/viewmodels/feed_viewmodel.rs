// ============================================================================
// FEED VIEWMODEL - LÓGICA DEL FEED DE ENTREGAS
// ============================================================================
// Dos capas:
// - Capa pura: convierte las listas crudas del backend en un FeedModel
//   (particiones, acciones por card, stats). Sin DOM, testeable en nativo.
// - Capa async: refresh + acciones mutadoras (accept, update-status,
//   deliver-stop, cash-confirm). Cada acción es un POST y, si tiene éxito,
//   un refresh completo del feed. Sin update optimista y sin retry.
// ============================================================================

use crate::config::CONFIG;
use crate::models::{Delivery, DeliveryStatus, PaymentStatus};
use crate::services::ApiClient;
use crate::state::app_state::{AppState, IncrementalUpdate, UpdateType};
use crate::utils::dialog;

// ----------------------------------------------------------------------------
// Capa pura: descripción del estado deseado del DOM
// ----------------------------------------------------------------------------

/// Acción disponible sobre una card del feed
#[derive(Clone, PartialEq, Debug)]
pub enum CardAction {
    Accept,
    MarkPicked,
    MarkOnTheWay,
    /// Solo entregas de una parada, desde on_the_way
    MarkDelivered,
    ConfirmCash,
}

impl CardAction {
    pub fn label(&self) -> &'static str {
        match self {
            CardAction::Accept => "Accept",
            CardAction::MarkPicked => "Mark as Picked",
            CardAction::MarkOnTheWay => "On the Way",
            CardAction::MarkDelivered => "Mark as Delivered",
            CardAction::ConfirmCash => "Confirm Cash Received",
        }
    }
}

/// Fila de parada en una entrega multi-destino
#[derive(Clone, PartialEq, Debug)]
pub struct StopRow {
    pub stop_number: u32,
    pub receiver_name: String,
    pub receiver_phone: String,
    pub drop_address: String,
    pub delivered: bool,
    /// La parada pendiente expone su botón "Mark Delivered"
    pub can_deliver: bool,
}

/// Línea de pago de una entrega terminada
#[derive(Clone, PartialEq, Debug)]
pub struct PaymentLine {
    pub status_label: &'static str,
    pub method: Option<String>,
    pub amount: Option<f64>,
}

/// Descripción pura de una card de entrega
#[derive(Clone, PartialEq, Debug)]
pub struct DeliveryCard {
    pub delivery_id: String,
    pub status_label: &'static str,
    pub from: String,
    pub to: Option<String>,
    pub receiver: Option<String>,
    pub weight_kg: f64,
    pub parcel_type: String,
    pub total_stops: u32,
    pub stops: Vec<StopRow>,
    pub payment: Option<PaymentLine>,
    pub actions: Vec<CardAction>,
}

/// Sección de entregas disponibles: siempre hay un affordance, nunca
/// una lista en blanco
#[derive(Clone, PartialEq, Debug)]
pub enum AvailableSection {
    /// Partner offline: mensaje de offline, sin cards
    Offline,
    /// Online sin entregas: "Looking for deliveries..."
    Looking,
    Cards(Vec<DeliveryCard>),
}

/// Contadores y ganancias del header del dashboard
#[derive(Clone, PartialEq, Debug, Default)]
pub struct FeedStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub available: usize,
    pub earnings: f64,
}

/// Snapshot completo del feed, listo para renderizar
#[derive(Clone, PartialEq, Debug)]
pub struct FeedModel {
    pub available: AvailableSection,
    pub active: Vec<DeliveryCard>,
    pub completed: Vec<DeliveryCard>,
    pub stats: FeedStats,
}

/// Particionar las entregas asignadas en activas y completadas.
/// Completada = estado terminal (delivered o completed, con pago hecho o no).
pub fn partition_my_deliveries(mine: &[Delivery]) -> (Vec<Delivery>, Vec<Delivery>) {
    let (completed, active): (Vec<Delivery>, Vec<Delivery>) =
        mine.iter().cloned().partition(|d| d.status.is_terminal());
    (active, completed)
}

/// Calcular stats del dashboard. Las ganancias son la parte del partner
/// (earnings_share) sobre los importes de entregas terminadas y pagadas.
pub fn compute_stats(mine: &[Delivery], available_count: usize, earnings_share: f64) -> FeedStats {
    let completed = mine.iter().filter(|d| d.status.is_terminal()).count();
    let in_progress = mine
        .iter()
        .filter(|d| !d.status.is_terminal() && d.status != DeliveryStatus::Available)
        .count();

    let earnings: f64 = mine
        .iter()
        .filter(|d| d.status.is_terminal() && d.payment_status == Some(PaymentStatus::Paid))
        .filter_map(|d| d.total_amount)
        .map(|amount| amount * earnings_share)
        .sum();

    FeedStats {
        total: mine.len(),
        completed,
        in_progress,
        available: available_count,
        earnings,
    }
}

/// Construir la card de una entrega. `completed` controla qué acciones
/// se exponen; `available` marca las cards de la sección de disponibles.
fn build_card(delivery: &Delivery, completed: bool, available: bool) -> DeliveryCard {
    let single_stop = !delivery.is_multi_stop();

    let receiver = if single_stop {
        match (&delivery.receiver_name, &delivery.receiver_phone) {
            (Some(name), Some(phone)) => Some(format!("{} ({})", name, phone)),
            (Some(name), None) => Some(name.clone()),
            _ => None,
        }
    } else {
        None
    };

    let stops: Vec<StopRow> = match (&delivery.stops, delivery.is_multi_stop()) {
        (Some(stops), true) => stops
            .iter()
            .map(|s| StopRow {
                stop_number: s.stop_number,
                receiver_name: s.receiver_name.clone(),
                receiver_phone: s.receiver_phone.clone(),
                drop_address: s.drop_address.clone(),
                delivered: s.is_delivered(),
                can_deliver: !s.is_delivered() && !completed && !available,
            })
            .collect(),
        _ => Vec::new(),
    };

    let payment = match (delivery.payment_status, delivery.status.is_terminal()) {
        (Some(status), true) => Some(PaymentLine {
            status_label: status.label(),
            method: delivery.payment_method.clone(),
            amount: delivery.total_amount,
        }),
        _ => None,
    };

    let mut actions = Vec::new();
    if available {
        actions.push(CardAction::Accept);
    } else if !completed {
        match delivery.status.next() {
            Some(DeliveryStatus::Picked) => actions.push(CardAction::MarkPicked),
            Some(DeliveryStatus::OnTheWay) => actions.push(CardAction::MarkOnTheWay),
            // La progresión a delivered solo aplica a una sola parada;
            // las multi-stop avanzan parada a parada
            Some(DeliveryStatus::Delivered) if single_stop => {
                actions.push(CardAction::MarkDelivered)
            }
            _ => {}
        }
    } else if delivery.awaiting_cash_confirmation() {
        actions.push(CardAction::ConfirmCash);
    }

    DeliveryCard {
        delivery_id: delivery.id.clone(),
        status_label: delivery.status.label(),
        from: delivery.sender_address.clone(),
        to: if single_stop {
            delivery.receiver_address.clone()
        } else {
            None
        },
        receiver,
        weight_kg: delivery.weight,
        parcel_type: delivery.parcel_type.clone(),
        total_stops: delivery.total_stops,
        stops,
        payment,
        actions,
    }
}

/// Construir el FeedModel completo a partir de las listas crudas del backend
pub fn build_feed_model(
    available: &[Delivery],
    mine: &[Delivery],
    is_live: bool,
    earnings_share: f64,
) -> FeedModel {
    let available_section = if !is_live {
        // Offline: la lista de disponibles se limpia siempre
        AvailableSection::Offline
    } else if available.is_empty() {
        AvailableSection::Looking
    } else {
        AvailableSection::Cards(
            available
                .iter()
                .map(|d| build_card(d, false, true))
                .collect(),
        )
    };

    let (active, completed) = partition_my_deliveries(mine);

    FeedModel {
        available: available_section,
        active: active.iter().map(|d| build_card(d, false, false)).collect(),
        completed: completed.iter().map(|d| build_card(d, true, false)).collect(),
        stats: compute_stats(mine, available.len(), earnings_share),
    }
}

/// Vaciado en cliente de la sección de disponibles al pasar a offline.
/// No depende de ningún fetch: las cards desaparecen aunque la red falle,
/// y las entregas activas y completadas se conservan tal cual.
pub fn clear_available_for_offline(mut model: FeedModel) -> FeedModel {
    model.available = AvailableSection::Offline;
    model.stats.available = 0;
    model
}

// ----------------------------------------------------------------------------
// Mensajes de confirmación (puros, testeables)
// ----------------------------------------------------------------------------

pub fn delivered_message(delivery_id: &str) -> String {
    format!(
        "Delivery marked as delivered! Customer will be redirected to payment page.\n\nTracking ID: {}",
        delivery_id
    )
}

pub fn deliver_stop_message(all_delivered: bool, stop_number: u32, delivery_id: &str) -> String {
    if all_delivered {
        format!(
            "All stops delivered! Customer will be redirected to payment page.\n\nTracking ID: {}",
            delivery_id
        )
    } else {
        format!("Stop {} marked as delivered!", stop_number)
    }
}

// ----------------------------------------------------------------------------
// Capa async: refresh + acciones mutadoras
// ----------------------------------------------------------------------------

/// ViewModel del feed - fetch y acciones, sin tocar el DOM directamente
pub struct FeedViewModel {
    api_client: ApiClient,
}

impl FeedViewModel {
    pub fn new() -> Self {
        Self {
            api_client: ApiClient::new(),
        }
    }

    /// Refrescar el feed (tick manual o del poller). El render es un
    /// reemplazo completo, así que ticks duplicados o fuera de orden no
    /// corrompen el estado mostrado.
    pub async fn refresh(&self, state: &AppState) {
        if !state.session.is_logged_in() {
            return;
        }

        match self.api_client.get_deliveries().await {
            Ok(response) => {
                let model = build_feed_model(
                    &response.available_deliveries,
                    &response.my_deliveries,
                    state.session.is_live(),
                    CONFIG.earnings_share,
                );
                state.feed.set_model(model);
                crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::Feed));
            }
            Err(e) => {
                // El poll reintenta solo en su próximo tick; aquí solo log
                log::error!("❌ Error refrescando feed: {}", e);
            }
        }
    }

    /// Aceptar una entrega disponible
    pub async fn accept(&self, state: &AppState, delivery_id: &str) {
        match self.api_client.accept_delivery(delivery_id).await {
            Ok(()) => {
                dialog::alert("Delivery accepted successfully!");
                self.refresh(state).await;
            }
            Err(e) => {
                log::error!("❌ Error aceptando entrega {}: {}", delivery_id, e);
                dialog::alert(&format!("Failed to accept delivery: {}", e));
            }
        }
    }

    /// Avanzar el estado de una entrega single-stop
    pub async fn advance_status(
        &self,
        state: &AppState,
        delivery_id: &str,
        new_status: DeliveryStatus,
    ) {
        match self
            .api_client
            .update_delivery_status(delivery_id, new_status)
            .await
        {
            Ok(()) => {
                self.refresh(state).await;
                if new_status == DeliveryStatus::Delivered {
                    dialog::alert(&delivered_message(delivery_id));
                }
            }
            Err(e) => {
                log::error!("❌ Error actualizando entrega {}: {}", delivery_id, e);
                dialog::alert(&format!("Failed to update status: {}", e));
            }
        }
    }

    /// Marcar una parada como entregada
    pub async fn deliver_stop(&self, state: &AppState, delivery_id: &str, stop_number: u32) {
        match self.api_client.deliver_stop(delivery_id, stop_number).await {
            Ok(response) => {
                // El servidor señala all_delivered cuando cae la última parada
                let tracking_id = response.delivery_id.as_deref().unwrap_or(delivery_id);
                dialog::alert(&deliver_stop_message(
                    response.all_delivered,
                    stop_number,
                    tracking_id,
                ));
                self.refresh(state).await;
            }
            Err(e) => {
                log::error!(
                    "❌ Error entregando parada {} de {}: {}",
                    stop_number,
                    delivery_id,
                    e
                );
                dialog::alert(&format!("Failed to mark stop as delivered: {}", e));
            }
        }
    }

    /// Confirmar cobro en efectivo (con confirm() previo)
    pub async fn confirm_cash(&self, state: &AppState, booking_id: &str) {
        if !dialog::confirm("Confirm that you have received cash payment from the customer?") {
            return;
        }

        match self.api_client.confirm_cash_payment(booking_id).await {
            Ok(()) => {
                dialog::alert("Cash payment confirmed successfully! Earnings updated.");
                self.refresh(state).await;
            }
            Err(e) => {
                log::error!("❌ Error confirmando pago de {}: {}", booking_id, e);
                dialog::alert(&format!("Failed to confirm payment: {}", e));
            }
        }
    }
}

impl Default for FeedViewModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PaymentStatus, Stop};

    fn delivery(id: &str, status: DeliveryStatus) -> Delivery {
        Delivery {
            id: id.to_string(),
            sender_address: "12 MG Road".to_string(),
            receiver_address: Some("48 Park Street".to_string()),
            receiver_name: Some("Asha".to_string()),
            receiver_phone: Some("9900000000".to_string()),
            weight: 2.0,
            parcel_type: "box".to_string(),
            status,
            total_stops: 1,
            stops: None,
            payment_status: None,
            payment_method: None,
            total_amount: None,
        }
    }

    fn multi_stop_delivery(id: &str, delivered_stops: &[u32]) -> Delivery {
        let mut d = delivery(id, DeliveryStatus::OnTheWay);
        d.total_stops = 3;
        d.receiver_address = None;
        d.stops = Some(
            (1..=3)
                .map(|n| Stop {
                    stop_number: n,
                    drop_address: format!("Drop {}", n),
                    receiver_name: format!("Receiver {}", n),
                    receiver_phone: "9911111111".to_string(),
                    status: if delivered_stops.contains(&n) {
                        DeliveryStatus::Delivered
                    } else {
                        DeliveryStatus::OnTheWay
                    },
                })
                .collect(),
        );
        d
    }

    #[test]
    fn particiona_activas_y_completadas() {
        let mine = vec![
            delivery("BK1", DeliveryStatus::Accepted),
            delivery("BK2", DeliveryStatus::Delivered),
            delivery("BK3", DeliveryStatus::OnTheWay),
            delivery("BK4", DeliveryStatus::Completed),
        ];
        let (active, completed) = partition_my_deliveries(&mine);
        let active_ids: Vec<_> = active.iter().map(|d| d.id.as_str()).collect();
        let completed_ids: Vec<_> = completed.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(active_ids, vec!["BK1", "BK3"]);
        assert_eq!(completed_ids, vec!["BK2", "BK4"]);
    }

    #[test]
    fn online_sin_disponibles_muestra_looking() {
        let model = build_feed_model(&[], &[], true, 0.7);
        assert_eq!(model.available, AvailableSection::Looking);
    }

    #[test]
    fn offline_limpia_la_lista_de_disponibles() {
        // Aunque el backend devuelva disponibles, offline nunca las muestra
        let available = vec![delivery("BK1", DeliveryStatus::Available)];
        let model = build_feed_model(&available, &[], false, 0.7);
        assert_eq!(model.available, AvailableSection::Offline);
    }

    #[test]
    fn pasar_a_offline_vacia_disponibles_sin_fetch() {
        // El snapshot cacheado tiene cards disponibles y una entrega activa
        let available = vec![delivery("BK1", DeliveryStatus::Available)];
        let mine = vec![delivery("BK2", DeliveryStatus::Picked)];
        let model = build_feed_model(&available, &mine, true, 0.7);
        assert!(matches!(model.available, AvailableSection::Cards(_)));
        assert_eq!(model.stats.available, 1);

        // El vaciado es puro: ninguna card aceptable sobrevive aunque el
        // siguiente fetch nunca llegue
        let cleared = clear_available_for_offline(model);
        assert_eq!(cleared.available, AvailableSection::Offline);
        assert_eq!(cleared.stats.available, 0);
        // Activas y completadas se conservan
        assert_eq!(cleared.active.len(), 1);
        assert_eq!(cleared.active[0].delivery_id, "BK2");
    }

    #[test]
    fn card_disponible_solo_expone_accept() {
        let available = vec![delivery("BK1", DeliveryStatus::Available)];
        let model = build_feed_model(&available, &[], true, 0.7);
        match model.available {
            AvailableSection::Cards(cards) => {
                assert_eq!(cards.len(), 1);
                assert_eq!(cards[0].actions, vec![CardAction::Accept]);
            }
            other => panic!("esperaba cards, hay {:?}", other),
        }
    }

    #[test]
    fn progresion_de_acciones_single_stop() {
        for (status, expected) in [
            (DeliveryStatus::Accepted, vec![CardAction::MarkPicked]),
            (DeliveryStatus::Picked, vec![CardAction::MarkOnTheWay]),
            (DeliveryStatus::OnTheWay, vec![CardAction::MarkDelivered]),
        ] {
            let model = build_feed_model(&[], &[delivery("BK1", status)], true, 0.7);
            assert_eq!(model.active[0].actions, expected, "status {:?}", status);
        }
    }

    #[test]
    fn multi_stop_no_expone_mark_delivered() {
        let mine = vec![multi_stop_delivery("BK9", &[1])];
        let model = build_feed_model(&[], &mine, true, 0.7);
        let card = &model.active[0];
        // Sin acción agregada de delivered: se avanza parada a parada
        assert!(card.actions.is_empty());
        // Cada parada pendiente tiene su botón, las entregadas no
        let deliverable: Vec<u32> = card
            .stops
            .iter()
            .filter(|s| s.can_deliver)
            .map(|s| s.stop_number)
            .collect();
        assert_eq!(deliverable, vec![2, 3]);
    }

    #[test]
    fn multi_stop_completa_solo_con_todas_las_paradas() {
        let parcial = multi_stop_delivery("BK9", &[1, 2]);
        assert!(!parcial.all_stops_delivered());
        let completa = multi_stop_delivery("BK9", &[1, 2, 3]);
        assert!(completa.all_stops_delivered());
    }

    #[test]
    fn completada_con_cash_pendiente_expone_confirmacion() {
        let mut d = delivery("BK5", DeliveryStatus::Delivered);
        d.payment_method = Some("cash".to_string());
        d.payment_status = Some(PaymentStatus::PendingCash);
        d.total_amount = Some(250.0);

        let model = build_feed_model(&[], &[d], true, 0.7);
        assert!(model.active.is_empty());
        assert_eq!(model.completed[0].actions, vec![CardAction::ConfirmCash]);
        let payment = model.completed[0].payment.as_ref().unwrap();
        assert_eq!(payment.status_label, "Cash Pending");
    }

    #[test]
    fn stats_ganancias_solo_sobre_pagadas() {
        let mut pagada = delivery("BK1", DeliveryStatus::Completed);
        pagada.payment_status = Some(PaymentStatus::Paid);
        pagada.total_amount = Some(100.0);

        let mut pendiente = delivery("BK2", DeliveryStatus::Delivered);
        pendiente.payment_status = Some(PaymentStatus::PendingCash);
        pendiente.total_amount = Some(500.0);

        let activa = delivery("BK3", DeliveryStatus::Picked);

        let stats = compute_stats(&[pagada, pendiente, activa], 2, 0.7);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.available, 2);
        // 70% de la única entrega pagada
        assert!((stats.earnings - 70.0).abs() < 1e-9);
    }

    #[test]
    fn mensaje_delivered_incluye_tracking_id() {
        let msg = delivered_message("BK1001");
        assert!(msg.contains("BK1001"));
        assert!(msg.contains("marked as delivered"));
    }

    #[test]
    fn mensajes_de_deliver_stop_difieren() {
        let parcial = deliver_stop_message(false, 2, "BK1001");
        let total = deliver_stop_message(true, 3, "BK1001");
        assert_ne!(parcial, total);
        assert_eq!(parcial, "Stop 2 marked as delivered!");
        assert!(total.contains("All stops delivered"));
        assert!(total.contains("BK1001"));
    }
}
