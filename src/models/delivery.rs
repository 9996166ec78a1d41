// ============================================================================
// DELIVERY MODEL - Estructuras compartidas con el backend
// ============================================================================
// Copia transitoria de solo lectura: el servidor es el dueño de los datos,
// el cliente los refresca periódicamente y nunca los muta localmente.
// ============================================================================

use serde::{Deserialize, Serialize};

/// Estado de una entrega
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Available,
    Accepted,
    Picked,
    OnTheWay,
    Delivered,
    Completed,
}

impl DeliveryStatus {
    /// Una entrega en estado terminal ya no es "activa" en el feed
    pub fn is_terminal(self) -> bool {
        matches!(self, DeliveryStatus::Delivered | DeliveryStatus::Completed)
    }

    /// Siguiente estado en la progresión accepted → picked → on_the_way → delivered.
    /// El último paso solo aplica a entregas de una sola parada; las multi-stop
    /// avanzan parada por parada vía deliver-stop.
    pub fn next(self) -> Option<DeliveryStatus> {
        match self {
            DeliveryStatus::Accepted => Some(DeliveryStatus::Picked),
            DeliveryStatus::Picked => Some(DeliveryStatus::OnTheWay),
            DeliveryStatus::OnTheWay => Some(DeliveryStatus::Delivered),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DeliveryStatus::Available => "available",
            DeliveryStatus::Accepted => "accepted",
            DeliveryStatus::Picked => "picked",
            DeliveryStatus::OnTheWay => "on_the_way",
            DeliveryStatus::Delivered => "delivered",
            DeliveryStatus::Completed => "completed",
        }
    }

    /// Etiqueta para el badge de la card
    pub fn label(self) -> &'static str {
        match self {
            DeliveryStatus::Available => "Available",
            DeliveryStatus::Accepted => "Accepted",
            DeliveryStatus::Picked => "Picked Up",
            DeliveryStatus::OnTheWay => "On the Way",
            DeliveryStatus::Delivered => "Delivered",
            DeliveryStatus::Completed => "Completed",
        }
    }
}

/// Estado de pago de una entrega completada
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    PendingCash,
    Pending,
}

impl PaymentStatus {
    pub fn label(self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::PendingCash => "Cash Pending",
            PaymentStatus::Pending => "Pending",
        }
    }
}

/// Una parada dentro de una entrega multi-destino
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Stop {
    pub stop_number: u32,
    pub drop_address: String,
    pub receiver_name: String,
    pub receiver_phone: String,
    pub status: DeliveryStatus,
}

impl Stop {
    pub fn is_delivered(&self) -> bool {
        self.status == DeliveryStatus::Delivered
    }
}

/// Entrega (booking) con una o más paradas
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Delivery {
    pub id: String,
    pub sender_address: String,
    #[serde(default)]
    pub receiver_address: Option<String>,
    #[serde(default)]
    pub receiver_name: Option<String>,
    #[serde(default)]
    pub receiver_phone: Option<String>,
    pub weight: f64,
    pub parcel_type: String,
    pub status: DeliveryStatus,
    #[serde(default = "default_total_stops")]
    pub total_stops: u32,
    #[serde(default)]
    pub stops: Option<Vec<Stop>>,
    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub total_amount: Option<f64>,
}

fn default_total_stops() -> u32 {
    1
}

impl Delivery {
    /// La unidad de asignación es la entrega completa, incluso con varias paradas
    pub fn is_multi_stop(&self) -> bool {
        self.total_stops > 1
    }

    /// Invariante: el agregado solo puede avanzar a `delivered` cuando
    /// todas las paradas están entregadas
    pub fn all_stops_delivered(&self) -> bool {
        match &self.stops {
            Some(stops) if !stops.is_empty() => stops.iter().all(|s| s.is_delivered()),
            _ => false,
        }
    }

    /// Pago en efectivo pendiente de confirmación por el partner
    pub fn awaiting_cash_confirmation(&self) -> bool {
        self.status.is_terminal()
            && self.payment_method.as_deref() == Some("cash")
            && self.payment_status == Some(PaymentStatus::PendingCash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delivery(status: DeliveryStatus) -> Delivery {
        Delivery {
            id: "BK1001".to_string(),
            sender_address: "12 MG Road".to_string(),
            receiver_address: Some("48 Park Street".to_string()),
            receiver_name: Some("Asha".to_string()),
            receiver_phone: Some("9900000000".to_string()),
            weight: 2.5,
            parcel_type: "documents".to_string(),
            status,
            total_stops: 1,
            stops: None,
            payment_status: None,
            payment_method: None,
            total_amount: None,
        }
    }

    fn stop(number: u32, status: DeliveryStatus) -> Stop {
        Stop {
            stop_number: number,
            drop_address: format!("Drop {}", number),
            receiver_name: format!("Receiver {}", number),
            receiver_phone: "9911111111".to_string(),
            status,
        }
    }

    #[test]
    fn progresion_de_estados() {
        assert_eq!(DeliveryStatus::Accepted.next(), Some(DeliveryStatus::Picked));
        assert_eq!(DeliveryStatus::Picked.next(), Some(DeliveryStatus::OnTheWay));
        assert_eq!(DeliveryStatus::OnTheWay.next(), Some(DeliveryStatus::Delivered));
        assert_eq!(DeliveryStatus::Delivered.next(), None);
        assert_eq!(DeliveryStatus::Available.next(), None);
    }

    #[test]
    fn estados_terminales() {
        assert!(DeliveryStatus::Delivered.is_terminal());
        assert!(DeliveryStatus::Completed.is_terminal());
        assert!(!DeliveryStatus::OnTheWay.is_terminal());
    }

    #[test]
    fn snake_case_en_el_wire() {
        let parsed: DeliveryStatus = serde_json::from_str("\"on_the_way\"").unwrap();
        assert_eq!(parsed, DeliveryStatus::OnTheWay);
        assert_eq!(serde_json::to_string(&DeliveryStatus::OnTheWay).unwrap(), "\"on_the_way\"");
        let payment: PaymentStatus = serde_json::from_str("\"pending_cash\"").unwrap();
        assert_eq!(payment, PaymentStatus::PendingCash);
    }

    #[test]
    fn multi_stop_completa_solo_con_todas_las_paradas() {
        let mut d = delivery(DeliveryStatus::OnTheWay);
        d.total_stops = 3;
        d.stops = Some(vec![
            stop(1, DeliveryStatus::Delivered),
            stop(2, DeliveryStatus::Delivered),
            stop(3, DeliveryStatus::OnTheWay),
        ]);
        assert!(d.is_multi_stop());
        assert!(!d.all_stops_delivered());

        d.stops.as_mut().unwrap()[2].status = DeliveryStatus::Delivered;
        assert!(d.all_stops_delivered());
    }

    #[test]
    fn cash_pendiente_solo_en_terminales() {
        let mut d = delivery(DeliveryStatus::Delivered);
        d.payment_method = Some("cash".to_string());
        d.payment_status = Some(PaymentStatus::PendingCash);
        assert!(d.awaiting_cash_confirmation());

        d.status = DeliveryStatus::OnTheWay;
        assert!(!d.awaiting_cash_confirmation());

        d.status = DeliveryStatus::Completed;
        d.payment_status = Some(PaymentStatus::Paid);
        assert!(!d.awaiting_cash_confirmation());
    }

    #[test]
    fn deserializa_delivery_minimo() {
        // total_stops ausente implica entrega de una sola parada
        let json = r#"{
            "id": "BK1",
            "sender_address": "A",
            "weight": 1.0,
            "parcel_type": "box",
            "status": "available"
        }"#;
        let d: Delivery = serde_json::from_str(json).unwrap();
        assert_eq!(d.total_stops, 1);
        assert!(!d.is_multi_stop());
        assert!(d.stops.is_none());
    }
}
