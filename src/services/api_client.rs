// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de negocio, solo hace requests HTTP contra el backend
// de la plataforma de entregas.
// ============================================================================

use gloo_net::http::Request;

use crate::config::CONFIG;
use crate::models::{Delivery, Partner, PartnerStatus};

/// Cliente API - SOLO comunicación HTTP (stateless)
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            base_url: CONFIG.backend_url().to_string(),
        }
    }

    /// Consultar el estado actual del partner en el servidor
    pub async fn get_partner_status(&self) -> Result<PartnerStatus, String> {
        let url = format!("{}/api/partner/status", self.base_url);

        let response = Request::get(&url)
            .credentials(web_sys::RequestCredentials::Include)
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        if !response.ok() {
            return Err(format!(
                "HTTP {}: {}",
                response.status(),
                response.status_text()
            ));
        }

        let data = response
            .json::<StatusResponse>()
            .await
            .map_err(|e| format!("Parse error: {}", e))?;

        if data.success {
            data.status
                .ok_or_else(|| "Respuesta sin campo status".to_string())
        } else {
            Err(data
                .message
                .unwrap_or_else(|| "Unknown error".to_string()))
        }
    }

    /// Publicar el nuevo estado de disponibilidad
    pub async fn set_partner_status(&self, status: PartnerStatus) -> Result<(), String> {
        let url = format!("{}/api/partner/status", self.base_url);
        let request = SetStatusRequest { status };

        log::info!("🔄 Publicando estado del partner: {}", status.as_str());

        let response = Request::post(&url)
            .credentials(web_sys::RequestCredentials::Include)
            .json(&request)
            .map_err(|e| format!("Serialization error: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        if !response.ok() {
            let status_code = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(format!("HTTP error {}: {}", status_code, error_text));
        }

        let data = response
            .json::<AckResponse>()
            .await
            .map_err(|e| format!("Parse error: {}", e))?;

        if data.success {
            log::info!("✅ Estado publicado: {}", status.as_str());
            Ok(())
        } else {
            Err(data
                .message
                .unwrap_or_else(|| "Unknown error".to_string()))
        }
    }

    /// Registrar un partner nuevo
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), String> {
        let url = format!("{}/api/partner/register", self.base_url);

        log::info!("📝 Registrando partner: {}", request.email);

        let response = Request::post(&url)
            .json(request)
            .map_err(|e| format!("Serialization error: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        if !response.ok() {
            return Err(format!(
                "HTTP {}: {}",
                response.status(),
                response.status_text()
            ));
        }

        let data = response
            .json::<AckResponse>()
            .await
            .map_err(|e| format!("Parse error: {}", e))?;

        if data.success {
            Ok(())
        } else {
            Err(data
                .message
                .unwrap_or_else(|| "Unknown error".to_string()))
        }
    }

    /// Login del partner
    pub async fn login(&self, email: &str, password: &str) -> Result<Partner, String> {
        let url = format!("{}/api/partner/login", self.base_url);
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        log::info!("🔐 Iniciando sesión para: {}", email);

        let response = Request::post(&url)
            .credentials(web_sys::RequestCredentials::Include)
            .json(&request)
            .map_err(|e| format!("Serialization error: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        if !response.ok() {
            return Err(format!(
                "HTTP {}: {}",
                response.status(),
                response.status_text()
            ));
        }

        let data = response
            .json::<LoginResponse>()
            .await
            .map_err(|e| format!("Parse error: {}", e))?;

        if data.success {
            data.partner
                .ok_or_else(|| "Respuesta sin partner".to_string())
        } else {
            Err(data
                .message
                .unwrap_or_else(|| "Invalid credentials".to_string()))
        }
    }

    /// Cerrar la sesión del lado servidor (la respuesta no trae cuerpo útil)
    pub async fn logout(&self) -> Result<(), String> {
        let url = format!("{}/api/partner/logout", self.base_url);

        let response = Request::post(&url)
            .credentials(web_sys::RequestCredentials::Include)
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        if response.ok() {
            Ok(())
        } else {
            Err(format!(
                "HTTP {}: {}",
                response.status(),
                response.status_text()
            ))
        }
    }

    /// Obtener el feed completo: disponibles + asignadas, en un solo request
    pub async fn get_deliveries(&self) -> Result<DeliveriesResponse, String> {
        let url = format!("{}/api/partner/deliveries", self.base_url);

        let response = Request::get(&url)
            .credentials(web_sys::RequestCredentials::Include)
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        if !response.ok() {
            return Err(format!(
                "HTTP {}: {}",
                response.status(),
                response.status_text()
            ));
        }

        let data = response
            .json::<DeliveriesResponse>()
            .await
            .map_err(|e| format!("Parse error: {}", e))?;

        if data.success {
            log::info!(
                "📦 Feed recibido: {} disponibles, {} asignadas",
                data.available_deliveries.len(),
                data.my_deliveries.len()
            );
            Ok(data)
        } else {
            Err(data
                .message
                .unwrap_or_else(|| "Unknown error".to_string()))
        }
    }

    /// Aceptar una entrega disponible
    pub async fn accept_delivery(&self, delivery_id: &str) -> Result<(), String> {
        let url = format!("{}/api/partner/accept-delivery", self.base_url);
        let request = AcceptDeliveryRequest {
            delivery_id: delivery_id.to_string(),
        };

        log::info!("🤝 Aceptando entrega: {}", delivery_id);

        self.post_ack(&url, &request).await
    }

    /// Avanzar el estado de una entrega (solo single-stop hasta delivered)
    pub async fn update_delivery_status(
        &self,
        delivery_id: &str,
        status: crate::models::DeliveryStatus,
    ) -> Result<(), String> {
        let url = format!("{}/api/partner/update-status", self.base_url);
        let request = UpdateStatusRequest {
            delivery_id: delivery_id.to_string(),
            status,
        };

        log::info!("🚚 Actualizando entrega {} → {}", delivery_id, status.as_str());

        self.post_ack(&url, &request).await
    }

    /// Marcar una parada como entregada (entregas multi-stop)
    pub async fn deliver_stop(
        &self,
        delivery_id: &str,
        stop_number: u32,
    ) -> Result<DeliverStopResponse, String> {
        let url = format!("{}/api/partner/deliver-stop", self.base_url);
        let request = DeliverStopRequest {
            delivery_id: delivery_id.to_string(),
            stop_number,
        };

        log::info!("📍 Entregando parada {} de {}", stop_number, delivery_id);

        let response = Request::post(&url)
            .credentials(web_sys::RequestCredentials::Include)
            .json(&request)
            .map_err(|e| format!("Serialization error: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        if !response.ok() {
            return Err(format!(
                "HTTP {}: {}",
                response.status(),
                response.status_text()
            ));
        }

        let data = response
            .json::<DeliverStopResponse>()
            .await
            .map_err(|e| format!("Parse error: {}", e))?;

        if data.success {
            if data.all_delivered {
                log::info!("🏁 Todas las paradas de {} entregadas", delivery_id);
            }
            Ok(data)
        } else {
            Err(data
                .message
                .unwrap_or_else(|| "Unknown error".to_string()))
        }
    }

    /// Confirmar cobro en efectivo de una entrega completada
    pub async fn confirm_cash_payment(&self, booking_id: &str) -> Result<(), String> {
        let url = format!("{}/api/payment/cash-confirm/{}", self.base_url, booking_id);

        log::info!("💵 Confirmando cobro en efectivo: {}", booking_id);

        let response = Request::post(&url)
            .credentials(web_sys::RequestCredentials::Include)
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        if !response.ok() {
            return Err(format!(
                "HTTP {}: {}",
                response.status(),
                response.status_text()
            ));
        }

        let data = response
            .json::<AckResponse>()
            .await
            .map_err(|e| format!("Parse error: {}", e))?;

        if data.success {
            Ok(())
        } else {
            Err(data
                .message
                .unwrap_or_else(|| "Unknown error".to_string()))
        }
    }

    /// Helper: POST JSON + respuesta {success, message?}
    async fn post_ack<B: serde::Serialize>(&self, url: &str, body: &B) -> Result<(), String> {
        let response = Request::post(url)
            .credentials(web_sys::RequestCredentials::Include)
            .json(body)
            .map_err(|e| format!("Serialization error: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        if !response.ok() {
            return Err(format!(
                "HTTP {}: {}",
                response.status(),
                response.status_text()
            ));
        }

        let data = response
            .json::<AckResponse>()
            .await
            .map_err(|e| format!("Parse error: {}", e))?;

        if data.success {
            Ok(())
        } else {
            Err(data
                .message
                .unwrap_or_else(|| "Unknown error".to_string()))
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(serde::Serialize)]
struct SetStatusRequest {
    status: PartnerStatus,
}

#[derive(serde::Deserialize)]
struct StatusResponse {
    success: bool,
    #[serde(default)]
    status: Option<PartnerStatus>,
    #[serde(default)]
    message: Option<String>,
}

/// Respuesta genérica {success, message?}
#[derive(serde::Deserialize)]
pub struct AckResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(serde::Serialize)]
pub struct RegisterRequest {
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub phone: String,
    pub email: String,
    #[serde(rename = "vehicleType")]
    pub vehicle_type: String,
    #[serde(rename = "vehicleNumber")]
    pub vehicle_number: String,
    pub password: String,
}

#[derive(serde::Serialize)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(serde::Deserialize)]
struct LoginResponse {
    success: bool,
    #[serde(default)]
    partner: Option<Partner>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(serde::Deserialize)]
pub struct DeliveriesResponse {
    pub success: bool,
    #[serde(default)]
    pub available_deliveries: Vec<Delivery>,
    #[serde(default)]
    pub my_deliveries: Vec<Delivery>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(serde::Serialize)]
struct AcceptDeliveryRequest {
    delivery_id: String,
}

#[derive(serde::Serialize)]
struct UpdateStatusRequest {
    delivery_id: String,
    status: crate::models::DeliveryStatus,
}

#[derive(serde::Serialize)]
struct DeliverStopRequest {
    delivery_id: String,
    stop_number: u32,
}

#[derive(serde::Deserialize)]
pub struct DeliverStopResponse {
    pub success: bool,
    #[serde(default)]
    pub all_delivered: bool,
    #[serde(default)]
    pub delivery_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
