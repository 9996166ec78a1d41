// ============================================================================
// PARTNER MODEL - Identidad del partner (courier)
// ============================================================================

use serde::{Deserialize, Serialize};

/// Estado de disponibilidad del partner
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartnerStatus {
    Online,
    Offline,
}

impl PartnerStatus {
    /// Estado deseado al hacer toggle (complemento lógico del actual)
    pub fn toggled(self) -> Self {
        match self {
            PartnerStatus::Online => PartnerStatus::Offline,
            PartnerStatus::Offline => PartnerStatus::Online,
        }
    }

    pub fn is_online(self) -> bool {
        matches!(self, PartnerStatus::Online)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PartnerStatus::Online => "online",
            PartnerStatus::Offline => "offline",
        }
    }
}

impl Default for PartnerStatus {
    fn default() -> Self {
        PartnerStatus::Offline
    }
}

/// Partner autenticado - se persiste completo en localStorage (`currentPartner`)
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Partner {
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub vehicle_type: Option<String>,
    #[serde(default)]
    pub vehicle_number: Option<String>,
    #[serde(default)]
    pub status: PartnerStatus,
}

impl Partner {
    /// Nombre para mostrar en el header del dashboard
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            _ => self
                .name
                .clone()
                .unwrap_or_else(|| "Demo Partner".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggled_es_complemento() {
        assert_eq!(PartnerStatus::Offline.toggled(), PartnerStatus::Online);
        assert_eq!(PartnerStatus::Online.toggled(), PartnerStatus::Offline);
        // Doble toggle vuelve al estado original
        assert_eq!(PartnerStatus::Online.toggled().toggled(), PartnerStatus::Online);
    }

    #[test]
    fn status_serializa_en_minusculas() {
        let json = serde_json::to_string(&PartnerStatus::Online).unwrap();
        assert_eq!(json, "\"online\"");
        let parsed: PartnerStatus = serde_json::from_str("\"offline\"").unwrap();
        assert_eq!(parsed, PartnerStatus::Offline);
    }

    #[test]
    fn display_name_con_fallbacks() {
        let mut partner = Partner {
            id: "P-1".to_string(),
            first_name: Some("Ravi".to_string()),
            last_name: Some("Kumar".to_string()),
            name: None,
            email: None,
            phone: None,
            vehicle_type: None,
            vehicle_number: None,
            status: PartnerStatus::Offline,
        };
        assert_eq!(partner.display_name(), "Ravi Kumar");

        partner.first_name = None;
        partner.last_name = None;
        partner.name = Some("Ravi".to_string());
        assert_eq!(partner.display_name(), "Ravi");

        partner.name = None;
        assert_eq!(partner.display_name(), "Demo Partner");
    }
}
