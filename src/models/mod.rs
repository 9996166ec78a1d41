pub mod delivery;
pub mod partner;

pub use delivery::{Delivery, DeliveryStatus, PaymentStatus, Stop};
pub use partner::{Partner, PartnerStatus};
