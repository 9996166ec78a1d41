// ============================================================================
// VIEWS MODULE - Render de DOM sin lógica de negocio
// ============================================================================
pub mod auth;
pub mod dashboard;
pub mod delivery_card;
pub mod feed;
