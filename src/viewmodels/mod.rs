// ============================================================================
// VIEWMODELS MODULE - Lógica de presentación (MVVM)
// ============================================================================
pub mod feed_viewmodel;
pub mod session_viewmodel;

pub use feed_viewmodel::FeedViewModel;
pub use session_viewmodel::SessionViewModel;
