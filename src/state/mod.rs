// ============================================================================
// STATE MODULE - State Management con Rc<RefCell>
// ============================================================================

pub mod app_state;
pub mod feed_state;
pub mod session_state;

pub use app_state::*;
pub use feed_state::*;
pub use session_state::*;
