// Utils compartidos

pub mod dialog;
pub mod storage;

pub use dialog::*;
pub use storage::*;
