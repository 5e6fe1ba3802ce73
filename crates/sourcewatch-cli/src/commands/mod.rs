//! Command implementations.

pub mod check;
pub mod status;

pub use self::check::execute_check;
pub use self::status::execute_status;
