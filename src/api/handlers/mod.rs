pub mod users;

pub use users::{router, AppState};
