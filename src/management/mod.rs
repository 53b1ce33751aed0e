mod session;
mod store;

pub use session::SessionManager;
pub use store::UiStore;
