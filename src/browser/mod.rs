pub mod connection;
pub mod observer;

pub use connection::connect_to_browser_and_page;
pub use observer::{register_bindings, PageEvent};
