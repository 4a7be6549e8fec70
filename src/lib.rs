pub mod catalog;
pub mod i18n;
pub mod layout;
pub mod net;
pub mod session;
