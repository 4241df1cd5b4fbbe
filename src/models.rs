pub mod credentials;
pub mod network;
pub mod registrar_error;
pub mod registry;
pub mod reverse_registrar;
pub mod session;
