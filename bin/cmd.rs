pub mod name;
pub mod registrar;
pub mod set_name;
