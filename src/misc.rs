pub mod config;
pub mod ens_utils;
pub mod gas_price;
pub mod registrar;
pub mod shared_init;
pub mod utils;
