use ::time::{UtcOffset, macros::format_description};
use tracing_subscriber::{EnvFilter, fmt::time::OffsetTime};

pub fn init_logs() {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let time_format = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    let timer = OffsetTime::new(offset, time_format);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_timer(timer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
