pub mod backoff;
pub mod csv_export;
pub mod errors;
pub mod handler_404;
