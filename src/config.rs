pub mod constant {
    pub const DISTANCE_RATE: f64 = 5.0;
    pub const WEIGHT_RATE: f64 = 10.0;
    pub const NO_DISCOUNT_CODE: &str = "NA";
    pub const BATCH_ID_SEPARATOR: &str = "&";
}

pub mod env {
    use std::env;
    use std::path::PathBuf;

    use dotenv::dotenv;

    pub const SETUP_FILE_VAR: &str = "COURIER_SETUP_FILE";
    pub const DISCOUNT_FILE_VAR: &str = "COURIER_DISCOUNT_FILE";
    pub const LOG_FILTER_VAR: &str = "RUST_LOG";
    pub const DEFAULT_LOG_FILTER: &str = "courier=info";

    /// Load `.env` (if any) into the process environment and return its path.
    pub fn load() -> Option<PathBuf> {
        dotenv().ok()
    }

    pub fn path_from_env(var: &str) -> Option<PathBuf> {
        env::var(var)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
    }
}
