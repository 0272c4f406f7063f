/// Default backend address for a locally running server
pub const LOCAL_API_URL: &str = "http://localhost:5000";

pub const SIGNUP_PATH: &str = "/signup";
pub const SIGNIN_PATH: &str = "/signin";
pub const PROCESS_TICKER_PATH: &str = "/process_ticker";
pub const RISKS_PATH: &str = "/api/risks";
pub const SIMULATE_PATH: &str = "/api/simulate";

pub const DEFAULT_MEAN: f64 = 1_000_000.0;
pub const DEFAULT_STDDEV: f64 = 300_000.0;
pub const DEFAULT_SIMULATIONS: u32 = 10_000;

/// Generic per-operation messages used when the backend gives none
pub const SIMULATION_FAILED: &str = "Simulation failed";
pub const SIGNUP_FAILED: &str = "Signup failed";
pub const SIGNIN_FAILED: &str = "Sign-in failed";
pub const PROCESSING_FAILED: &str = "Processing failed";
pub const PROCESS_TICKER_FAILED: &str = "Failed to process ticker";
pub const CATALOG_UNEXPECTED: &str = "Unexpected API response";
pub const CATALOG_FAILED: &str = "Failed to load risk list";
