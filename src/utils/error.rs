use thiserror::Error;

#[derive(Error, Debug)]
pub enum CartError {
    #[error("Requested amount {requested} of product {product_id} exceeds available stock {available}")]
    StockExceeded {
        product_id: u64,
        requested: u64,
        available: u32,
    },

    #[error("Product {product_id} is not in the cart")]
    ItemNotFound { product_id: u64 },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Unexpected response from {endpoint}: {message}")]
    UnexpectedResponse { endpoint: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Saved cart is corrupt: {message}")]
    CorruptCart { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Stock,
    NotFound,
    Service,
    Storage,
    Config,
}

impl CartError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CartError::StockExceeded { .. } => ErrorCategory::Stock,
            CartError::ItemNotFound { .. } => ErrorCategory::NotFound,
            CartError::ApiError(_) | CartError::UnexpectedResponse { .. } => {
                ErrorCategory::Service
            }
            CartError::IoError(_)
            | CartError::SerializationError(_)
            | CartError::CorruptCart { .. } => ErrorCategory::Storage,
            CartError::ConfigError { .. } | CartError::InvalidConfigValueError { .. } => {
                ErrorCategory::Config
            }
        }
    }

    /// Lookup failures: transport errors, non-2xx statuses and bad payloads.
    pub fn is_service_failure(&self) -> bool {
        self.category() == ErrorCategory::Service
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CartError::StockExceeded { .. } => "Requested quantity is out of stock".to_string(),
            CartError::ItemNotFound { product_id } => {
                format!("Product {} is not in the cart", product_id)
            }
            CartError::ApiError(e) if e.is_timeout() => {
                "The product service did not answer in time".to_string()
            }
            CartError::ApiError(_) | CartError::UnexpectedResponse { .. } => {
                "The product service could not be reached".to_string()
            }
            CartError::IoError(_) | CartError::SerializationError(_) => {
                "The saved cart could not be read or written".to_string()
            }
            CartError::CorruptCart { message } => format!("The saved cart is corrupt: {}", message),
            CartError::ConfigError { message } => format!("Configuration problem: {}", message),
            CartError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Stock => "Lower the requested amount",
            ErrorCategory::NotFound => "Run `cart-sync show` to list the products in the cart",
            ErrorCategory::Service => "Check that the API server is running and retry",
            ErrorCategory::Storage => "Check permissions of the data directory",
            ErrorCategory::Config => "Fix the configuration file or command line flags",
        }
    }
}

pub type Result<T> = std::result::Result<T, CartError>;
