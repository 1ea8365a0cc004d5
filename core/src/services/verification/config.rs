//! Configuration for the verification service

/// Default upload ceiling, sized for phone-camera document photos
pub const DEFAULT_MAX_DOCUMENT_BYTES: usize = 10 * 1024 * 1024;

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Maximum accepted document size in bytes
    pub max_document_bytes: usize,
    /// Accepted file extensions (lowercase, no dot)
    pub allowed_extensions: Vec<String>,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
            allowed_extensions: ["jpg", "jpeg", "png", "webp", "pdf"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl VerificationServiceConfig {
    /// Whether the (normalized) extension is accepted
    pub fn allows_extension(&self, ext: &str) -> bool {
        self.allowed_extensions.iter().any(|e| e == ext)
    }
}
