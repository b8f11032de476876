use crate::wire::HealthRes;

/// Simple health service used by the REST API.
pub struct HealthService;

impl HealthService {
    /// Static method to check health without creating an instance
    ///
    /// The renderer holds no external connections, so being able to answer is being healthy.
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Receita is alive".into(),
        }
    }
}
