//! Core detector trait for document format identification

/// Core trait for document detectors
///
/// A detector recognises whether an input is in a format its plugin can
/// load, before any parsing happens.
///
/// # Example
/// ```
/// use drawpath::core::Detector;
/// use drawpath::plugins::drawio::DrawioDetector;
///
/// let detector = DrawioDetector::new();
/// assert!(detector.detect("<mxGraphModel><root/></mxGraphModel>"));
/// ```
pub trait Detector: Send + Sync {
    /// Detect if the input matches this format
    fn detect(&self, input: &str) -> bool;

    /// Get the confidence level of the detection (0.0 to 1.0)
    fn confidence(&self, input: &str) -> f64;

    /// Get the format name
    fn diagram_type(&self) -> &'static str;

    /// Get key patterns that this detector looks for
    fn patterns(&self) -> Vec<&'static str>;
}
