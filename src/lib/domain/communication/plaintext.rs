//! Plaintext conversion

#[cfg(test)]
use mockall::mock;

/// Derives a plaintext body from rendered HTML
pub trait HtmlToText: Clone + Send + Sync + 'static {
    /// Convert HTML to plaintext. The same input always yields the same output.
    fn convert(&self, html: &str) -> String;
}

#[cfg(test)]
mock! {
    pub HtmlToText {}

    impl Clone for HtmlToText {
        fn clone(&self) -> Self;
    }

    impl HtmlToText for HtmlToText {
        fn convert(&self, html: &str) -> String;
    }
}
