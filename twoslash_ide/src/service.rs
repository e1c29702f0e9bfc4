use async_trait::async_trait;
use twoslash::{Diagnostic, QuickInfo};

/// Language service collaborator.
///
/// Offsets are UTF-8 byte offsets into the document text the pass is working on.
#[async_trait(?Send)]
pub trait LanguageService {
    /// Quick info at `offset`, `None` when the service has nothing to say there.
    async fn quick_info(&self, file: &str, offset: usize) -> Option<QuickInfo>;

    async fn syntactic_diagnostics(&self, file: &str) -> Vec<Diagnostic>;

    async fn semantic_diagnostics(&self, file: &str) -> Vec<Diagnostic>;

    /// Syntactic followed by semantic diagnostics, requested concurrently.
    async fn diagnostics(&self, file: &str) -> Vec<Diagnostic> {
        let (mut syntactic, semantic) = futures::join!(
            self.syntactic_diagnostics(file),
            self.semantic_diagnostics(file)
        );
        syntactic.extend(semantic);
        syntactic
    }
}
