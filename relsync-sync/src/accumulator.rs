//! Ordered collection of per-file upload outcomes.

use relsync_core::UploadOutcome;

/// Append-only list of outcomes, in the order files were processed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadResults {
    outcomes: Vec<UploadOutcome>,
}

impl UploadResults {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            outcomes: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, outcome: UploadOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn into_vec(self) -> Vec<UploadOutcome> {
        self.outcomes
    }
}

#[cfg(test)]
mod tests {
    use relsync_core::AssetId;

    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let mut results = UploadResults::with_capacity(2);
        for id in [9, 3] {
            results.push(UploadOutcome {
                id: AssetId(id),
                url: format!("https://x/{id}"),
            });
        }
        let ids: Vec<u64> = results.into_vec().iter().map(|o| o.id.0).collect();
        assert_eq!(ids, vec![9, 3]);
    }
}
