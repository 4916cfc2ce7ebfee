//! The candidate directory seam.
//!
//! Representative lookup is owned elsewhere (directory storage, civic-data
//! sync, geocoding). This crate only consumes an ordered candidate list for
//! a jurisdiction, through this trait.

use async_trait::async_trait;

use crate::models::RepresentativeOption;

/// Read-only source of candidate representatives for a jurisdiction key
/// (e.g. a state code or ZIP-derived region).
#[async_trait]
pub trait CandidateDirectory: Send + Sync {
    async fn candidates_for(
        &self,
        jurisdiction_key: &str,
    ) -> anyhow::Result<Vec<RepresentativeOption>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// In-memory directory standing in for the real collaborator.
    struct FixedDirectory(Vec<RepresentativeOption>);

    #[async_trait]
    impl CandidateDirectory for FixedDirectory {
        async fn candidates_for(
            &self,
            jurisdiction_key: &str,
        ) -> anyhow::Result<Vec<RepresentativeOption>> {
            Ok(self
                .0
                .iter()
                .filter(|rep| rep.state == jurisdiction_key)
                .cloned()
                .collect())
        }
    }

    #[tokio::test]
    async fn test_directory_feeds_a_generation_request() {
        let directory = FixedDirectory(vec![
            RepresentativeOption {
                id: 1,
                name: "Jane Doe".to_string(),
                title: "U.S. Senator".to_string(),
                state: "CA".to_string(),
                party: None,
                district: None,
            },
            RepresentativeOption {
                id: 2,
                name: "Pat Roe".to_string(),
                title: "U.S. Senator".to_string(),
                state: "OR".to_string(),
                party: None,
                district: None,
            },
        ]);

        let candidates = directory.candidates_for("CA").await.unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "Jane Doe");
    }
}
