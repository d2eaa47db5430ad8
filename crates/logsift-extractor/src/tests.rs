//! Integration tests for the Extractor

#[cfg(test)]
mod tests {
    use crate::{Extractor, ExtractorConfig, ExtractorError, OracleScope};
    use logsift_domain::{
        ClusterChange, ClusterId, ClusterSummary, MatchMode, Observation, PatternOracle,
    };
    use logsift_drain::{DrainError, MockOracle};

    const DEDUP_LOG: &str = "INFO starting\nINFO starting\nINFO starting\nINFO starting\nINFO starting\nERROR failed: true\nINFO starting\n";

    fn mock_extractor(max_clusters: usize, scope: OracleScope) -> Extractor<MockOracle> {
        let config = ExtractorConfig {
            max_clusters,
            scope,
            ..ExtractorConfig::default()
        };
        Extractor::new(MockOracle::new(max_clusters).unwrap(), config).unwrap()
    }

    fn lines(result: &crate::ExtractionResult) -> Vec<usize> {
        result.chunks.iter().map(|c| c.line_number).collect()
    }

    /// Oracle that resolves nothing, breaking the `Always` contract
    struct SilentOracle;

    impl PatternOracle for SilentOracle {
        type Error = DrainError;

        fn observe(&mut self, _text: &str) -> Result<Observation, Self::Error> {
            Ok(Observation::new(ClusterId::from_value(0), ClusterChange::Created))
        }

        fn match_chunk(&self, _text: &str, _mode: MatchMode) -> Result<Option<ClusterId>, Self::Error> {
            Ok(None)
        }

        fn clusters(&self) -> Vec<ClusterSummary> {
            Vec::new()
        }

        fn max_clusters(&self) -> usize {
            8
        }

        fn reset(&mut self) {}
    }

    #[test]
    fn test_full_extraction_flow() {
        let mut extractor = mock_extractor(8, OracleScope::PerCall);
        let result = extractor.extract(DEDUP_LOG).unwrap();

        assert_eq!(lines(&result), vec![0, 5]);
        assert_eq!(result.chunks[0].chunk, "INFO starting");
        assert_eq!(result.chunks[0].chunk_length, 14);
        assert_eq!(result.chunks[1].chunk, "ERROR failed: true");
        assert_eq!(result.chunks[1].chunk_length, 19);

        assert_eq!(result.metadata.total_chunks, 7);
        assert_eq!(result.metadata.total_lines, 7);
        assert_eq!(result.metadata.cluster_count, 2);
    }

    #[test]
    fn test_untrimmed_chunks_keep_exact_text() {
        let config = ExtractorConfig {
            trim_chunks: false,
            ..ExtractorConfig::default()
        };
        let mut extractor = Extractor::new(MockOracle::default(), config).unwrap();
        let result = extractor.extract(DEDUP_LOG).unwrap();

        assert_eq!(result.chunks[0].chunk, "INFO starting\n");
        assert_eq!(result.chunks[0].chunk_length, 14);
    }

    #[test]
    fn test_ranking_is_reported_but_does_not_filter() {
        let mut extractor = mock_extractor(8, OracleScope::PerCall);
        let result = extractor.extract(DEDUP_LOG).unwrap();

        let ranking: Vec<(u64, u64)> = result
            .metadata
            .clusters_by_size
            .iter()
            .map(|c| (c.id.value(), c.size))
            .collect();
        assert_eq!(ranking, vec![(0, 6), (1, 1)]);
        // The singleton class is still represented
        assert_eq!(result.chunks.len(), 2);
    }

    #[test]
    fn test_continuation_chunk_is_one_entry() {
        let log = "step 1\nError: \\\n  more detail\nstep 1\n";
        let mut extractor = mock_extractor(8, OracleScope::PerCall);
        let result = extractor.extract(log).unwrap();

        assert_eq!(lines(&result), vec![0, 1]);
        assert_eq!(result.chunks[1].chunk, "Error: \\\n  more detail");
        assert_eq!(result.metadata.total_chunks, 3);
        assert_eq!(result.metadata.total_lines, 4);
    }

    #[test]
    fn test_output_is_in_document_order() {
        let log = "c\nb\na\nc\nb\na\n";
        let mut extractor = mock_extractor(8, OracleScope::PerCall);
        let result = extractor.extract(log).unwrap();

        assert_eq!(lines(&result), vec![0, 1, 2]);
        let texts: Vec<&str> = result.chunks.iter().map(|c| c.chunk.as_str()).collect();
        assert_eq!(texts, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_cardinality_bounded_by_capacity() {
        let log = "a\nb\nc\nd\ne\n";
        let mut extractor = mock_extractor(2, OracleScope::PerCall);
        let result = extractor.extract(log).unwrap();

        // c, d, e fold into the first class
        assert_eq!(lines(&result), vec![0, 1]);
        assert_eq!(result.metadata.cluster_count, 2);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let log = "x 1\ny: \n  z\nx 1\nw\n";
        let first = mock_extractor(8, OracleScope::PerCall).extract(log).unwrap();
        let second = mock_extractor(8, OracleScope::PerCall).extract(log).unwrap();

        assert_eq!(first.chunks, second.chunks);
    }

    #[test]
    fn test_empty_input() {
        let mut extractor = mock_extractor(8, OracleScope::PerCall);
        let result = extractor.extract("").unwrap();

        assert!(result.is_empty());
        assert_eq!(result.metadata.total_chunks, 0);
        assert_eq!(result.metadata.total_lines, 0);
        assert_eq!(extractor.oracle().observe_calls(), 0);
    }

    #[test]
    fn test_each_chunk_is_observed_then_matched_once() {
        let mut extractor = mock_extractor(8, OracleScope::PerCall);
        extractor.extract(DEDUP_LOG).unwrap();

        assert_eq!(extractor.oracle().observe_calls(), 7);
        assert_eq!(extractor.oracle().match_calls(), 7);
    }

    #[test]
    fn test_observe_failure_propagates() {
        let mut oracle = MockOracle::default();
        oracle.fail_observe_on("boom\n");
        let mut extractor = Extractor::new(oracle, ExtractorConfig::default()).unwrap();

        let result = extractor.extract("ok\nboom\nok\n");
        assert!(matches!(result, Err(ExtractorError::Oracle(_))));
        // No selection pass after a training failure
        assert_eq!(extractor.oracle().match_calls(), 0);
    }

    #[test]
    fn test_match_failure_propagates() {
        let mut oracle = MockOracle::default();
        oracle.fail_match_on("late\n");
        let mut extractor = Extractor::new(oracle, ExtractorConfig::default()).unwrap();

        let result = extractor.extract("early\nlate\n");
        match result {
            Err(ExtractorError::Oracle(msg)) => assert!(msg.contains("match failed")),
            other => panic!("expected oracle error, got {:?}", other),
        }
    }

    #[test]
    fn test_unresolved_chunk_is_an_error() {
        let mut extractor = Extractor::new(SilentOracle, ExtractorConfig::default()).unwrap();
        let result = extractor.extract("a\nb\n");

        assert_eq!(result, Err(ExtractorError::Unmatched { line: 0 }));
    }

    #[test]
    fn test_per_call_scope_isolates_documents() {
        let mut reused = mock_extractor(8, OracleScope::PerCall);
        reused.extract("a\nb\n").unwrap();
        let after_a = reused.extract("b\nc\n").unwrap();

        let fresh = mock_extractor(8, OracleScope::PerCall).extract("b\nc\n").unwrap();
        assert_eq!(after_a.chunks, fresh.chunks);
    }

    #[test]
    fn test_shared_scope_keeps_vocabulary() {
        let mut extractor = mock_extractor(2, OracleScope::Shared);
        extractor.extract("a\nb\n").unwrap();
        let result = extractor.extract("b\nc\n").unwrap();

        // "b" keeps its class from the first document, "c" folds into "a"'s
        let ids: Vec<u64> = result.chunks.iter().map(|c| c.cluster_id.value()).collect();
        assert_eq!(ids, vec![1, 0]);
        assert_eq!(lines(&result), vec![0, 1]);
        assert_eq!(extractor.oracle().clusters().iter().map(|c| c.size).sum::<u64>(), 4);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ExtractorConfig {
            max_clusters: 0,
            ..ExtractorConfig::default()
        };
        let result = Extractor::new(MockOracle::default(), config.clone());
        assert!(matches!(result, Err(ExtractorError::Config(_))));

        let result = Extractor::with_drain(config);
        assert!(matches!(result, Err(ExtractorError::Config(_))));
    }

    #[test]
    fn test_invalid_drain_tuning_rejected() {
        let mut tuning = logsift_drain::DrainConfig::default();
        tuning.depth = 1;
        let result = Extractor::with_drain_tuning(ExtractorConfig::default(), tuning);
        assert!(matches!(result, Err(ExtractorError::Config(_))));
    }

    #[test]
    fn test_drain_backed_extraction() {
        let log = "\
pod web-1 ready
pod web-2 ready
pod web-3 ready
error: image pull failed
pod web-4 ready
";
        let mut extractor = Extractor::with_drain(ExtractorConfig::default()).unwrap();
        let result = extractor.extract(log).unwrap();

        assert_eq!(lines(&result), vec![0, 3]);
        assert_eq!(result.chunks[1].chunk, "error: image pull failed");
    }

    #[test]
    fn test_result_serializes_to_json() {
        let mut extractor = mock_extractor(8, OracleScope::PerCall);
        let result = extractor.extract(DEDUP_LOG).unwrap();

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["chunks"][1]["line_number"], 5);
        assert_eq!(json["chunks"][1]["chunk"], "ERROR failed: true");
        assert_eq!(json["chunks"][1]["chunk_length"], 19);
        assert_eq!(json["metadata"]["cluster_count"], 2);
    }
}

#[cfg(test)]
mod proptests {
    use crate::{Extractor, ExtractorConfig};
    use logsift_drain::MockOracle;
    use proptest::prelude::*;
    use std::collections::HashSet;

    proptest! {
        /// Property: output is ordered, bounded by capacity and free of duplicate classes
        #[test]
        fn test_selection_invariants(
            lines in prop::collection::vec("[a-d]{1,3}[: ]?", 0..40),
            max_clusters in 1usize..6,
        ) {
            let log: String = lines.iter().map(|l| format!("{}\n", l)).collect();
            let config = ExtractorConfig { max_clusters, ..ExtractorConfig::default() };
            let mut extractor = Extractor::new(MockOracle::new(max_clusters).unwrap(), config).unwrap();
            let result = extractor.extract(&log).unwrap();

            prop_assert!(result.chunks.len() <= max_clusters);
            prop_assert!(result.chunks.windows(2).all(|w| w[0].line_number < w[1].line_number));

            let ids: HashSet<_> = result.chunks.iter().map(|c| c.cluster_id).collect();
            prop_assert_eq!(ids.len(), result.chunks.len());
        }
    }
}
