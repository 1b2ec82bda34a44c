//! # Fork Flows
//!
//! The fork registry driving extra-data dispatch: activation ordering,
//! height-dependent arity, the node runtime's inspection path and
//! concurrent lookups against a shared registry.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use crate::fixtures::{
        populated_extra, random_block, scheduled_codec, sealed_header, LONDON_AT, NIKARAGVA_AT,
    };
    use node_runtime::{NodeConfig, NodeRuntime, RuntimeError};
    use qc_chain_codec::{Block, Header};
    use qc_fork_manager::{ForkLookup, ForkManager, ForkName, HandlerName};
    use qc_polybft_extra::{ExtraError, ExtraHandler, HeaderExtraApi};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    const GREETING: HandlerName = HandlerName::from_static("greeting");

    fn runtime_from(pairs: &'static [(&'static str, &'static str)]) -> NodeRuntime {
        let config = NodeConfig::from_vars(|key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        })
        .unwrap();
        NodeRuntime::new(config).unwrap()
    }

    // =========================================================================
    // REGISTRY
    // =========================================================================

    #[test]
    fn test_out_of_order_registration() {
        let forks: ForkManager<&'static str> = ForkManager::new();
        forks.register_fork(ForkName::new("hundred"), 100);
        forks.register_fork(ForkName::new("fifty"), 50);
        forks.register_fork(ForkName::new("two-hundred"), 200);

        forks
            .register_handler(&ForkName::BASE, GREETING, "base")
            .unwrap();
        for name in ["hundred", "fifty", "two-hundred"] {
            forks
                .register_handler(&ForkName::new(name), GREETING, name)
                .unwrap();
        }

        assert_eq!(forks.handler(&GREETING, 0), "base");
        assert_eq!(forks.handler(&GREETING, 75), "fifty");
        assert_eq!(forks.handler(&GREETING, 199), "hundred");
        assert_eq!(forks.handler(&GREETING, 250), "two-hundred");

        let heights: Vec<u64> = forks.forks().iter().map(|f| f.from_block).collect();
        assert_eq!(heights, vec![0, 50, 100, 200]);
    }

    #[test]
    fn test_lookup_port_over_extra_registry() {
        let codec = scheduled_codec();
        let lookup: Arc<dyn ForkLookup> = codec.forks().clone();

        assert!(lookup.is_fork_supported(&ForkName::LONDON));
        assert!(!lookup.is_fork_enabled(&ForkName::LONDON, LONDON_AT - 1));
        assert!(lookup.is_fork_enabled(&ForkName::NIKARAGVA, NIKARAGVA_AT));
        assert_eq!(lookup.fork_block(&ForkName::NIKARAGVA), Ok(NIKARAGVA_AT));
    }

    #[test]
    #[should_panic(expected = "no greeting handler active at block 5")]
    fn test_handler_gap_is_fatal() {
        let forks: ForkManager<u8> = ForkManager::new();
        forks.register_fork(ForkName::new("late"), 10);
        forks
            .register_handler(&ForkName::new("late"), GREETING, 1)
            .unwrap();
        forks.handler(&GREETING, 5);
    }

    // =========================================================================
    // EXTRA DISPATCH
    // =========================================================================

    #[test]
    fn test_london_extra_at_activation_boundary() {
        let codec = scheduled_codec();
        let extra = populated_extra(&codec, LONDON_AT);
        let raw = codec.encode(&extra);

        assert_eq!(codec.decode(&raw, LONDON_AT).unwrap(), extra);
        assert_eq!(
            codec.decode(&raw, LONDON_AT - 1),
            Err(ExtraError::ElementCount {
                handler: ExtraHandler::Base,
                expected: 4,
                actual: 5
            })
        );
        assert!(matches!(
            codec.decode(&raw, NIKARAGVA_AT),
            Err(ExtraError::ElementCount {
                handler: ExtraHandler::Nikaragva,
                expected: 6,
                ..
            })
        ));
    }

    #[test]
    fn test_block_extra_survives_block_codec() {
        let codec = scheduled_codec();
        let mut rng = StdRng::seed_from_u64(7);

        for number in [LONDON_AT - 1, LONDON_AT, NIKARAGVA_AT + 3] {
            let block = random_block(&mut rng, &codec, number);
            let decoded = Block::decode(&block.encode()).unwrap();
            let extra = codec.extra_from_header(&decoded.header).unwrap();

            assert_eq!(extra, populated_extra(&codec, number));
            assert!(codec.validate_additional(&extra, &decoded.header).is_ok());
        }
    }

    #[test]
    fn test_through_extra_port() {
        let api: Arc<dyn HeaderExtraApi> = Arc::new(scheduled_codec());
        let parent = Header::empty(NIKARAGVA_AT - 1).seal();
        let mut header = sealed_header(&scheduled_codec(), NIKARAGVA_AT, &parent).unseal();
        header.timestamp += 1;

        let extra = api.decode_extra(&header.extra_data, NIKARAGVA_AT).unwrap();
        let resealed = api.seal_with_extra(header, &extra);
        assert_eq!(api.extra_from_header(&resealed).unwrap(), extra);
        assert_eq!(api.handler_at(resealed.number), ExtraHandler::Nikaragva);
    }

    // =========================================================================
    // NODE RUNTIME
    // =========================================================================

    #[test]
    fn test_runtime_from_env_inspects_blocks() {
        let runtime = runtime_from(&[("QC_FORK_LONDON", "1000"), ("QC_FORK_NIKARAGVA", "2000")]);
        let mut rng = StdRng::seed_from_u64(11);

        let block = random_block(&mut rng, runtime.extra_codec(), 2_500);
        let summary = runtime.inspect_block(&block.encode()).unwrap();

        assert_eq!(summary.extra_handler, ExtraHandler::Nikaragva);
        assert_eq!(summary.transactions, block.transactions.len());
        assert_eq!(summary.extra.fork_fields, vec!["field-0", "field-1"]);
        assert_eq!(summary.validation_error, None);
        assert_eq!(
            summary.hash.trim_start_matches("0x"),
            hex::encode(block.hash())
        );

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["extra_handler"], "nikaragva");
        assert_eq!(json["extra"]["block_number"], 2_500);
    }

    #[test]
    fn test_runtime_without_forks_rejects_london_extra() {
        let scheduled = scheduled_codec();
        let mut rng = StdRng::seed_from_u64(13);
        let block = random_block(&mut rng, &scheduled, LONDON_AT + 1);

        let base_only = runtime_from(&[]);
        assert!(matches!(
            base_only.inspect_block(&block.encode()),
            Err(RuntimeError::Extra(ExtraError::ElementCount { actual: 5, .. }))
        ));
    }

    // =========================================================================
    // CONCURRENCY
    // =========================================================================

    #[test]
    fn test_concurrent_decoding_against_shared_registry() {
        let codec = scheduled_codec();
        let encoded: Vec<(u64, Vec<u8>)> = [10, LONDON_AT, LONDON_AT + 500, NIKARAGVA_AT, 9_999]
            .into_iter()
            .map(|number| {
                let mut rng = StdRng::seed_from_u64(number);
                (number, random_block(&mut rng, &codec, number).encode())
            })
            .collect();

        thread::scope(|scope| {
            for worker in 0..8 {
                let codec = codec.clone();
                let encoded = &encoded;
                scope.spawn(move || {
                    for round in 0..25 {
                        let (number, raw) = &encoded[(worker + round) % encoded.len()];
                        let block = Block::decode(raw).unwrap();
                        let extra = codec.extra_from_header(&block.header).unwrap();
                        assert_eq!(extra.block_number, *number);
                        assert_eq!(
                            extra.fork_fields.len(),
                            codec.handler_at(*number).additional_fields()
                        );
                    }
                });
            }

            scope.spawn(|| {
                for i in 0..50 {
                    codec
                        .forks()
                        .register_fork(ForkName::new(format!("future-{i}")), u64::MAX - i);
                }
            });
        });

        assert_eq!(codec.forks().forks().len(), 3 + 50);
        assert_eq!(codec.handler_at(u64::MAX), ExtraHandler::Nikaragva);
    }
}
