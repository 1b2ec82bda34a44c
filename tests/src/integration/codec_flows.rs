//! # Codec Flows
//!
//! Chain objects through the canonical codec: randomized blocks and
//! receipts, mixed typed streams, and rejection of malformed input.

#[cfg(test)]
mod tests {
    use crate::fixtures::{random_block, random_receipt, random_transaction, scheduled_codec};
    use qc_chain_codec::{
        decode_receipts, decode_transactions, encode_receipts, encode_transactions, Block,
        CodecError, DynamicFeeTx, Header, LegacyTx, Log, SealedHeader, StateTx, Transaction,
        TxType,
    };
    use qc_rlp::{decode_with, Encodable, Item, RlpError};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use shared_types::{keccak256, U256};

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    fn mixed_transactions() -> Vec<Transaction> {
        vec![
            Transaction::new(LegacyTx {
                nonce: 1,
                gas_price: U256::from(7u64),
                gas: 21_000,
                to: Some([0xaa; 20]),
                value: U256::from(1_000u64),
                v: U256::from(27u64),
                ..Default::default()
            }),
            Transaction::new(DynamicFeeTx {
                chain_id: U256::from(100u64),
                nonce: 2,
                gas: 50_000,
                input: vec![0xde, 0xad],
                ..Default::default()
            }),
            Transaction::new(StateTx {
                nonce: 3,
                to: Some([0xbb; 20]),
                signatures: vec![vec![0x01; 65], vec![0x02; 65]],
                ..Default::default()
            }),
        ]
    }

    // =========================================================================
    // ROUND TRIPS
    // =========================================================================

    #[test]
    fn test_random_blocks_roundtrip() {
        let mut rng = rng();
        let codec = scheduled_codec();

        for number in [0, 1, 999, 1_000, 1_500, 2_000, 5_000] {
            let block = random_block(&mut rng, &codec, number);
            let encoded = block.encode();
            let decoded = Block::decode(&encoded).unwrap();

            assert_eq!(decoded, block);
            assert_eq!(decoded.hash(), keccak256(&decoded.header.encode()));
            assert_eq!(decoded.encode(), encoded);
        }
    }

    #[test]
    fn test_block_with_uncles_roundtrip() {
        let mut rng = rng();
        let codec = scheduled_codec();
        let mut block = random_block(&mut rng, &codec, 42);
        block.uncles = vec![Header::empty(40).seal(), Header::empty(41).seal()];

        let decoded = Block::decode(&block.encode()).unwrap();
        assert_eq!(decoded.uncles.len(), 2);
        assert_eq!(decoded.uncles[1].hash(), block.uncles[1].hash());
        assert_eq!(decoded, block);
    }

    #[test]
    fn test_random_receipts_roundtrip() {
        let mut rng = rng();
        let receipts: Vec<_> = (0..32)
            .map(|_| {
                let tx_type = random_transaction(&mut rng).tx_type();
                random_receipt(&mut rng, tx_type)
            })
            .collect();

        let decoded = decode_receipts(&encode_receipts(&receipts)).unwrap();
        assert_eq!(decoded, receipts);
    }

    #[test]
    fn test_standalone_and_list_hashes_agree() {
        let txs = mixed_transactions();
        let listed = decode_transactions(&encode_transactions(&txs)).unwrap();

        for (tx, from_list) in txs.iter().zip(&listed) {
            let standalone = Transaction::decode(&tx.encode()).unwrap();
            assert_eq!(standalone.hash(), from_list.hash());
            assert_eq!(standalone.hash(), keccak256(&tx.encode()));
        }
    }

    // =========================================================================
    // TYPED STREAMS
    // =========================================================================

    #[test]
    fn test_hand_built_typed_stream() {
        let txs = mixed_transactions();
        let stream = Item::list(vec![
            txs[0].payload().rlp_item(),
            Item::bytes(vec![0x02]),
            txs[1].payload().rlp_item(),
            Item::bytes(vec![0x7f]),
            txs[2].payload().rlp_item(),
        ])
        .encode();

        let decoded = decode_transactions(&stream).unwrap();
        let types: Vec<_> = decoded.iter().map(Transaction::tx_type).collect();
        assert_eq!(types, vec![TxType::Legacy, TxType::DynamicFee, TxType::State]);
        assert_eq!(decoded, txs);
        assert_eq!(encode_transactions(&decoded), stream);
    }

    #[test]
    fn test_typed_stream_missing_body() {
        let stream = Item::list(vec![
            mixed_transactions()[0].payload().rlp_item(),
            Item::bytes(vec![0x02]),
        ])
        .encode();
        assert_eq!(
            decode_transactions(&stream),
            Err(CodecError::MissingTypedPayload(0x02))
        );
    }

    #[test]
    fn test_standalone_unknown_type() {
        let mut raw = vec![0x05];
        raw.extend(Item::list(vec![]).encode());
        assert_eq!(Transaction::decode(&raw), Err(CodecError::UnknownTxType(0x05)));
    }

    // =========================================================================
    // MALFORMED INPUT
    // =========================================================================

    #[test]
    fn test_non_canonical_single_byte_rejected() {
        let mut raw = vec![0xd8, 0x94];
        raw.extend([0x11; 20]);
        raw.extend([0xc0, 0x81, 0x05]);

        let err = decode_with(&raw, Log::from_value).unwrap_err();
        assert_eq!(
            err,
            CodecError::Rlp(RlpError::NonCanonicalSingleByte {
                byte: 0x05,
                offset: 23
            })
        );
    }

    #[test]
    fn test_header_arity_names_field_count() {
        let short = Item::list((0..14).map(|_| Item::uint(0)).collect()).encode();
        let err = SealedHeader::decode(&short).unwrap_err();

        assert_eq!(
            err,
            CodecError::ElementCount {
                object: "header",
                expected: 15,
                actual: 14
            }
        );
        assert!(err.to_string().contains("expected 15 but found 14"));
    }

    #[test]
    fn test_block_trailing_bytes() {
        let mut rng = rng();
        let mut encoded = random_block(&mut rng, &scheduled_codec(), 7).encode();
        encoded.push(0x00);
        assert_eq!(
            Block::decode(&encoded),
            Err(CodecError::Rlp(RlpError::TrailingBytes { remaining: 1 }))
        );
    }

    #[test]
    fn test_truncated_block_never_panics() {
        let mut rng = rng();
        let encoded = random_block(&mut rng, &scheduled_codec(), 3).encode();

        for len in 0..encoded.len() {
            assert!(Block::decode(&encoded[..len]).is_err());
        }
    }
}
