//! Builders shared by integration tests and benchmarks.

use std::sync::Arc;

use qc_chain_codec::{
    AccessTuple, Block, DynamicFeeTx, Header, LegacyTx, Log, Receipt, ReceiptOutcome,
    ReceiptStatus, SealedHeader, StateTx, Transaction, TxType,
};
use qc_fork_manager::ForkManager;
use qc_polybft_extra::{
    register_extra_handlers, CheckpointData, Extra, ExtraCodec, ForkSchedule, Signature,
    ValidatorMetadata, ValidatorSetDelta,
};
use rand::Rng;
use shared_types::{Bloom, U256};

pub const LONDON_AT: u64 = 1_000;
pub const NIKARAGVA_AT: u64 = 2_000;

fn random_bytes<R: Rng>(rng: &mut R, len: usize) -> Vec<u8> {
    let mut out = vec![0u8; len];
    rng.fill_bytes(&mut out);
    out
}

fn random_array<R: Rng, const N: usize>(rng: &mut R) -> [u8; N] {
    let mut out = [0u8; N];
    rng.fill_bytes(&mut out);
    out
}

fn random_u256<R: Rng>(rng: &mut R) -> U256 {
    U256::from_big_endian(&random_array::<R, 32>(rng))
}

/// A registry and codec with both optional forks scheduled.
pub fn scheduled_codec() -> ExtraCodec {
    let forks = Arc::new(ForkManager::new());
    let schedule = ForkSchedule {
        london: Some(LONDON_AT),
        nikaragva: Some(NIKARAGVA_AT),
    };
    register_extra_handlers(&forks, &schedule).expect("base fork is always registered");
    ExtraCodec::new(forks)
}

pub fn random_transaction<R: Rng>(rng: &mut R) -> Transaction {
    let to = if rng.gen_bool(0.8) {
        Some(random_array(rng))
    } else {
        None
    };

    match rng.gen_range(0..3) {
        0 => Transaction::new(LegacyTx {
            nonce: rng.gen(),
            gas_price: U256::from(rng.gen::<u64>()),
            gas: rng.gen_range(21_000..1_000_000),
            to,
            value: random_u256(rng),
            input: { let len = rng.gen_range(0..300); random_bytes(rng, len) },
            v: U256::from(rng.gen_range(27u64..29)),
            r: random_u256(rng),
            s: random_u256(rng),
        }),
        1 => Transaction::new(DynamicFeeTx {
            chain_id: U256::from(rng.gen_range(1u64..1_000)),
            nonce: rng.gen(),
            gas_tip_cap: U256::from(rng.gen::<u32>()),
            gas_fee_cap: U256::from(rng.gen::<u64>()),
            gas: rng.gen_range(21_000..1_000_000),
            to,
            value: random_u256(rng),
            input: { let len = rng.gen_range(0..300); random_bytes(rng, len) },
            access_list: (0..rng.gen_range(0..3))
                .map(|_| AccessTuple {
                    address: random_array(rng),
                    storage_keys: (0..rng.gen_range(0..4)).map(|_| random_array(rng)).collect(),
                })
                .collect(),
            v: U256::from(rng.gen_range(0u64..2)),
            r: random_u256(rng),
            s: random_u256(rng),
        }),
        _ => Transaction::new(StateTx {
            nonce: rng.gen(),
            to,
            input: { let len = rng.gen_range(0..100); random_bytes(rng, len) },
            signatures: (0..rng.gen_range(0..4))
                .map(|_| random_bytes(rng, 65))
                .collect(),
            v: U256::zero(),
            r: U256::zero(),
            s: U256::zero(),
        }),
    }
}

pub fn random_receipt<R: Rng>(rng: &mut R, tx_type: TxType) -> Receipt {
    let outcome = match rng.gen_range(0..3) {
        0 => ReceiptOutcome::Root(random_array(rng)),
        1 => ReceiptOutcome::Status(ReceiptStatus::SUCCESS),
        _ => ReceiptOutcome::Status(ReceiptStatus::FAILED),
    };
    Receipt {
        outcome,
        cumulative_gas_used: rng.gen(),
        logs_bloom: Bloom(random_array(rng)),
        logs: (0..rng.gen_range(0..3))
            .map(|_| Log {
                address: random_array(rng),
                topics: (0..rng.gen_range(0..4)).map(|_| random_array(rng)).collect(),
                data: { let len = rng.gen_range(0..80); random_bytes(rng, len) },
            })
            .collect(),
        tx_type,
    }
}

/// Extra with every base field populated and the fork fields the handler
/// at `block` expects.
pub fn populated_extra(codec: &ExtraCodec, block: u64) -> Extra {
    let fields = codec.handler_at(block).additional_fields();
    Extra {
        block_number: block,
        validators: Some(ValidatorSetDelta {
            added: vec![ValidatorMetadata {
                address: [0x11; 20],
                bls_key: vec![0x22; 128],
                voting_power: U256::from(100u64),
                is_active: true,
            }],
            updated: vec![],
            removed: vec![0x01],
        }),
        parent: Some(Signature {
            aggregated_signature: vec![0x33; 48],
            bitmap: vec![0x07],
        }),
        committed: Some(Signature {
            aggregated_signature: vec![0x44; 48],
            bitmap: vec![0x07],
        }),
        checkpoint: Some(CheckpointData {
            block_round: 0,
            epoch_number: block / 10,
            current_validators_hash: [0x55; 32],
            next_validators_hash: [0x66; 32],
            event_root: [0x77; 32],
        }),
        fork_fields: (0..fields).map(|i| format!("field-{i}")).collect(),
    }
}

pub fn sealed_header(codec: &ExtraCodec, number: u64, parent: &SealedHeader) -> SealedHeader {
    let mut header = Header::empty(number);
    header.parent_hash = parent.hash();
    header.gas_limit = 30_000_000;
    header.timestamp = 1_700_000_000 + number * 2;
    header.set_nonce(number);
    codec.seal_with_extra(header, &populated_extra(codec, number))
}

pub fn random_block<R: Rng>(rng: &mut R, codec: &ExtraCodec, number: u64) -> Block {
    let parent = Header::empty(number.saturating_sub(1)).seal();
    let header = sealed_header(codec, number, &parent);
    let count = rng.gen_range(0..20);
    Block::new(header, (0..count).map(|_| random_transaction(rng)).collect())
}
