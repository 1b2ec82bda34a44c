//! # Node Runtime
//!
//! Owns the fork registry and the extra-data codec built from it, and
//! inspects encoded blocks with them.
//!
//! ## Startup Sequence
//!
//! 1. Validate configuration
//! 2. Build the fork registry (seeded with the base fork)
//! 3. Register the scheduled forks and their extra handlers
//! 4. Hand the registry to the extra codec

use std::sync::Arc;

use qc_chain_codec::{Block, CodecError, TxType};
use qc_fork_manager::{Fork, ForkManager};
use qc_polybft_extra::{register_extra_handlers, Extra, ExtraCodec, ExtraError, ExtraHandler};
use serde::Serialize;
use shared_types::to_hex;
use tracing::{debug, info, warn};

use crate::container::{ConfigError, NodeConfig};

/// Errors from block inspection.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("block decode failed: {0}")]
    Block(#[from] CodecError),

    #[error("extra decode failed: {0}")]
    Extra(#[from] ExtraError),
}

/// Decoded view of a block, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockSummary {
    pub number: u64,
    pub hash: String,
    pub parent_hash: String,
    pub timestamp: u64,
    pub gas_used: u64,
    pub transactions: usize,
    pub tx_types: Vec<TxType>,
    pub tx_hashes: Vec<String>,
    pub uncles: usize,
    pub extra_handler: ExtraHandler,
    pub extra: Extra,
    /// Fork-field check failure, if any.
    pub validation_error: Option<String>,
}

/// The assembled node services.
#[derive(Debug)]
pub struct NodeRuntime {
    config: NodeConfig,
    forks: Arc<ForkManager<ExtraHandler>>,
    extra: ExtraCodec,
}

impl NodeRuntime {
    pub fn new(config: NodeConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let forks = Arc::new(ForkManager::new());
        register_extra_handlers(&forks, &config.chain.forks)?;
        let extra = ExtraCodec::new(Arc::clone(&forks));

        info!(chain = %config.chain.name, "[node-runtime] runtime assembled");
        Ok(Self {
            config,
            forks,
            extra,
        })
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    pub fn forks(&self) -> Arc<ForkManager<ExtraHandler>> {
        Arc::clone(&self.forks)
    }

    pub fn extra_codec(&self) -> &ExtraCodec {
        &self.extra
    }

    /// Fork table in activation order.
    pub fn fork_table(&self) -> Vec<Fork> {
        self.forks.forks()
    }

    /// Log every registered fork.
    pub fn log_fork_table(&self) {
        for fork in self.fork_table() {
            info!(
                fork = %fork.name,
                from_block = fork.from_block,
                handler = %self.extra.handler_at(fork.from_block),
                "[node-runtime] fork scheduled"
            );
        }
    }

    /// Decode a block and its extra data.
    ///
    /// Decode errors are returned. A failed fork-field check is reported
    /// in the summary instead.
    pub fn inspect_block(&self, raw: &[u8]) -> Result<BlockSummary, RuntimeError> {
        let block = Block::decode(raw)?;
        let number = block.number();

        let extra_handler = self.extra.handler_at(number);
        let extra = self.extra.extra_from_header(&block.header)?;

        let validation_error = match self.extra.validate_additional(&extra, &block.header) {
            Ok(()) => None,
            Err(err) => {
                warn!(block = number, error = %err, "[node-runtime] extra validation failed");
                Some(err.to_string())
            }
        };

        debug!(
            block = number,
            handler = %extra_handler,
            transactions = block.transactions.len(),
            "[node-runtime] block inspected"
        );

        Ok(BlockSummary {
            number,
            hash: to_hex(&block.hash()),
            parent_hash: to_hex(&block.header.parent_hash),
            timestamp: block.header.timestamp,
            gas_used: block.header.gas_used,
            transactions: block.transactions.len(),
            tx_types: block.transactions.iter().map(|tx| tx.tx_type()).collect(),
            tx_hashes: block.transactions.iter().map(|tx| to_hex(&tx.hash())).collect(),
            uncles: block.uncles.len(),
            extra_handler,
            extra,
            validation_error,
        })
    }
}
