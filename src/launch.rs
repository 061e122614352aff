//! Built-in launch flows.
//!
//! Each flow is an ordered catalog of step ids and labels; the caller binds
//! the actual SDK calls to those ids through a
//! [`StepAction`](crate::sequencer::StepAction). The flows carry no
//! blockchain semantics of their own.

use serde::Serialize;

/// Number of records minted per batch within the mint step. Large batches
/// are split so a failure can resume from the last completed batch instead
/// of restarting the whole mint.
pub const MINT_CHUNK_SIZE: usize = 50;

/// The launch flows the dashboard offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LaunchFlow {
    /// Deploy an NFT drop, lazy-mint the batch, set claim conditions,
    /// airdrop reserved tokens.
    NftDrop,
    /// Deploy a coin, mint the initial supply, airdrop allocations.
    Coin,
    /// Deploy a marketplace contract.
    Marketplace,
}

impl LaunchFlow {
    pub fn all() -> [Self; 3] {
        [Self::NftDrop, Self::Coin, Self::Marketplace]
    }

    /// Stable key used in analytics events and CLI output.
    pub fn key(self) -> &'static str {
        match self {
            Self::NftDrop => "nft-drop",
            Self::Coin => "coin",
            Self::Marketplace => "marketplace",
        }
    }

    /// Ordered `(id, label)` pairs for this flow, ready for
    /// [`Sequencer::initialize`](crate::sequencer::Sequencer::initialize).
    pub fn steps(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::NftDrop => &[
                ("deploy", "Deploying your contract"),
                ("lazy-mint", "Uploading and minting your NFTs"),
                ("claim-conditions", "Setting claim conditions"),
                ("airdrop", "Airdropping NFTs"),
            ],
            Self::Coin => &[
                ("deploy", "Deploying your coin"),
                ("mint", "Minting the initial supply"),
                ("airdrop", "Airdropping allocations"),
            ],
            Self::Marketplace => &[("deploy", "Deploying your marketplace")],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencer::{Sequencer, StepAction, StepContext};
    use std::sync::Arc;

    struct NoopAction;

    #[async_trait::async_trait]
    impl StepAction for NoopAction {
        async fn execute(&self, _ctx: StepContext) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_every_flow_starts_with_deploy() {
        for flow in LaunchFlow::all() {
            assert_eq!(flow.steps()[0].0, "deploy");
        }
    }

    #[test]
    fn test_flow_step_ids_are_unique() {
        // Guaranteed at initialize time too, but the catalogs themselves
        // must never ship duplicates.
        for flow in LaunchFlow::all() {
            let seq = Sequencer::new(Arc::new(NoopAction));
            seq.initialize(flow.steps().iter().copied())
                .expect("catalog has unique step ids");
        }
    }

    #[test]
    fn test_nft_drop_step_order() {
        let ids: Vec<&str> = LaunchFlow::NftDrop.steps().iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, ["deploy", "lazy-mint", "claim-conditions", "airdrop"]);
    }
}
