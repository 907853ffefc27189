//! # Mint Service
//!
//! The mint engine: composes the blacklist, sale phase controller, allowlist
//! verifier and supply ledger behind one write guard, and commits successful
//! mints through the outbound ports.
//!
//! ## Mint Pipeline
//!
//! ```text
//! blacklist -> phase -> proof (presale) -> payment -> supply -> commit
//! ```
//!
//! The first failing guard aborts the call with no state change. Commit
//! deposits the payment, assigns the token range on the ownership ledger and
//! publishes `Minted`. A ledger failure refunds the deposit and releases the
//! reservation; if the refund fails as well the call returns
//! `MintError::RefundFailed` naming the stranded amount.
//!
//! ## Concurrency
//!
//! Every mutating call holds the state write guard for its whole duration,
//! port calls included, so mints never interleave. Views take the read guard.

use crate::adapters::{InMemoryEventLog, InMemoryOwnershipLedger, InMemoryTreasury};
use crate::algorithms::merkle;
use crate::config::MintConfig;
use crate::domain::{
    Address, BlacklistRegistry, Hash, MintError, Ownable, PhaseLimits, SalePhase,
    SalePhaseController, SupplyLedger, SupplySnapshot, TokenId, U256,
};
use crate::events::MintEvent;
use crate::metrics;
use crate::ports::inbound::{MintReceipt, NftMintApi};
use crate::ports::outbound::{EventPublisher, OwnershipLedger, Treasury};

use async_trait::async_trait;
use parking_lot::RwLock as StatsLock;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument, warn};

/// Statistics for the mint service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// Mint calls that committed.
    pub mints_succeeded: u64,
    /// Mint calls rejected by a guard or a collaborator.
    pub mints_rejected: u64,
    /// Tokens minted across all calls.
    pub tokens_minted: u64,
    /// Admin operations that took effect.
    pub admin_actions: u64,
}

/// Mutable engine state, guarded as a unit.
#[derive(Debug)]
struct MintState {
    ownable: Ownable,
    blacklist: BlacklistRegistry,
    sale: SalePhaseController,
    supply: SupplyLedger,
}

/// Which mint entry point is being served.
#[derive(Clone, Copy, Debug)]
enum MintKind<'a> {
    Presale { proof: &'a [Hash] },
    Public,
}

impl MintKind<'_> {
    fn phase(self) -> SalePhase {
        match self {
            Self::Presale { .. } => SalePhase::Presale,
            Self::Public => SalePhase::PublicSale,
        }
    }

    fn not_open(self) -> MintError {
        match self {
            Self::Presale { .. } => MintError::PreSaleIsNotOpen,
            Self::Public => MintError::PublicSaleIsNotOpen,
        }
    }
}

/// The mint engine.
pub struct MintService<L: OwnershipLedger, T: Treasury, E: EventPublisher> {
    config: MintConfig,
    state: RwLock<MintState>,
    ledger: Arc<L>,
    treasury: Arc<T>,
    events: Arc<E>,
    stats: StatsLock<ServiceStats>,
}

impl<L: OwnershipLedger, T: Treasury, E: EventPublisher> MintService<L, T, E> {
    /// Create the engine owned by `owner` (the deployer).
    ///
    /// Starts closed, unrevealed, with an empty blacklist and the configured
    /// allowlist root.
    pub fn new(
        owner: Address,
        config: MintConfig,
        ledger: Arc<L>,
        treasury: Arc<T>,
        events: Arc<E>,
    ) -> Self {
        let state = MintState {
            ownable: Ownable::new(owner),
            blacklist: BlacklistRegistry::new(),
            sale: SalePhaseController::new(config.merkle_root),
            supply: SupplyLedger::new(config.presale, config.public_sale),
        };

        info!(
            owner = %owner,
            name = %config.name,
            presale_supply = config.presale.supply,
            public_supply = config.public_sale.supply,
            "Mint engine initialized"
        );

        Self {
            config,
            state: RwLock::new(state),
            ledger,
            treasury,
            events,
            stats: StatsLock::new(ServiceStats::default()),
        }
    }

    /// Engine configuration.
    pub fn config(&self) -> &MintConfig {
        &self.config
    }

    /// Ownership ledger handle.
    pub fn ledger(&self) -> &Arc<L> {
        &self.ledger
    }

    /// Treasury handle.
    pub fn treasury(&self) -> &Arc<T> {
        &self.treasury
    }

    /// Event sink handle.
    pub fn events(&self) -> &Arc<E> {
        &self.events
    }

    /// Get current service statistics.
    pub fn stats(&self) -> ServiceStats {
        self.stats.read().clone()
    }

    // =========================================================================
    // MINT PIPELINE
    // =========================================================================

    #[instrument(skip(self, kind), fields(caller = %caller, phase = %kind.phase()))]
    async fn mint(
        &self,
        caller: Address,
        kind: MintKind<'_>,
        quantity: u64,
        paid: U256,
    ) -> Result<MintReceipt, MintError> {
        let mut state = self.state.write().await;

        match self.try_mint(&mut state, caller, kind, quantity, paid).await {
            Ok(receipt) => {
                {
                    let mut stats = self.stats.write();
                    stats.mints_succeeded += 1;
                    stats.tokens_minted += receipt.quantity;
                }
                metrics::record_mint(&receipt.phase.to_string(), receipt.quantity);
                info!(
                    first_token_id = receipt.first_token_id,
                    quantity = receipt.quantity,
                    paid = %receipt.paid,
                    total_minted = state.supply.total_minted(),
                    "Mint committed"
                );
                Ok(receipt)
            }
            Err(err) => {
                self.stats.write().mints_rejected += 1;
                metrics::record_rejection(err.kind());
                warn!(quantity, paid = %paid, reason = err.kind(), "Mint rejected: {}", err);
                Err(err)
            }
        }
    }

    async fn try_mint(
        &self,
        state: &mut MintState,
        caller: Address,
        kind: MintKind<'_>,
        quantity: u64,
        paid: U256,
    ) -> Result<MintReceipt, MintError> {
        self.check_guards(state, caller, kind, quantity, paid)?;

        let reservation = match kind {
            MintKind::Presale { .. } => state.supply.reserve_presale(caller, quantity)?,
            MintKind::Public => state.supply.reserve_public(caller, quantity)?,
        };

        if let Err(err) = self.treasury.deposit(caller, paid).await {
            state.supply.release(&reservation);
            return Err(err.into());
        }

        if let Err(err) = self
            .ledger
            .mint_range(caller, reservation.first_token_id, quantity)
            .await
        {
            state.supply.release(&reservation);
            if let Err(refund_err) = self.treasury.refund(caller, paid).await {
                error!(
                    caller = %caller,
                    paid = %paid,
                    "Refund after failed ledger commit did not complete: {}",
                    refund_err
                );
                return Err(MintError::RefundFailed {
                    caller,
                    paid,
                    ledger: err,
                    refund: refund_err,
                });
            }
            return Err(err.into());
        }

        let receipt = MintReceipt {
            minter: caller,
            phase: reservation.phase,
            first_token_id: reservation.first_token_id,
            quantity,
            paid,
        };

        self.events
            .publish(MintEvent::Minted {
                minter: caller,
                phase: receipt.phase,
                first_token_id: receipt.first_token_id,
                quantity,
                paid,
            })
            .await;

        Ok(receipt)
    }

    /// Pure guards, in order. Nothing is written.
    fn check_guards(
        &self,
        state: &MintState,
        caller: Address,
        kind: MintKind<'_>,
        quantity: u64,
        paid: U256,
    ) -> Result<(), MintError> {
        if state.blacklist.contains(&caller) {
            return Err(MintError::AccountAtBlackList(caller));
        }

        if state.sale.current_phase() != kind.phase() {
            return Err(kind.not_open());
        }

        if let MintKind::Presale { proof } = kind {
            if !merkle::verify(&state.sale.allowlist_root(), &caller, proof) {
                return Err(MintError::InvalidProof(caller));
            }
        }

        match self.config.price_for(quantity) {
            Some(required) if paid >= required => Ok(()),
            _ => Err(MintError::InsufficentPayment(caller, paid)),
        }
    }

    // =========================================================================
    // ADMIN
    // =========================================================================

    fn unauthorized(&self, operation: &'static str, err: MintError) -> MintError {
        warn!(operation, reason = err.kind(), "Admin operation rejected: {}", err);
        err
    }

    async fn admin_applied(&self, action: &'static str, event: MintEvent) {
        self.stats.write().admin_actions += 1;
        metrics::record_admin_action(action);
        self.events.publish(event).await;
    }

    /// Owner-only: set the phase from its numeric code (0 closed, 1 presale,
    /// 2 public). Unknown codes fail with `InvalidSalePhase` before any other
    /// check.
    pub async fn set_sale_code(&self, caller: Address, code: u8) -> Result<(), MintError> {
        let phase = SalePhase::try_from(code).map_err(MintError::InvalidSalePhase)?;
        self.set_sale(caller, phase).await
    }

    // =========================================================================
    // VIEWS
    // =========================================================================

    /// Collection name.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Collection symbol.
    pub fn symbol(&self) -> &str {
        &self.config.symbol
    }

    /// Price of one token in wei.
    pub fn price(&self) -> U256 {
        self.config.price_per_unit
    }

    /// Presale supply cap.
    pub fn presale_supply(&self) -> u64 {
        self.config.presale.supply
    }

    /// Public sale supply cap.
    pub fn public_sale_supply(&self) -> u64 {
        self.config.public_sale.supply
    }

    /// Both phases' caps.
    pub fn limits(&self) -> (PhaseLimits, PhaseLimits) {
        (self.config.presale, self.config.public_sale)
    }

    /// Tokens minted during presale.
    pub async fn presale_minted(&self) -> u64 {
        self.state.read().await.supply.presale_minted()
    }

    /// Tokens minted during public sale.
    pub async fn public_minted(&self) -> u64 {
        self.state.read().await.supply.public_minted()
    }

    /// Presale tokens minted by `address`.
    pub async fn minted_presale_by(&self, address: Address) -> u64 {
        self.state.read().await.supply.minted_presale_by(&address)
    }

    /// Public tokens minted by `address`.
    pub async fn minted_public_by(&self, address: Address) -> u64 {
        self.state.read().await.supply.minted_public_by(&address)
    }

    /// Consistent copy of all three counters.
    pub async fn supply_snapshot(&self) -> SupplySnapshot {
        self.state.read().await.supply.snapshot()
    }

    /// Holder of `token_id`.
    pub async fn owner_of(&self, token_id: TokenId) -> Option<Address> {
        self.ledger.owner_of(token_id).await
    }

    /// Proceeds retained by the treasury.
    pub async fn treasury_balance(&self) -> U256 {
        self.treasury.balance().await
    }
}

#[async_trait]
impl<L: OwnershipLedger, T: Treasury, E: EventPublisher> NftMintApi for MintService<L, T, E> {
    async fn mint_presale(
        &self,
        caller: Address,
        quantity: u64,
        proof: &[Hash],
        paid: U256,
    ) -> Result<MintReceipt, MintError> {
        self.mint(caller, MintKind::Presale { proof }, quantity, paid)
            .await
    }

    async fn mint_public(
        &self,
        caller: Address,
        quantity: u64,
        paid: U256,
    ) -> Result<MintReceipt, MintError> {
        self.mint(caller, MintKind::Public, quantity, paid).await
    }

    async fn add_to_black_list(
        &self,
        caller: Address,
        address: Address,
    ) -> Result<(), MintError> {
        let mut state = self.state.write().await;
        state
            .ownable
            .only_owner(caller)
            .map_err(|e| self.unauthorized("add_to_black_list", e))?;
        state.blacklist.add(address).map_err(|e| {
            debug!(address = %address, "Blacklist entry already present");
            e
        })?;

        info!(address = %address, entries = state.blacklist.len(), "Address blacklisted");
        self.admin_applied("add_to_black_list", MintEvent::BlacklistAdded { address })
            .await;
        Ok(())
    }

    async fn set_sale(&self, caller: Address, phase: SalePhase) -> Result<(), MintError> {
        let mut state = self.state.write().await;
        state
            .ownable
            .only_owner(caller)
            .map_err(|e| self.unauthorized("set_sale", e))?;
        let previous = state.sale.set_phase(phase);

        info!(%previous, current = %phase, "Sale phase set");
        self.admin_applied(
            "set_sale",
            MintEvent::SaleChanged {
                previous,
                current: phase,
            },
        )
        .await;
        Ok(())
    }

    async fn set_merkle_root(&self, caller: Address, root: Hash) -> Result<(), MintError> {
        let mut state = self.state.write().await;
        state
            .ownable
            .only_owner(caller)
            .map_err(|e| self.unauthorized("set_merkle_root", e))?;
        let previous = state.sale.set_allowlist_root(root);

        info!(%previous, current = %root, "Allowlist root set");
        self.admin_applied(
            "set_merkle_root",
            MintEvent::MerkleRootChanged {
                previous,
                current: root,
            },
        )
        .await;
        Ok(())
    }

    async fn reveal_collection(&self, caller: Address) -> Result<(), MintError> {
        let mut state = self.state.write().await;
        state
            .ownable
            .only_owner(caller)
            .map_err(|e| self.unauthorized("reveal_collection", e))?;

        if state.sale.reveal() {
            info!("Collection revealed");
            self.admin_applied("reveal_collection", MintEvent::Revealed)
                .await;
        } else {
            debug!("Collection already revealed");
        }
        Ok(())
    }

    async fn transfer_ownership(
        &self,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), MintError> {
        let mut state = self.state.write().await;
        let previous_owner = state
            .ownable
            .transfer(caller, new_owner)
            .map_err(|e| self.unauthorized("transfer_ownership", e))?;

        info!(previous = %previous_owner, new = %new_owner, "Ownership transferred");
        self.admin_applied(
            "transfer_ownership",
            MintEvent::OwnershipTransferred {
                previous_owner,
                new_owner: Some(new_owner),
            },
        )
        .await;
        Ok(())
    }

    async fn renounce_ownership(&self, caller: Address) -> Result<(), MintError> {
        let mut state = self.state.write().await;
        let previous_owner = state
            .ownable
            .renounce(caller)
            .map_err(|e| self.unauthorized("renounce_ownership", e))?;

        warn!(previous = %previous_owner, "Ownership renounced; admin operations disabled");
        self.admin_applied(
            "renounce_ownership",
            MintEvent::OwnershipTransferred {
                previous_owner,
                new_owner: None,
            },
        )
        .await;
        Ok(())
    }

    async fn withdraw(&self, caller: Address) -> Result<U256, MintError> {
        let state = self.state.write().await;
        state
            .ownable
            .only_owner(caller)
            .map_err(|e| self.unauthorized("withdraw", e))?;

        let amount = self.treasury.withdraw_to(caller).await?;
        info!(to = %caller, %amount, "Proceeds withdrawn");

        self.admin_applied("withdraw", MintEvent::Withdrawn { to: caller, amount })
            .await;
        Ok(amount)
    }

    async fn token_uri(&self, token_id: TokenId) -> Result<String, MintError> {
        let state = self.state.read().await;
        if !self.ledger.owner_exists(token_id).await {
            return Err(MintError::NonexistentToken(token_id));
        }
        Ok(self
            .config
            .metadata
            .resolve(token_id, state.sale.is_revealed()))
    }

    async fn is_at_black_list(&self, address: Address) -> bool {
        self.state.read().await.blacklist.contains(&address)
    }

    async fn sale(&self) -> SalePhase {
        self.state.read().await.sale.current_phase()
    }

    async fn merkle_root(&self) -> Hash {
        self.state.read().await.sale.allowlist_root()
    }

    async fn revealed(&self) -> bool {
        self.state.read().await.sale.is_revealed()
    }

    async fn owner(&self) -> Option<Address> {
        self.state.read().await.ownable.owner()
    }

    async fn balance_of(&self, address: Address) -> u64 {
        self.ledger.balance_of(address).await
    }

    async fn total_supply(&self) -> u64 {
        self.state.read().await.supply.total_minted()
    }
}

/// Engine over in-memory adapters with `MintConfig::for_testing()`.
pub fn create_test_service(
    owner: Address,
) -> MintService<InMemoryOwnershipLedger, InMemoryTreasury, InMemoryEventLog> {
    MintService::new(
        owner,
        MintConfig::for_testing(),
        Arc::new(InMemoryOwnershipLedger::new()),
        Arc::new(InMemoryTreasury::new()),
        Arc::new(InMemoryEventLog::new()),
    )
}
