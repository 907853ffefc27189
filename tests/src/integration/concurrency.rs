//! # Concurrency Stress
//!
//! Many minters racing the same engine on a multi-threaded runtime. The
//! write guard serializes every mint, so caps hold exactly and no token id
//! is handed out twice.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use nft_mint::prelude::*;
    use rand::Rng;

    use crate::fixtures::{deploy, random_addresses, OWNER};

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_public_supply_cap_holds_under_contention() {
        let engine = Arc::new(deploy(MintConfig::default()));
        engine.set_sale(OWNER, SalePhase::PublicSale).await.unwrap();

        let minters = random_addresses(64);
        let mut handles = Vec::with_capacity(minters.len());
        for minter in minters {
            let engine = Arc::clone(&engine);
            let quantity = rand::thread_rng().gen_range(1..=5u64);
            handles.push(tokio::spawn(async move {
                let paid = engine.config().price_for(quantity).unwrap_or_default();
                engine.mint_public(minter, quantity, paid).await
            }));
        }

        let mut minted = 0u64;
        let mut paid = U256::zero();
        for handle in handles {
            match handle.await.unwrap() {
                Ok(receipt) => {
                    minted += receipt.quantity;
                    paid += receipt.paid;
                }
                Err(err) => assert!(matches!(err, MintError::ExceedsMaxSupplyPublicSale(10))),
            }
        }

        let snapshot = engine.supply_snapshot().await;
        let (presale, public) = engine.limits();
        assert!(minted <= 10);
        assert_eq!(snapshot.public_minted, minted);
        assert!(invariant_supply_consistent(&snapshot));
        assert!(invariant_within_caps(&snapshot, &presale, &public));
        assert_eq!(engine.ledger().token_count() as u64, minted);
        assert_eq!(engine.treasury_balance().await, paid);

        for token_id in FIRST_TOKEN_ID..FIRST_TOKEN_ID + minted {
            assert!(engine.owner_of(token_id).await.is_some());
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_per_address_cap_holds_for_one_spammer() {
        let engine = Arc::new(deploy(MintConfig::default()));
        engine.set_sale(OWNER, SalePhase::PublicSale).await.unwrap();
        let spammer = random_addresses(1)[0];

        let mut handles = Vec::new();
        for _ in 0..20 {
            let engine = Arc::clone(&engine);
            handles.push(tokio::spawn(async move {
                engine.mint_public(spammer, 1, engine.price()).await
            }));
        }

        let mut succeeded = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => succeeded += 1,
                Err(err) => assert_eq!(err, MintError::ExceedsMaxQuantityPerAddressPublic(spammer)),
            }
        }

        // default public per-address cap
        assert_eq!(succeeded, 6);
        assert_eq!(engine.minted_public_by(spammer).await, 6);
        assert_eq!(engine.balance_of(spammer).await, 6);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_admin_changes_interleave_with_mints() {
        let engine = Arc::new(deploy(MintConfig::default()));
        engine.set_sale(OWNER, SalePhase::PublicSale).await.unwrap();
        let minters = random_addresses(10);
        let blacklisted = minters[0];

        let admin = {
            let engine = Arc::clone(&engine);
            tokio::spawn(async move {
                engine.add_to_black_list(OWNER, blacklisted).await.unwrap();
                engine.set_sale(OWNER, SalePhase::Closed).await.unwrap();
            })
        };

        let mut handles = Vec::new();
        for minter in minters.clone() {
            let engine = Arc::clone(&engine);
            handles.push(tokio::spawn(async move {
                engine.mint_public(minter, 1, engine.price()).await
            }));
        }

        admin.await.unwrap();
        for handle in handles {
            if let Err(err) = handle.await.unwrap() {
                assert!(matches!(
                    err,
                    MintError::AccountAtBlackList(_) | MintError::PublicSaleIsNotOpen
                ));
            }
        }

        // once closed, nobody mints
        assert_eq!(
            engine.mint_public(minters[1], 1, engine.price()).await,
            Err(MintError::PublicSaleIsNotOpen)
        );
        let snapshot = engine.supply_snapshot().await;
        assert!(snapshot.total_minted <= 10);
        assert!(invariant_supply_consistent(&snapshot));
    }
}
