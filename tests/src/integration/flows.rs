//! # Integration Test Flows
//!
//! The operator tooling and the engine working together:
//!
//! 1. **Allowlist file -> report -> engine**: roots and proofs produced by
//!    `mint-admin` are accepted by the engine's verifier
//! 2. **Full sale lifecycle**: presale to cap, public sale to cap, reveal,
//!    withdraw
//! 3. **Config file -> engine**: a rendered and edited TOML config drives
//!    the caps

#[cfg(test)]
mod tests {
    use std::io::Write;

    use mint_admin::{build_report, default_config_toml, load_allowlist, load_config};
    use nft_mint::prelude::*;

    use crate::fixtures::{deploy, random_addresses, OWNER};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn allowlist_file(addresses: &[Address]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# generated").unwrap();
        for address in addresses {
            writeln!(file, "{}", address.to_hex()).unwrap();
        }
        file
    }

    // =============================================================================
    // ALLOWLIST TOOLING -> ENGINE
    // =============================================================================

    #[tokio::test]
    async fn test_cli_report_proofs_accepted_by_engine() {
        let members = random_addresses(5);
        let file = allowlist_file(&members);
        let report = build_report(&load_allowlist(file.path()).unwrap()).unwrap();

        let mut config = MintConfig::default();
        config.presale = PhaseLimits::new(5, 1, 1);
        let engine = deploy(config.with_merkle_root(report.root));
        engine.set_sale(OWNER, SalePhase::Presale).await.unwrap();

        for member in &report.proofs {
            let receipt = engine
                .mint_presale(member.address, 1, &member.proof, engine.price())
                .await
                .unwrap();
            assert_eq!(engine.owner_of(receipt.first_token_id).await, Some(member.address));
        }
        assert_eq!(engine.presale_minted().await, 5);

        let outsider = random_addresses(1)[0];
        let stolen = &report.proofs[0].proof;
        assert_eq!(
            engine
                .mint_presale(outsider, 1, stolen, engine.price())
                .await,
            Err(MintError::InvalidProof(outsider))
        );
    }

    #[tokio::test]
    async fn test_large_allowlist_every_member_verifies() {
        let members = random_addresses(37);
        let report = build_report(&members).unwrap();

        let engine = deploy(MintConfig::for_testing().with_merkle_root(report.root));
        for member in &report.proofs {
            assert!(verify(&engine.merkle_root().await, &member.address, &member.proof));
        }

        engine.set_sale(OWNER, SalePhase::Presale).await.unwrap();
        let last = report.proofs.last().unwrap();
        engine
            .mint_presale(last.address, 2, &last.proof, U256::from(2u64))
            .await
            .unwrap();
        assert_eq!(engine.balance_of(last.address).await, 2);
    }

    // =============================================================================
    // FULL SALE LIFECYCLE
    // =============================================================================

    #[tokio::test]
    async fn test_full_sale_lifecycle() {
        let members = random_addresses(3);
        let report = build_report(&members).unwrap();
        let engine = deploy(MintConfig::default().with_merkle_root(report.root));
        let price = |quantity| engine.config().price_for(quantity).unwrap();

        // presale: 4 + 2 fills the cap of 6
        engine.set_sale(OWNER, SalePhase::Presale).await.unwrap();
        let a = &report.proofs[0];
        let b = &report.proofs[1];
        engine.mint_presale(a.address, 4, &a.proof, price(4)).await.unwrap();
        engine.mint_presale(b.address, 2, &b.proof, price(2)).await.unwrap();
        let c = &report.proofs[2];
        assert_eq!(
            engine.mint_presale(c.address, 1, &c.proof, price(1)).await,
            Err(MintError::ExceedsMaxSupplyPresale(6))
        );

        // public sale: 5 + 5 fills the cap of 10
        engine.set_sale(OWNER, SalePhase::PublicSale).await.unwrap();
        let buyers = random_addresses(3);
        engine.mint_public(buyers[0], 5, price(5)).await.unwrap();
        engine.mint_public(buyers[1], 5, price(5)).await.unwrap();
        assert_eq!(
            engine.mint_public(buyers[2], 1, price(1)).await,
            Err(MintError::ExceedsMaxSupplyPublicSale(10))
        );

        let snapshot = engine.supply_snapshot().await;
        assert_eq!(snapshot.total_minted, 16);
        assert!(invariant_supply_consistent(&snapshot));
        assert_eq!(engine.owner_of(16).await, Some(buyers[1]));
        assert_eq!(engine.owner_of(17).await, None);

        // reveal
        assert_eq!(
            engine.token_uri(16).await.unwrap(),
            engine.config().metadata.placeholder_uri
        );
        engine.reveal_collection(OWNER).await.unwrap();
        assert!(engine.token_uri(16).await.unwrap().ends_with("/16.json"));

        // proceeds
        let withdrawn = engine.withdraw(OWNER).await.unwrap();
        assert_eq!(withdrawn, price(16));

        let topics: Vec<&str> = engine
            .events()
            .events()
            .iter()
            .map(MintEvent::topic)
            .collect();
        assert_eq!(topics.iter().filter(|t| **t == "minted").count(), 4);
        assert_eq!(topics.last(), Some(&"withdrawn"));
    }

    // =============================================================================
    // CONFIG FILE -> ENGINE
    // =============================================================================

    #[tokio::test]
    async fn test_rendered_config_drives_engine() {
        let rendered = default_config_toml()
            .unwrap()
            .replace("supply = 10", "supply = 2");
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(rendered.as_bytes()).unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.public_sale.supply, 2);
        assert_eq!(config.presale.supply, 6);

        let engine = deploy(config);
        engine.set_sale(OWNER, SalePhase::PublicSale).await.unwrap();
        let buyer = random_addresses(1)[0];
        assert_eq!(
            engine.mint_public(buyer, 3, engine.config().price_for(3).unwrap()).await,
            Err(MintError::ExceedsMaxSupplyPublicSale(2))
        );
    }
}
