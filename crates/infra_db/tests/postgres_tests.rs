//! PostgreSQL adapter tests
//!
//! These start a PostgreSQL container and need Docker:
//! `cargo test -p infra_db -- --ignored`

use std::sync::Arc;

use core_kernel::{InsuredId, Page, PortError};
use domain_claims::{
    Case, ClaimsService, EntityStore, Insured, KeyedStore, NewCase, NewVehicle, NoFilter, Policy,
    PolicyFilter, PolicyPatch, UnitOfWork, Vehicle, VehicleKey,
};
use domain_import::{columns, Importer, RowMode};
use infra_db::PostgresClaimsStore;
use rust_decimal_macros::dec;
use test_utils::database::create_isolated_test_database;
use test_utils::fixtures::{CsvFixture, PolicyFixtures, SourceRowFixtures};

async fn count<E>(store: &PostgresClaimsStore) -> u64
where
    E: domain_claims::Entity,
    PostgresClaimsStore: EntityStore<E>,
{
    EntityStore::<E>::count(store, &E::Filter::default()).await.unwrap()
}

mod store_tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_policy_number_is_unique() {
        let db = create_isolated_test_database().await.unwrap();
        let store = db.store();

        EntityStore::<Policy>::insert(&*store, PolicyFixtures::ohio(521585)).await.unwrap();
        let err = EntityStore::<Policy>::insert(&*store, PolicyFixtures::ohio(521585))
            .await
            .unwrap_err();

        assert!(err.is_conflict());
        assert_eq!(count::<Policy>(&store).await, 1);
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_case_with_missing_reference_is_rejected() {
        let db = create_isolated_test_database().await.unwrap();
        let store = db.store();

        let err = EntityStore::<Case>::insert(
            &*store,
            NewCase {
                insured_id: Some(InsuredId::from(999)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, PortError::ReferenceViolation { .. }));
        assert_eq!(count::<Case>(&store).await, 0);
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_partial_update_keeps_other_fields() {
        let db = create_isolated_test_database().await.unwrap();
        let store = db.store();
        let policy = EntityStore::<Policy>::insert(&*store, PolicyFixtures::ohio(100)).await.unwrap();

        let updated = EntityStore::<Policy>::update(
            &*store,
            policy.id,
            PolicyPatch {
                annual_premium: Some(dec!(1500.00)),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(updated.annual_premium, Some(dec!(1500.00)));
        assert_eq!(updated.csl.as_deref(), Some("250/500"));
        assert_eq!(updated.policy_number, 100);
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_premium_keeps_full_precision() {
        let db = create_isolated_test_database().await.unwrap();
        let store = db.store();
        let premium = dec!(1406.9175);

        let policy = EntityStore::<Policy>::insert(
            &*store,
            domain_claims::NewPolicy {
                annual_premium: Some(premium),
                ..PolicyFixtures::ohio(101)
            },
        )
        .await
        .unwrap();
        let stored = EntityStore::<Policy>::get(&*store, policy.id).await.unwrap().unwrap();

        assert_eq!(policy.annual_premium, Some(premium));
        assert_eq!(stored.annual_premium, Some(premium));
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_vehicle_key_matches_missing_fields() {
        let db = create_isolated_test_database().await.unwrap();
        let store = db.store();
        let partial = NewVehicle {
            make: Some("Saab".to_string()),
            model: None,
            year: Some(2004),
        };
        let stored = EntityStore::<Vehicle>::insert(&*store, partial.clone()).await.unwrap();
        EntityStore::<Vehicle>::insert(&*store, PolicyFixtures::vehicle()).await.unwrap();

        let key = VehicleKey {
            make: partial.make,
            model: None,
            year: partial.year,
        };
        let found = KeyedStore::<Vehicle>::find_by_key(&*store, &key).await.unwrap();

        assert_eq!(found.map(|v| v.id), Some(stored.id));
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_rolled_back_scope_leaves_nothing() {
        let db = create_isolated_test_database().await.unwrap();
        let store = db.store();

        let scope = store.begin().await.unwrap();
        EntityStore::<Insured>::insert(&scope, PolicyFixtures::insured()).await.unwrap();
        assert_eq!(EntityStore::<Insured>::count(&scope, &NoFilter).await.unwrap(), 1);
        store.rollback(scope).await.unwrap();

        assert_eq!(count::<Insured>(&store).await, 0);
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_policy_filter_and_paging() {
        let db = create_isolated_test_database().await.unwrap();
        let store = db.store();
        for number in 1..=5 {
            let mut policy = PolicyFixtures::ohio(number);
            if number % 2 == 0 {
                policy.policy_state = Some("IN".to_string());
            }
            EntityStore::<Policy>::insert(&*store, policy).await.unwrap();
        }

        let indiana = PolicyFilter::by_state("IN");
        let listed = EntityStore::<Policy>::list(&*store, &indiana, Page::first(10)).await.unwrap();
        let numbers: Vec<i64> = listed.iter().map(|p| p.policy_number).collect();
        assert_eq!(numbers, vec![2, 4]);
        assert_eq!(EntityStore::<Policy>::count(&*store, &indiana).await.unwrap(), 2);

        let second_page = EntityStore::<Policy>::list(&*store, &PolicyFilter::default(), Page::new(2, 2))
            .await
            .unwrap();
        assert_eq!(second_page.len(), 2);
        assert_eq!(second_page[0].policy_number, 3);
    }
}

mod import_tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_csv_import_shares_records() {
        let db = create_isolated_test_database().await.unwrap();
        let store = db.store();
        let file = CsvFixture::write(&[
            SourceRowFixtures::complete(1),
            SourceRowFixtures::other_party(2),
            SourceRowFixtures::complete(3),
        ])
        .unwrap();

        let outcome = Importer::new(Arc::clone(&store)).import_csv(file.path()).await;
        let report = outcome.report().unwrap();

        assert!(report.is_clean());
        assert_eq!(report.insureds_created, 2);
        assert_eq!(report.policies_created, 3);
        assert_eq!(report.vehicles_created, 2);
        assert_eq!(count::<Insured>(&store).await, 2);
        assert_eq!(count::<Vehicle>(&store).await, 2);
        assert_eq!(count::<Case>(&store).await, 3);

        let stats = ClaimsService::new(Arc::clone(&store)).stats().await.unwrap();
        assert_eq!(stats.total_claims, 3);
        assert_eq!(stats.fraud_claims, 2);
        assert_eq!(stats.total_claim_amount, 3 * 71610);
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_atomic_row_failure_rolls_back() {
        let db = create_isolated_test_database().await.unwrap();
        let store = db.store();
        let file = CsvFixture::write(&[
            SourceRowFixtures::complete(1),
            SourceRowFixtures::bad_incident_date(2).with(columns::AUTO_MAKE, "Honda"),
            SourceRowFixtures::complete(3),
        ])
        .unwrap();

        let outcome = Importer::new(Arc::clone(&store))
            .with_mode(RowMode::Atomic)
            .import_csv(file.path())
            .await;
        let report = outcome.report().unwrap();

        assert_eq!(report.rows_processed, 2);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("Error processing row 2:"));
        assert_eq!(count::<Policy>(&store).await, 2);
        assert_eq!(count::<Vehicle>(&store).await, 1);
        assert_eq!(count::<Case>(&store).await, 2);
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_reimport_creates_no_shared_records() {
        let db = create_isolated_test_database().await.unwrap();
        let store = db.store();
        let file = CsvFixture::write(&[SourceRowFixtures::complete(1)]).unwrap();
        let importer = Importer::new(Arc::clone(&store));

        importer.import_csv(file.path()).await;
        let second = importer.import_csv(file.path()).await;
        let report = second.report().unwrap();

        assert_eq!(report.insureds_created, 0);
        assert_eq!(report.policies_created, 0);
        assert_eq!(report.vehicles_created, 0);
        assert_eq!(report.incidents_created, 1);
        assert_eq!(report.cases_created, 1);
        assert_eq!(count::<Case>(&store).await, 2);
    }
}
