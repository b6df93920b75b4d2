//! Tests for the claims service over the in-memory store

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use core_kernel::{ClaimId, IncidentId, InsuredId, Page, PolicyId, VehicleId};

use domain_claims::{
    CasePatch, ClaimsError, ClaimsService, CoverageLevel, InMemoryClaimsStore, NewCase,
    NewClaim, NewIncident, NewInsured, NewPolicy, NewVehicle, NoFilter, PolicyFilter,
    PolicyPatch,
};

fn service() -> ClaimsService<InMemoryClaimsStore> {
    ClaimsService::new(Arc::new(InMemoryClaimsStore::new()))
}

fn policy(number: i64, state: &str, csl: &str) -> NewPolicy {
    NewPolicy {
        bind_date: NaiveDate::from_ymd_opt(2014, 10, 17),
        policy_state: Some(state.to_string()),
        csl: Some(csl.to_string()),
        deductible: Some(1000),
        annual_premium: Some(dec!(1406.91)),
        umbrella_limit: Some(0),
        ..NewPolicy::numbered(number)
    }
}

fn claim(total: i64, fraud: Option<bool>) -> NewClaim {
    NewClaim {
        total_claim_amount: Some(total),
        injury_claim: Some(total / 10),
        property_claim: Some(total / 10),
        vehicle_claim: Some(total - 2 * (total / 10)),
        fraud_reported: fraud,
    }
}

// ============================================================================
// Policy Tests
// ============================================================================

mod policy_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_policy_rejects_duplicate_number() {
        let service = service();
        service.create_policy(policy(521585, "OH", "250/500")).await.unwrap();

        let result = service.create_policy(policy(521585, "IN", "100/300")).await;

        match result {
            Err(ClaimsError::DuplicateKey { entity, field, value }) => {
                assert_eq!(entity, "Policy");
                assert_eq!(field, "policy_number");
                assert_eq!(value, "521585");
            }
            other => panic!("expected DuplicateKey, got {:?}", other),
        }
        assert_eq!(service.count_policies(&PolicyFilter::default()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_policy_keeps_unsupplied_fields() {
        let service = service();
        let created = service.create_policy(policy(342868, "IN", "250/500")).await.unwrap();

        let patch = PolicyPatch {
            deductible: Some(2000),
            ..Default::default()
        };
        let updated = service.update_policy(created.id, patch).await.unwrap().unwrap();

        assert_eq!(updated.deductible, Some(2000));
        assert_eq!(updated.annual_premium, Some(dec!(1406.91)));
        assert_eq!(updated.policy_state.as_deref(), Some("IN"));
    }

    #[tokio::test]
    async fn test_update_policy_to_taken_number_is_rejected() {
        let service = service();
        service.create_policy(policy(1, "OH", "250/500")).await.unwrap();
        let second = service.create_policy(policy(2, "OH", "250/500")).await.unwrap();

        let patch = PolicyPatch {
            policy_number: Some(1),
            ..Default::default()
        };
        let result = service.update_policy(second.id, patch).await;
        assert!(matches!(result, Err(ClaimsError::DuplicateKey { .. })));

        let unchanged = service.get_policy(second.id).await.unwrap().unwrap();
        assert_eq!(unchanged.policy_number, 2);
    }

    #[tokio::test]
    async fn test_update_policy_to_own_number_is_allowed() {
        let service = service();
        let created = service.create_policy(policy(7, "OH", "250/500")).await.unwrap();

        let patch = PolicyPatch {
            policy_number: Some(7),
            policy_state: Some("IL".to_string()),
            ..Default::default()
        };
        let updated = service.update_policy(created.id, patch).await.unwrap().unwrap();
        assert_eq!(updated.policy_state.as_deref(), Some("IL"));
    }

    #[tokio::test]
    async fn test_update_missing_policy_is_none() {
        let service = service();
        let result = service
            .update_policy(PolicyId::new(42), PolicyPatch::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_list_policies_filters_by_state() {
        let service = service();
        service.create_policy(policy(1, "OH", "250/500")).await.unwrap();
        service.create_policy(policy(2, "IN", "250/500")).await.unwrap();
        service.create_policy(policy(3, "OH", "250/500")).await.unwrap();

        let filter = PolicyFilter::by_state("OH");
        let listed = service.list_policies(&filter, Page::first(10)).await.unwrap();
        let numbers: Vec<_> = listed.iter().map(|p| p.policy_number).collect();

        assert_eq!(numbers, vec![1, 3]);
        assert_eq!(service.count_policies(&filter).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_coverage_level_lookup() {
        let service = service();
        let high = service.create_policy(policy(1, "OH", "500/1000")).await.unwrap();
        let medium = service.create_policy(policy(2, "OH", "250/500")).await.unwrap();
        let low = service.create_policy(policy(3, "OH", "100/300")).await.unwrap();
        let unknown = service.create_policy(policy(4, "OH", "unlimited")).await.unwrap();

        assert_eq!(service.coverage_level(high.id).await.unwrap(), Some(CoverageLevel::High));
        assert_eq!(service.coverage_level(medium.id).await.unwrap(), Some(CoverageLevel::Medium));
        assert_eq!(service.coverage_level(low.id).await.unwrap(), Some(CoverageLevel::Low));
        assert_eq!(service.coverage_level(unknown.id).await.unwrap(), Some(CoverageLevel::Unknown));
        assert_eq!(service.coverage_level(PolicyId::new(99)).await.unwrap(), None);
    }
}

// ============================================================================
// Case Tests
// ============================================================================

mod case_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_case_with_missing_reference_writes_nothing() {
        let service = service();
        let insured = service.create_insured(NewInsured::default()).await.unwrap();

        let result = service
            .create_case(NewCase {
                insured_id: Some(insured.id),
                vehicle_id: Some(VehicleId::new(12)),
                ..Default::default()
            })
            .await;

        match result {
            Err(ClaimsError::ReferenceNotFound { entity, id }) => {
                assert_eq!(entity, "Vehicle");
                assert_eq!(id, VehicleId::new(12).to_string());
            }
            other => panic!("expected ReferenceNotFound, got {:?}", other),
        }
        assert_eq!(service.count_cases(&NoFilter).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_case_without_references() {
        let service = service();
        let case = service.create_case(NewCase::default()).await.unwrap();

        let detail = service.get_case_detail(case.id).await.unwrap().unwrap();
        assert_eq!(detail.case, case);
        assert!(detail.insured.is_none());
        assert!(detail.claim.is_none());
    }

    #[tokio::test]
    async fn test_case_detail_resolves_every_reference() {
        let service = service();
        let insured = service
            .create_insured(NewInsured {
                age: Some(48),
                sex: Some("MALE".to_string()),
                capital_gains: Some(53300),
                ..Default::default()
            })
            .await
            .unwrap();
        let policy = service.create_policy(policy(521585, "OH", "250/500")).await.unwrap();
        let vehicle = service
            .create_vehicle(NewVehicle {
                make: Some("Saab".to_string()),
                model: Some("92x".to_string()),
                year: Some(2004),
            })
            .await
            .unwrap();
        let incident = service
            .create_incident(NewIncident {
                date: NaiveDate::from_ymd_opt(2015, 1, 25),
                incident_type: Some("Single Vehicle Collision".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        let claim = service.create_claim(claim(71610, Some(true))).await.unwrap();

        let case = service
            .create_case(NewCase {
                insured_id: Some(insured.id),
                policy_id: Some(policy.id),
                vehicle_id: Some(vehicle.id),
                incident_id: Some(incident.id),
                claim_id: Some(claim.id),
            })
            .await
            .unwrap();

        let detail = service.get_case_detail(case.id).await.unwrap().unwrap();
        assert_eq!(detail.insured, Some(insured));
        assert_eq!(detail.policy, Some(policy));
        assert_eq!(detail.vehicle, Some(vehicle));
        assert_eq!(detail.incident, Some(incident));
        assert_eq!(detail.claim, Some(claim));
    }

    #[tokio::test]
    async fn test_update_case_checks_supplied_references() {
        let service = service();
        let case = service.create_case(NewCase::default()).await.unwrap();

        let result = service
            .update_case(
                case.id,
                CasePatch {
                    incident_id: Some(IncidentId::new(3)),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(ClaimsError::ReferenceNotFound { entity: "Incident", .. })));

        let stored = service.get_case(case.id).await.unwrap().unwrap();
        assert!(stored.incident_id.is_none());
    }

    #[tokio::test]
    async fn test_update_case_sets_reference() {
        let service = service();
        let case = service.create_case(NewCase::default()).await.unwrap();
        let claim = service.create_claim(claim(1000, None)).await.unwrap();

        let updated = service
            .update_case(
                case.id,
                CasePatch {
                    claim_id: Some(claim.id),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.claim_id, Some(claim.id));
    }
}

// ============================================================================
// Lookup and Statistics Tests
// ============================================================================

mod lookup_tests {
    use super::*;

    #[tokio::test]
    async fn test_fraud_check() {
        let service = service();
        let flagged = service.create_claim(claim(5000, Some(true))).await.unwrap();
        let unset = service.create_claim(claim(5000, None)).await.unwrap();

        assert_eq!(service.fraud_check(flagged.id).await.unwrap(), Some(true));
        assert_eq!(service.fraud_check(unset.id).await.unwrap(), Some(false));
        assert_eq!(service.fraud_check(ClaimId::new(77)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_financial_score() {
        let service = service();
        let insured = service
            .create_insured(NewInsured {
                capital_gains: Some(35100),
                capital_loss: Some(-62400),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(service.financial_score(insured.id).await.unwrap(), Some(97500));
        assert_eq!(service.financial_score(InsuredId::new(5)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_stats_totals() {
        let service = service();
        service.create_insured(NewInsured::default()).await.unwrap();
        service.create_policy(policy(1, "OH", "250/500")).await.unwrap();
        service.create_claim(claim(71610, Some(true))).await.unwrap();
        service.create_claim(claim(5070, Some(false))).await.unwrap();
        service
            .create_claim(NewClaim {
                total_claim_amount: None,
                fraud_reported: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();
        service.create_case(NewCase::default()).await.unwrap();

        let stats = service.stats().await.unwrap();

        assert_eq!(stats.total_insureds, 1);
        assert_eq!(stats.total_policies, 1);
        assert_eq!(stats.total_vehicles, 0);
        assert_eq!(stats.total_incidents, 0);
        assert_eq!(stats.total_claims, 3);
        assert_eq!(stats.total_cases, 1);
        assert_eq!(stats.fraud_claims, 2);
        assert_eq!(stats.total_claim_amount, 76680);
    }

    #[tokio::test]
    async fn test_stats_total_exceeding_i64() {
        let service = service();
        for _ in 0..2 {
            service
                .create_claim(NewClaim {
                    total_claim_amount: Some(i64::MAX),
                    ..Default::default()
                })
                .await
                .unwrap();
        }

        let stats = service.stats().await.unwrap();
        assert_eq!(stats.total_claims, 2);
        assert_eq!(stats.total_claim_amount, 2 * i128::from(i64::MAX));
    }

    #[tokio::test]
    async fn test_stats_scan_crosses_page_boundary() {
        let service = service();
        for _ in 0..501 {
            service.create_claim(claim(10, Some(true))).await.unwrap();
        }

        let stats = service.stats().await.unwrap();
        assert_eq!(stats.total_claims, 501);
        assert_eq!(stats.fraud_claims, 501);
        assert_eq!(stats.total_claim_amount, 5010);
    }

    #[tokio::test]
    async fn test_generic_list_is_in_insertion_order() {
        let service = service();
        for year in [2011, 2003, 2007] {
            service
                .create_vehicle(NewVehicle {
                    make: Some("Honda".to_string()),
                    model: Some("Civic".to_string()),
                    year: Some(year),
                })
                .await
                .unwrap();
        }

        let listed = service
            .list::<domain_claims::Vehicle>(&NoFilter, Page::first(10))
            .await
            .unwrap();
        let years: Vec<_> = listed.iter().map(|v| v.year).collect();
        assert_eq!(years, vec![Some(2011), Some(2003), Some(2007)]);
    }
}
