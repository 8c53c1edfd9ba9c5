//! Integration specifications for subscription gating and credit spending
//! through the public entitlement service and HTTP router.

mod common {
    use std::collections::{HashMap, HashSet};
    use std::sync::{Arc, Mutex};

    use lessen::entitlements::{
        EntitlementResolver, EntitlementService, StoreError, SubscriptionStatus,
        SubscriptionStore, UserSubscription,
    };
    use lessen::identity::{IdentityProvider, RequestContext, UserId};

    #[derive(Default)]
    pub(super) struct MemoryStore {
        records: Mutex<HashMap<UserId, UserSubscription>>,
    }

    impl SubscriptionStore for MemoryStore {
        fn load(&self, user_id: &UserId) -> Result<Option<UserSubscription>, StoreError> {
            Ok(self
                .records
                .lock()
                .expect("store mutex poisoned")
                .get(user_id)
                .cloned())
        }

        fn save(&self, user_id: &UserId, subscription: UserSubscription) -> Result<(), StoreError> {
            self.records
                .lock()
                .expect("store mutex poisoned")
                .insert(user_id.clone(), subscription);
            Ok(())
        }
    }

    pub(super) struct StaticIdentity {
        admins: HashSet<String>,
    }

    impl StaticIdentity {
        pub(super) fn with_admins(admins: &[&str]) -> Self {
            Self {
                admins: admins.iter().map(|name| name.to_string()).collect(),
            }
        }
    }

    impl IdentityProvider for StaticIdentity {
        fn context_for(&self, user_id: &UserId) -> RequestContext {
            if self.admins.contains(&user_id.0) {
                RequestContext::admin(user_id.clone())
            } else {
                RequestContext::member(user_id.clone())
            }
        }
    }

    pub(super) fn premium_subscription(credits: u32) -> UserSubscription {
        UserSubscription {
            plan_id: "premium".to_string(),
            status: SubscriptionStatus::Active,
            credits_remaining: credits,
            credits_used: 0,
        }
    }

    pub(super) fn build_service(
        admins: &[&str],
    ) -> (
        EntitlementService<MemoryStore, StaticIdentity>,
        Arc<MemoryStore>,
    ) {
        let store = Arc::new(MemoryStore::default());
        let identity = Arc::new(StaticIdentity::with_admins(admins));
        let service =
            EntitlementService::new(store.clone(), identity, EntitlementResolver::default());
        (service, store)
    }
}

mod gating {
    use super::common::*;
    use lessen::entitlements::{ContentType, Feature, SubscriptionStore};
    use lessen::identity::UserId;

    #[test]
    fn free_members_hit_plan_limits() {
        let (service, _) = build_service(&[]);
        let member = UserId::new("ava");

        assert!(!service
            .has_feature(&member, Feature::AiDesigner)
            .expect("store reachable"));
        assert!(service
            .may_add(&member, ContentType::Tasks, 9)
            .expect("store reachable"));
        assert!(!service
            .may_add(&member, ContentType::Tasks, 10)
            .expect("store reachable"));
    }

    #[test]
    fn admins_bypass_every_plan_limit() {
        let (service, store) = build_service(&["root"]);
        let admin = UserId::new("root");
        store
            .save(&admin, super::common::premium_subscription(0))
            .expect("seed");

        assert!(service
            .has_feature(&admin, Feature::AiDesigner)
            .expect("store reachable"));
        assert!(service
            .may_add(&admin, ContentType::RoomTransforms, 10_000)
            .expect("store reachable"));

        let summary = service.summary(&admin).expect("summary");
        assert!(summary.admin_override);
        assert_eq!(summary.task_limit, None);
    }

    #[test]
    fn paying_members_resolve_their_plan() {
        let (service, store) = build_service(&[]);
        let member = UserId::new("ben");
        store
            .save(&member, premium_subscription(5))
            .expect("seed");

        assert!(service
            .has_feature(&member, Feature::AiDesigner)
            .expect("store reachable"));
        let summary = service.summary(&member).expect("summary");
        assert_eq!(summary.plan_id, "premium");
        assert_eq!(summary.article_limit, None);
        assert_eq!(summary.room_transform_limit, Some(5));
    }
}

mod credits {
    use super::common::*;
    use lessen::entitlements::SubscriptionStore;
    use lessen::identity::UserId;

    #[test]
    fn credits_are_conserved_until_exhausted_then_rejected() {
        let (service, store) = build_service(&[]);
        let member = UserId::new("ava");
        store.save(&member, premium_subscription(3)).expect("seed");

        for expected_used in 1..=3 {
            let outcome = service.use_credit(&member).expect("debit runs");
            assert!(outcome.accepted);
            assert_eq!(outcome.subscription.credits_used, expected_used);
            assert_eq!(
                outcome.subscription.credits_remaining + outcome.subscription.credits_used,
                3
            );
        }

        let rejected = service.use_credit(&member).expect("debit runs");
        assert!(!rejected.accepted);
        assert_eq!(rejected.subscription.credits_remaining, 0);
        assert_eq!(rejected.subscription.credits_used, 3);
    }

    #[test]
    fn admin_debits_never_spend_credits() {
        let (service, store) = build_service(&["root"]);
        let admin = UserId::new("root");
        store.save(&admin, premium_subscription(2)).expect("seed");

        for _ in 0..5 {
            let outcome = service.use_credit(&admin).expect("debit runs");
            assert!(outcome.accepted);
        }

        let stored = store
            .load(&admin)
            .expect("store reachable")
            .expect("record exists");
        assert_eq!(stored.credits_remaining, 2);
        assert_eq!(stored.credits_used, 0);
    }
}

mod routing {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use lessen::entitlements::{entitlement_router, SubscriptionStore};
    use lessen::identity::UserId;
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn read_json_body(response: axum::response::Response) -> Value {
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn summary_endpoint_reports_the_resolved_plan() {
        let (service, store) = build_service(&[]);
        store
            .save(&UserId::new("ava"), premium_subscription(4))
            .expect("seed");
        let router = entitlement_router(Arc::new(service));

        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/v1/users/ava/entitlements")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["plan_id"].as_str(), Some("premium"));
        assert_eq!(payload["ai_designer"].as_bool(), Some(true));
        assert_eq!(payload["credits_remaining"].as_u64(), Some(4));
    }

    #[tokio::test]
    async fn exhausted_credits_surface_as_an_upgrade_prompt() {
        let (service, _) = build_service(&[]);
        let router = entitlement_router(Arc::new(service));

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/users/ava/entitlements/credits")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
        let payload = read_json_body(response).await;
        assert_eq!(payload["accepted"].as_bool(), Some(false));
        assert!(payload["upgrade_hint"].as_str().is_some());
    }

    #[tokio::test]
    async fn unknown_feature_names_are_not_found() {
        let (service, _) = build_service(&[]);
        let router = entitlement_router(Arc::new(service));

        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/v1/users/ava/entitlements/features/teleporter")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn content_quota_endpoint_answers_with_counts() {
        let (service, _) = build_service(&[]);
        let router = entitlement_router(Arc::new(service));

        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/v1/users/ava/entitlements/content/articles?current=5")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["allowed"].as_bool(), Some(false));
        assert_eq!(payload["current"].as_u64(), Some(5));
    }
}
