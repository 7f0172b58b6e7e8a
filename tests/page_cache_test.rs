mod common;

use community_aid_backend::cache::keys;
use community_aid_backend::coordinators::{BeneficiaryCoordinator, ReportCoordinator, RequestCoordinator};
use community_aid_backend::types::internal::{BeneficiaryForm, RequestForm};

use common::{setup_app_data, signed_in_context};

fn form(full_name: &str) -> BeneficiaryForm {
    BeneficiaryForm::parse(full_name, None, None, None).unwrap()
}

#[tokio::test]
async fn test_list_is_served_from_cache_until_a_mutation() {
    let app_data = setup_app_data().await;
    let coordinator = BeneficiaryCoordinator::new(app_data.clone());
    let ctx = signed_in_context();

    coordinator.create(&ctx, form("Ana García")).await.unwrap();
    assert_eq!(coordinator.list(&ctx).await.unwrap().total, 1);
    assert!(app_data.page_cache.contains(keys::BENEFICIARY_LIST));

    // Written behind the coordinator's back: the cached page does not see it
    app_data.beneficiary_store.create(form("Luis Pérez")).await.unwrap();
    assert_eq!(coordinator.list(&ctx).await.unwrap().total, 1);

    coordinator.create(&ctx, form("Rosa Díaz")).await.unwrap();
    assert_eq!(coordinator.list(&ctx).await.unwrap().total, 3);
}

#[tokio::test]
async fn test_request_mutations_refresh_dashboard_and_reports() {
    let app_data = setup_app_data().await;
    let beneficiaries = BeneficiaryCoordinator::new(app_data.clone());
    let requests = RequestCoordinator::new(app_data.clone());
    let reports = ReportCoordinator::new(app_data.clone());
    let ctx = signed_in_context();

    let ana = beneficiaries.create(&ctx, form("Ana García")).await.unwrap().id.unwrap();
    assert_eq!(reports.dashboard(&ctx).await.unwrap().total_requests, 0);
    assert_eq!(
        reports.report(&ctx, Default::default()).await.unwrap().total_requests,
        0
    );

    requests
        .create(&ctx, RequestForm::parse(&ana, "Silla de ruedas", None).unwrap())
        .await
        .unwrap();

    assert_eq!(reports.dashboard(&ctx).await.unwrap().total_requests, 1);
    assert_eq!(
        reports.report(&ctx, Default::default()).await.unwrap().total_requests,
        1
    );
}

#[tokio::test]
async fn test_cache_counts_hits_and_misses() {
    let app_data = setup_app_data().await;
    let coordinator = BeneficiaryCoordinator::new(app_data.clone());
    let ctx = signed_in_context();

    coordinator.list(&ctx).await.unwrap();
    coordinator.list(&ctx).await.unwrap();
    coordinator.list(&ctx).await.unwrap();

    let stats = app_data.page_cache.stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 2);
}
