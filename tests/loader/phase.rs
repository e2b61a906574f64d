use std::sync::Arc;

use anime_garden::{LoadOptions, LoadPhase, ProfileLoader, ProfileSource};
use tokio::sync::Semaphore;

use crate::common::{anime_planet, healthy_relay};

#[tokio::test]
async fn starts_idle_and_records_the_outcome() {
    let relay = healthy_relay();
    let loader = ProfileLoader::new(&relay, anime_planet());
    assert_eq!(loader.phase(), LoadPhase::Idle);

    loader.load("Swmarly", LoadOptions::default()).await.unwrap();
    assert_eq!(loader.phase(), LoadPhase::Loaded(ProfileSource::Remote));
    assert!(!loader.is_loading());
}

#[tokio::test]
async fn concurrent_load_is_a_no_op() {
    let gate = Arc::new(Semaphore::new(0));
    let relay = Arc::new(healthy_relay().gated(gate.clone()));
    let loader = Arc::new(ProfileLoader::new(relay.clone(), anime_planet()));

    let first = tokio::spawn({
        let loader = loader.clone();
        async move { loader.load("Swmarly", LoadOptions::default()).await }
    });
    while !loader.is_loading() {
        tokio::task::yield_now().await;
    }

    let second = loader.load("Swmarly", LoadOptions::default()).await.unwrap();
    assert!(second.is_none(), "second request is ignored while loading");

    gate.add_permits(1);
    let snap = first.await.unwrap().unwrap().unwrap();
    assert_eq!(snap.source, ProfileSource::Remote);
    assert_eq!(relay.calls().len(), 7, "only the first load hit the relay");
    assert_eq!(loader.phase(), LoadPhase::Loaded(ProfileSource::Remote));
}

#[tokio::test]
async fn dropped_load_resets_to_idle() {
    let gate = Arc::new(Semaphore::new(0));
    let relay = healthy_relay().gated(gate);
    let loader = ProfileLoader::new(&relay, anime_planet());

    {
        let pending = loader.load("Swmarly", LoadOptions::default());
        let timed_out =
            tokio::time::timeout(std::time::Duration::from_millis(20), pending).await;
        assert!(timed_out.is_err());
    }

    assert_eq!(loader.phase(), LoadPhase::Idle);
}
