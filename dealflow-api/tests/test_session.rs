//! Integration tests for navigation, selection, and the interactive surface.

use std::sync::Arc;
use std::time::Duration;

use dealflow::mock::MockStore;
use dealflow::prelude::*;

async fn loaded_session() -> Session<MockStore> {
    let mut session = Session::new(MockStore::seeded());
    let count = session.load().await;
    assert_eq!(count, 6);
    session
}

fn ids(records: &[StartupRecord]) -> Vec<&str> {
    records.iter().map(|record| record.id.as_str()).collect()
}

#[test_log::test(tokio::test)]
async fn load_failure_degrades_to_an_empty_catalog() {
    let mut session = Session::new(MockStore::seeded());
    session.catalog().store().fail_fetch(true);
    assert_eq!(session.load().await, 0);
    assert!(session.visible().is_empty());
    assert_eq!(session.active_view(), View::Dashboard);
}

#[test_log::test(tokio::test)]
async fn scope_follows_the_active_view() {
    let mut session = loaded_session().await;
    assert_eq!(session.scope(), Scope::All);
    assert_eq!(session.visible().len(), 6);

    session.navigate(View::Watchlist);
    assert_eq!(session.scope(), Scope::Watchlist);
    assert_eq!(ids(&session.visible()), ["2", "5"]);

    // other criteria still apply inside the watchlist
    session.set_sector(Some(Sector::Climate));
    assert_eq!(ids(&session.visible()), ["2"]);
}

#[test_log::test(tokio::test)]
async fn criteria_setters_shape_the_visible_list() {
    let mut session = loaded_session().await;

    session.set_query("ai");
    assert_eq!(ids(&session.visible()), ["1"]);

    session.set_query("");
    session.set_sort(SortKey::MostRaised);
    assert_eq!(ids(&session.visible()), ["4", "2", "7", "1", "3", "5"]);

    session.set_sort(SortKey::HighestValuation);
    assert_eq!(ids(&session.visible()), ["4", "2", "1", "7", "3", "5"]);
}

#[test_log::test(tokio::test)]
async fn detail_requires_a_selection() {
    let mut session = loaded_session().await;
    session.navigate(View::Detail);
    assert_eq!(session.active_view(), View::Dashboard);
    assert!(session.selected().is_none());
}

#[test_log::test(tokio::test)]
async fn select_enters_detail_and_back_returns_to_dashboard() {
    let mut session = loaded_session().await;
    session.select("1").expect("select");
    assert_eq!(session.active_view(), View::Detail);
    assert_eq!(session.selected().unwrap().name, "Nebula AI");

    session.back();
    assert_eq!(session.active_view(), View::Dashboard);
    assert!(session.selected().is_none());
}

#[test_log::test(tokio::test)]
async fn switching_views_clears_stale_selection() {
    let mut session = loaded_session().await;
    session.select("1").expect("select");

    session.navigate(View::Calendar);
    assert_eq!(session.active_view(), View::Calendar);
    assert!(session.selected().is_none());

    // the cleared selection blocks re-entry into detail
    session.navigate(View::Detail);
    assert_eq!(session.active_view(), View::Dashboard);
}

#[test_log::test(tokio::test)]
async fn select_unknown_id_is_not_found() {
    let mut session = loaded_session().await;
    let err = session.select("999").unwrap_err();
    assert!(matches!(err, DealflowError::NotFound { .. }));
    assert_eq!(session.active_view(), View::Dashboard);
    assert!(session.selected().is_none());
}

#[test_log::test(tokio::test)]
async fn detail_and_list_stay_in_sync_during_an_inflight_toggle() {
    let mut session = loaded_session().await;
    session.select("5").expect("select");
    assert!(session.selected().unwrap().bookmarked);

    let catalog = session.catalog();
    let gate = catalog.store().hold_writes().await;
    let task = tokio::spawn({
        let catalog = Arc::clone(&catalog);
        async move { catalog.toggle_bookmark("5").await }
    });
    tokio::time::sleep(Duration::from_millis(20)).await;

    // before the network call resolves, both presentations agree
    assert!(!session.selected().unwrap().bookmarked);
    let listed = catalog.records();
    let listed = listed.iter().find(|record| record.id == "5").unwrap();
    assert!(!listed.bookmarked);

    drop(gate);
    let outcome = task.await.expect("join").expect("toggle");
    assert_eq!(outcome, ToggleOutcome::Confirmed { bookmarked: false });
    assert!(!session.selected().unwrap().bookmarked);
}

#[test_log::test(tokio::test)]
async fn bookmark_toggle_moves_records_in_and_out_of_the_watchlist() {
    let mut session = loaded_session().await;
    session.navigate(View::Watchlist);
    assert_eq!(ids(&session.visible()), ["2", "5"]);

    session.toggle_bookmark("1").await.expect("toggle on");
    assert_eq!(ids(&session.visible()), ["1", "2", "5"]);

    session.toggle_bookmark("2").await.expect("toggle off");
    assert_eq!(ids(&session.visible()), ["1", "5"]);
}

#[test_log::test(tokio::test)]
async fn register_interest_raises_the_one_shot_notice() {
    let mut session = loaded_session().await;
    assert!(!session.notice().is_visible());

    session.register_interest("1").expect("register");
    assert!(session.notice().is_visible());

    session.dismiss_notice();
    assert!(!session.notice().is_visible());

    // a second trigger simply raises it again
    session.register_interest("2").expect("register");
    assert!(session.notice().is_visible());
}

#[test_log::test(tokio::test)]
async fn register_interest_on_unknown_id_is_not_found() {
    let mut session = loaded_session().await;
    let err = session.register_interest("999").unwrap_err();
    assert!(matches!(err, DealflowError::NotFound { .. }));
    assert!(!session.notice().is_visible());
}
