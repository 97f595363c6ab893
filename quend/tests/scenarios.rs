//! End-to-end reservation scenarios against a real database file.

mod common;

use common::Station;
use quend::{EndReason, Error, SessionHook};

#[test]
fn test_conflict_then_handover() {
    let station = Station::new();
    let award = station.award("EG90IARU");
    let aaa = station.operator("EA1AAA", "Alice");
    let bbb = station.operator("EA1BBB", "Bob");
    let mut manager = station.manager();

    manager.block(&aaa, award, "20m", "CW").unwrap();

    match manager.block(&bbb, award, "20m", "CW") {
        Err(Error::Conflict { holder, .. }) => assert_eq!(holder.callsign, aaa.callsign),
        other => panic!("expected conflict, got {other:?}"),
    }

    let moved = manager.block(&aaa, award, "40m", "SSB").unwrap();
    assert_eq!(moved.superseded.unwrap().to_string(), "20m/CW");

    let taken = manager.block(&bbb, award, "20m", "CW").unwrap();
    assert_eq!(taken.reservation.operator(), &bbb.callsign);

    let active: Vec<String> = manager
        .list_active(award)
        .unwrap()
        .iter()
        .map(|r| format!("{} {}", r.operator(), r.channel()))
        .collect();
    assert_eq!(active, ["EA1BBB 20m/CW", "EA1AAA 40m/SSB"]);
}

#[test]
fn test_session_end_clears_listing() {
    let station = Station::new();
    let award = station.award("EG90IARU");
    let aaa = station.operator("EA1AAA", "Alice");
    let mut manager = station.manager();

    let session = manager.session_started(&aaa).unwrap();
    manager.block(&aaa, award, "20m", "CW").unwrap();

    // The hook may run on a different connection from the one that blocked
    let mut auth_side = station.manager();
    assert_eq!(auth_side.session_ended(session, EndReason::Logout).unwrap(), 1);

    assert!(manager
        .list_active(award)
        .unwrap()
        .iter()
        .all(|r| r.operator() != &aaa.callsign));
}

#[test]
fn test_inactive_award_rejects_block() {
    let station = Station::new();
    let award = station.award("EG90IARU");
    let aaa = station.operator("EA1AAA", "Alice");
    let mut manager = station.manager();
    manager.set_award_active(&station.admin, award, false).unwrap();

    assert!(matches!(
        manager.block(&aaa, award, "20m", "CW"),
        Err(Error::AwardInactive { .. })
    ));
    assert!(manager.list_active(award).unwrap().is_empty());
}

#[test]
fn test_admin_override_frees_channel_for_others() {
    let station = Station::new();
    let award = station.award("EG90IARU");
    let aaa = station.operator("EA1AAA", "Alice");
    let bbb = station.operator("EA1BBB", "Bob");
    let mut manager = station.manager();

    manager.block(&aaa, award, "15m", "FT8").unwrap();
    assert!(matches!(
        manager.force_release(&bbb, award, "15m", "FT8"),
        Err(Error::Unauthorized { .. })
    ));
    assert!(manager
        .force_release(&station.admin, award, "15m", "FT8")
        .unwrap());
    manager.block(&bbb, award, "15m", "FT8").unwrap();
}

#[test]
fn test_awards_are_independent() {
    let station = Station::new();
    let first = station.award("EG90IARU");
    let second = station.award("AM70ABC");
    let aaa = station.operator("EA1AAA", "Alice");
    let bbb = station.operator("EA1BBB", "Bob");
    let mut manager = station.manager();

    manager.block(&aaa, first, "20m", "CW").unwrap();
    manager.block(&bbb, second, "20m", "CW").unwrap();
    manager.block(&aaa, second, "40m", "CW").unwrap();

    assert_eq!(manager.list_active(first).unwrap().len(), 1);
    assert_eq!(manager.list_active(second).unwrap().len(), 2);
    assert_eq!(
        manager
            .operator_reservations(&aaa.callsign, None)
            .unwrap()
            .len(),
        2
    );
}

#[test]
fn test_reservations_survive_reopen() {
    let station = Station::new();
    let award = station.award("EG90IARU");
    let aaa = station.operator("EA1AAA", "Alice");

    station.manager().block(&aaa, award, "6m", "SSB").unwrap();

    let mut reopened = station.manager();
    let active = reopened.list_active(award).unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].channel().to_string(), "6m/SSB");
}
