//! Concurrent access tests.
//!
//! Each thread opens its own connection to the shared database file, so
//! these exercise the store's locking rather than any in-process state.

mod common;

use std::sync::{Arc, Barrier};
use std::thread;

use common::Station;
use quend::{Error, Identity};

const RACERS: usize = 8;

fn register_racers(station: &Station) -> Vec<Identity> {
    (0..RACERS)
        .map(|i| station.operator(&format!("EA{i}RCE"), &format!("Racer {i}")))
        .collect()
}

#[test]
fn test_only_one_racer_wins_a_channel() {
    let station = Arc::new(Station::new());
    let award = station.award("EG90IARU");
    let racers = register_racers(&station);
    let barrier = Arc::new(Barrier::new(RACERS));

    let handles: Vec<_> = racers
        .into_iter()
        .map(|identity| {
            let station = Arc::clone(&station);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut manager = station.manager();
                barrier.wait();
                manager.block(&identity, award, "20m", "CW")
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1, "exactly one block should succeed: {results:?}");
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(Error::is_conflict));

    let active = station.manager().list_active(award).unwrap();
    assert_eq!(active.len(), 1);
}

#[test]
fn test_distinct_channels_all_granted() {
    let station = Arc::new(Station::new());
    let award = station.award("EG90IARU");
    let racers = register_racers(&station);
    let bands = ["160m", "80m", "40m", "30m", "20m", "17m", "15m", "10m"];
    let barrier = Arc::new(Barrier::new(RACERS));

    let handles: Vec<_> = racers
        .into_iter()
        .zip(bands)
        .map(|(identity, band)| {
            let station = Arc::clone(&station);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut manager = station.manager();
                barrier.wait();
                manager.block(&identity, award, band, "SSB").map(|_| ())
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap().unwrap();
    }
    assert_eq!(station.manager().list_active(award).unwrap().len(), RACERS);
}

#[test]
fn test_one_operator_hopping_keeps_single_slot() {
    let station = Arc::new(Station::new());
    let award = station.award("EG90IARU");
    let hopper = station.operator("EA1HOP", "Hopper");
    let modes = ["CW", "SSB", "FT8", "FT4", "RTTY"];
    let barrier = Arc::new(Barrier::new(modes.len()));

    let handles: Vec<_> = modes
        .into_iter()
        .map(|mode| {
            let station = Arc::clone(&station);
            let barrier = Arc::clone(&barrier);
            let hopper = hopper.clone();
            thread::spawn(move || {
                let mut manager = station.manager();
                barrier.wait();
                for _ in 0..10 {
                    manager.block(&hopper, award, "20m", mode).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let held = station
        .manager()
        .operator_reservations(&hopper.callsign, Some(award))
        .unwrap();
    assert_eq!(held.len(), 1);
}

#[test]
fn test_block_and_session_end_interleave() {
    use quend::{EndReason, SessionHook};

    let station = Arc::new(Station::new());
    let award = station.award("EG90IARU");
    let aaa = station.operator("EA1AAA", "Alice");
    let session = station.manager().session_started(&aaa).unwrap();
    station.manager().block(&aaa, award, "20m", "CW").unwrap();

    let ender = {
        let station = Arc::clone(&station);
        thread::spawn(move || {
            let mut manager = station.manager();
            manager.session_ended(session, EndReason::Expired).unwrap()
        })
    };
    let duplicate = {
        let station = Arc::clone(&station);
        thread::spawn(move || {
            let mut manager = station.manager();
            manager.session_ended(session, EndReason::Expired).unwrap()
        })
    };

    let total = ender.join().unwrap() + duplicate.join().unwrap();
    assert_eq!(total, 1, "the release must happen exactly once");
}
