//! End-to-end tests of the runtime with paused tokio time.
//!
//! The default 100 BPM gives a 600 ms beat; the match is anchored at t = 0.

use std::time::Duration;

use symphony_core::{
    Beat, Element, Formation, Grade, Lane, MatchPhase, MatchResult, Multiplier, SkillError,
    Timestamp, Unit, UnitId, UnitStats,
};
use symphony_runtime::{
    Event, EventBus, MatchEvent, Runtime, RuntimeError, SkillOutcome, Topic,
};

fn unit(id: u32, name: &str, element: Element, atk: u32, hp: u32, interval: u32) -> Unit {
    Unit::new(UnitId(id), name, element, UnitStats::new(atk, hp, interval)).unwrap()
}

fn single(unit: Unit) -> Formation {
    Formation::empty().with_unit(Lane::new(0).unwrap(), unit)
}

async fn duel(player: Unit, enemy: Unit) -> Runtime {
    Runtime::builder()
        .player(single(player))
        .enemy(single(enemy))
        .build()
        .await
        .unwrap()
}

fn sturdy_enemy() -> Unit {
    unit(2, "Tuba", Element::Brass, 1, 10_000, 4)
}

#[tokio::test(start_paused = true)]
async fn beats_fire_once_per_period() {
    let runtime = duel(unit(1, "Cello", Element::Strings, 1, 10_000, 4), sturdy_enemy()).await;
    let mut beats = runtime.subscribe(Topic::Beat);

    for n in 1..=3u64 {
        let Event::Beat(beat) = beats.recv().await.unwrap() else {
            panic!("beat topic carried a non-beat event");
        };
        assert_eq!(beat.beat, Beat(n));
        assert_eq!(beat.at, Timestamp(n * 600));
        assert_eq!(beat.player_alive, 1);
    }

    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn trumpet_defeats_flute_on_fourth_beat() {
    let bus = EventBus::new();
    let mut lifecycle = bus.subscribe(Topic::Match);
    let runtime = Runtime::builder()
        .player(single(unit(1, "Trumpet", Element::Brass, 20, 100, 2)))
        .enemy(single(unit(2, "Flute", Element::Woodwind, 15, 30, 2)))
        .event_bus(bus)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    assert_eq!(runtime.wait_for_result().await.unwrap(), Some(MatchResult::Win));
    assert_eq!(handle.phase(), MatchPhase::Finished(MatchResult::Win));

    assert!(matches!(
        lifecycle.recv().await.unwrap(),
        Event::Match(MatchEvent::Started { stage: 0, at: Timestamp(0) })
    ));
    assert_eq!(
        lifecycle.recv().await.unwrap(),
        Event::Match(MatchEvent::Finished {
            result: MatchResult::Win,
            beat: Beat(4),
        })
    );

    // The clock stops once the match is over.
    tokio::time::sleep(Duration::from_secs(5)).await;
    let state = handle.query_state().await.unwrap();
    assert_eq!(state.beat(), Beat(4));
    assert_eq!(state.log.latest(), Some("WIN! Trumpet (-23)"));

    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn perfect_tap_boosts_skill() {
    let runtime = duel(unit(1, "Trumpet", Element::Brass, 20, 100, 4), sturdy_enemy()).await;
    let handle = runtime.handle();
    let mut rhythm = runtime.subscribe(Topic::Rhythm);

    let judgement = handle.tap_at(Timestamp(610)).await.unwrap().unwrap();
    assert_eq!(judgement.grade, Grade::Perfect);
    assert_eq!(judgement.offset_ms, 10);

    let Event::Rhythm(event) = rhythm.recv().await.unwrap() else {
        panic!("rhythm topic carried a non-rhythm event");
    };
    assert_eq!(event.combo, 1);

    let SkillOutcome::Cast(report) = handle.cast_skill(0).await.unwrap() else {
        panic!("ready skill was not cast");
    };
    assert_eq!(report.bonus, Multiplier::STRONG);
    // floor(20 * 3.0 * 1.5)
    assert_eq!(report.strike.unwrap().damage, 90);

    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn rejected_skills_are_reported() {
    let runtime = duel(unit(1, "Trumpet", Element::Brass, 20, 100, 4), sturdy_enemy()).await;
    let handle = runtime.handle();

    assert!(handle.cast_skill(0).await.unwrap().is_cast());
    assert!(matches!(
        handle.cast_skill(0).await.unwrap(),
        SkillOutcome::Ignored(SkillError::OnCooldown { remaining: 8, .. })
    ));
    assert!(matches!(
        handle.cast_skill(3).await.unwrap(),
        SkillOutcome::Ignored(SkillError::EmptyLane { .. })
    ));
    assert!(matches!(
        handle.cast_skill(7).await,
        Err(RuntimeError::InvalidLane(_))
    ));

    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn abandoned_match_has_no_result() {
    let runtime = duel(unit(1, "Cello", Element::Strings, 1, 10_000, 4), sturdy_enemy()).await;
    let handle = runtime.handle();

    assert!(handle.abandon().await.unwrap());
    assert!(!handle.abandon().await.unwrap());
    assert_eq!(handle.wait_for_result().await.unwrap(), None);
    assert_eq!(handle.phase(), MatchPhase::Abandoned);
    assert_eq!(handle.tap().await.unwrap(), None);

    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn shutdown_closes_the_handle() {
    let runtime = duel(unit(1, "Cello", Element::Strings, 1, 10_000, 4), sturdy_enemy()).await;
    let handle = runtime.handle();

    runtime.shutdown().await.unwrap();

    assert!(matches!(
        handle.tap().await,
        Err(RuntimeError::CommandChannelClosed)
    ));
    assert!(matches!(
        handle.wait_for_result().await,
        Err(RuntimeError::WorkerStopped)
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn started_reaches_subscribers_of_an_injected_bus() {
    let bus = EventBus::new();
    let mut lifecycle = bus.subscribe(Topic::Match);

    let runtime = Runtime::builder()
        .player(single(unit(1, "Cello", Element::Strings, 1, 10_000, 4)))
        .enemy(single(sturdy_enemy()))
        .stage(3)
        .event_bus(bus)
        .build()
        .await
        .unwrap();

    // Published before build returned, so it is already queued.
    assert!(matches!(
        lifecycle.try_recv().unwrap(),
        Event::Match(MatchEvent::Started { stage: 3, .. })
    ));

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn build_requires_both_formations() {
    let result = Runtime::builder()
        .player(single(sturdy_enemy()))
        .build()
        .await;
    assert!(matches!(
        result,
        Err(RuntimeError::MissingFormation { side: symphony_core::Side::Enemy })
    ));
}
