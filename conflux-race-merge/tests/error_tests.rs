// Copyright 2026 The Conflux Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use conflux_race_merge::RaceMergeExt;
use conflux_test_utils::{collect_values, ReleaseProbe, ScriptedSource, Step};
use futures::StreamExt;

fn failing_source(message: &str) -> ScriptedSource<i32> {
    ScriptedSource::new([Step::Fail(message.to_string())])
}

#[tokio::test]
async fn simultaneous_synchronous_failures_surface_the_lowest_slot() {
    // Arrange - both sources fail on the first poll of the same round
    let (first, first_releases) = ReleaseProbe::wrap(failing_source("first boom"));
    let (second, second_releases) = ReleaseProbe::wrap(failing_source("second boom"));

    // Act
    let error = collect_values(vec![first, second].race_merge())
        .await
        .unwrap_err();

    // Assert - slot 0 wins the tie; both slots still get released
    assert_eq!(error.to_string(), "Source error: first boom");
    assert_eq!(first_releases.count(), 1);
    assert_eq!(second_releases.count(), 1);
}

#[tokio::test]
async fn simultaneous_suspending_failures_surface_the_lowest_slot() {
    // Arrange - both sources suspend once, then fail in the same round
    let (first, first_releases) = ReleaseProbe::wrap(ScriptedSource::<i32>::new([
        Step::Suspend,
        Step::Fail("first boom".into()),
    ]));
    let (second, second_releases) = ReleaseProbe::wrap(ScriptedSource::new([
        Step::Suspend,
        Step::Fail("second boom".into()),
    ]));

    // Act
    let error = collect_values(vec![first, second].race_merge())
        .await
        .unwrap_err();

    // Assert - both failures arrive after resuming; slot 0 wins the tie and
    // both slots still get released
    assert_eq!(error.to_string(), "Source error: first boom");
    assert_eq!(first_releases.count(), 1);
    assert_eq!(second_releases.count(), 1);
}

#[tokio::test]
async fn synchronous_failure_beats_a_suspending_one() {
    // Arrange - slot 0 fails after a suspension, slot 1 fails immediately
    let (first, first_releases) =
        ReleaseProbe::wrap(ScriptedSource::new([Step::Suspend, Step::Fail("late".into())]));
    let (second, second_releases) = ReleaseProbe::wrap(failing_source("early"));

    // Act
    let error = collect_values(vec![first, second].race_merge())
        .await
        .unwrap_err();

    // Assert - the immediately-available failure wins despite the higher slot
    assert_eq!(error.to_string(), "Source error: early");
    assert_eq!(first_releases.count(), 1);
    assert_eq!(second_releases.count(), 1);
}

#[tokio::test]
async fn values_already_won_are_delivered_before_the_failure() {
    // Arrange
    let sources = vec![
        ScriptedSource::new([Step::Value(1), Step::Fail("boom".into())]),
        ScriptedSource::async_values([9]),
    ];
    let mut merged = sources.race_merge();

    // Act & Assert
    assert_eq!(merged.next().await.unwrap().unwrap(), 1);

    let emission = merged.next().await.unwrap();
    assert_eq!(emission.err().unwrap().to_string(), "Source error: boom");

    // The error terminates the stream
    assert!(merged.next().await.is_none());
}

#[tokio::test]
async fn failure_is_surfaced_after_cleanup_completes() {
    // Arrange - the healthy source's release must run even though its
    // sibling is the one that failed
    let (healthy, healthy_releases) =
        ReleaseProbe::wrap(ScriptedSource::async_values([10, 11, 12]));
    let (faulty, faulty_releases) = ReleaseProbe::wrap(failing_source("boom"));

    // Act
    let error = collect_values(vec![healthy, faulty].race_merge())
        .await
        .unwrap_err();

    // Assert
    assert!(error.is_source_error());
    assert_eq!(healthy_releases.count(), 1);
    assert_eq!(faulty_releases.count(), 1);
}

#[tokio::test]
async fn release_failure_does_not_mask_the_primary_failure() {
    // Arrange
    let (faulty, faulty_releases) = ReleaseProbe::wrap(failing_source("primary"));
    let faulty = faulty.failing();
    let (healthy, healthy_releases) = ReleaseProbe::wrap(ScriptedSource::sync_values([1, 2]));

    // Act
    let error = collect_values(vec![faulty, healthy].race_merge())
        .await
        .unwrap_err();

    // Assert
    assert_eq!(error.to_string(), "Source error: primary");
    assert!(error.is_source_error());
    assert_eq!(faulty_releases.count(), 1);
    assert_eq!(healthy_releases.count(), 1);
}
