use handsign_pose_model::landmark::{idx, HandRole, Landmark, PoseSnapshot, LANDMARK_COUNT};
use handsign_pose_model::signal::{Letter, Signal};
use handsign_recognizer::classifier::{is_a, is_b, is_rock, FALLBACK, LETTER_PRIORITY};
use handsign_recognizer::geometry::{is_palm_away, is_thumb_extended};
use handsign_recognizer::resolver::{resolve_snapshot, ResolveMode};
use handsign_recognizer::testing::HandBuilder;
use proptest::prelude::*;

/// Coordinates on a 1/1000 grid so that mirroring (`1 - x`) never collapses
/// two distinct values into one.
fn coord() -> impl Strategy<Value = f64> {
    (0u32..=1000).prop_map(|v| v as f64 / 1000.0)
}

fn any_snapshot() -> impl Strategy<Value = PoseSnapshot> {
    prop::collection::vec((coord(), coord()), LANDMARK_COUNT).prop_map(|points| {
        let landmarks: Vec<Landmark> = points
            .into_iter()
            .map(|(x, y)| Landmark::new(x, y, 0.0))
            .collect();
        PoseSnapshot::from_slice(&landmarks).expect("21 generated points")
    })
}

fn any_builder() -> impl Strategy<Value = HandBuilder> {
    (any::<[bool; 4]>(), any::<bool>(), -200i32..=200).prop_map(|(fingers, thumb, dx)| {
        HandBuilder::new()
            .fingers(fingers)
            .thumb(thumb)
            .shifted(dx as f64 / 1000.0)
    })
}

fn any_role() -> impl Strategy<Value = HandRole> {
    prop_oneof![Just(HandRole::Left), Just(HandRole::Right)]
}

proptest! {
    #[test]
    fn fist_and_open_hand_never_overlap(s in any_snapshot(), role in any_role()) {
        prop_assert!(!(is_a(&s, role) && is_b(&s, role)));
    }

    #[test]
    fn resolution_takes_first_match_in_priority_order(s in any_snapshot(), role in any_role()) {
        let expected = if is_rock(&s, role) {
            Signal::Rock
        } else {
            LETTER_PRIORITY
                .iter()
                .chain(std::iter::once(&FALLBACK))
                .find(|c| c.matches(&s, role))
                .map(|c| Signal::Letter(c.letter))
                .unwrap_or(Signal::None)
        };
        prop_assert_eq!(resolve_snapshot(&s, role, ResolveMode::Full), expected);
    }

    #[test]
    fn rock_never_matches_a_letter(s in any_snapshot(), role in any_role()) {
        if is_rock(&s, role) {
            for classifier in LETTER_PRIORITY.iter().chain(std::iter::once(&FALLBACK)) {
                prop_assert!(!classifier.matches(&s, role), "rock also matched {}", classifier.letter);
            }
        }
    }

    #[test]
    fn thumb_reading_survives_mirroring(s in any_snapshot()) {
        prop_assert_eq!(
            is_thumb_extended(&s, HandRole::Right),
            is_thumb_extended(&s.mirrored_x(), HandRole::Left)
        );
        prop_assert_eq!(
            is_thumb_extended(&s, HandRole::Left),
            is_thumb_extended(&s.mirrored_x(), HandRole::Right)
        );
    }

    #[test]
    fn left_away_and_right_toward_share_thumb_rule(s in any_snapshot()) {
        let tip_left_of_mcp = s[idx::THUMB_TIP].x < s[idx::THUMB_MCP].x;
        if is_palm_away(&s, HandRole::Left) {
            prop_assert_eq!(is_thumb_extended(&s, HandRole::Left), tip_left_of_mcp);
        }
        if !is_palm_away(&s, HandRole::Right) {
            prop_assert_eq!(is_thumb_extended(&s, HandRole::Right), tip_left_of_mcp);
        }
    }

    #[test]
    fn sleeping_resolution_only_reports_rock(b in any_builder(), role in any_role()) {
        let s = b.build();
        let signal = resolve_snapshot(&s, role, ResolveMode::WakeOnly);
        prop_assert!(signal == Signal::Rock || signal == Signal::None);
        prop_assert_eq!(signal == Signal::Rock, is_rock(&s, role));
    }

    #[test]
    fn translation_does_not_change_the_signal(b in any_builder()) {
        let here = resolve_snapshot(&b.build(), HandRole::Right, ResolveMode::Full);
        let there = resolve_snapshot(&b.shifted(0.05).build(), HandRole::Right, ResolveMode::Full);
        prop_assert_eq!(here, there);
    }
}

#[test]
fn c_shape_resolves_to_b_under_priority_order() {
    let c = HandBuilder::c_shape();
    assert!(LETTER_PRIORITY[2].matches(&c, HandRole::Right));
    assert_eq!(
        resolve_snapshot(&c, HandRole::Right, ResolveMode::Full),
        Signal::Letter(Letter::B)
    );
}
