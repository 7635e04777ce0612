//! Behaviour of a whole session: roster, lottery and groups together.

use std::collections::HashSet;

use lucky_draw::*;

fn fast_lottery(allow_repeats: bool) -> Lottery {
    Lottery::new(LotterySettings {
        allow_repeats,
        animation_frames: 2,
        ..LotterySettings::DEFAULT_SETTINGS
    })
}

fn roster_of(n: usize) -> Roster {
    let mut r = Roster::new();
    r.ingest_names((0..n).map(|i| format!("Person {}", i)));
    r
}

fn ids(ps: &[&Participant]) -> HashSet<ParticipantId> {
    ps.iter().map(|p| p.id).collect()
}

#[test]
fn no_repeat_draws_shrink_the_pool() {
    let _ = env_logger::builder().is_test(true).try_init();
    let roster = roster_of(12);
    let mut lottery = fast_lottery(false);
    let mut rng = SeededRng::from_seed(2024);
    for n in 1..=12 {
        lottery
            .draw(roster.participants(), &mut rng, |_| {})
            .unwrap();
        let pool = lottery.remaining_pool(roster.participants());
        assert_eq!(pool.len(), 12 - n);
        assert_eq!(lottery.history().len(), n);
        let history_ids: HashSet<ParticipantId> = lottery.history().iter().map(|p| p.id).collect();
        assert_eq!(history_ids.len(), n);
        assert!(ids(&pool).is_disjoint(&history_ids));
    }
    assert_eq!(
        lottery.draw(roster.participants(), &mut rng, |_| {}),
        Err(DrawError::PoolExhausted)
    );
}

#[test]
fn repeats_keep_the_full_roster() {
    let roster = roster_of(2);
    let mut lottery = fast_lottery(true);
    let mut rng = SystemRng;
    let mut consecutive_repeat = false;
    let mut previous: Option<ParticipantId> = None;
    for _ in 0..200 {
        let w = lottery
            .draw(roster.participants(), &mut rng, |_| {})
            .unwrap();
        assert_eq!(lottery.remaining_pool(roster.participants()).len(), 2);
        if previous == Some(w.id) {
            consecutive_repeat = true;
        }
        previous = Some(w.id);
    }
    assert_eq!(lottery.history().len(), 200);
    assert!(consecutive_repeat);
}

#[test]
fn reset_undoes_all_draws() {
    let roster = roster_of(5);
    let mut lottery = fast_lottery(false);
    let mut rng = SeededRng::from_seed(8);
    for _ in 0..3 {
        lottery
            .draw(roster.participants(), &mut rng, |_| {})
            .unwrap();
    }
    lottery.reset();
    assert!(lottery.history().is_empty());
    let pool = lottery.remaining_pool(roster.participants());
    assert_eq!(ids(&pool), ids(&roster.participants().iter().collect::<Vec<_>>()));
}

#[test]
fn winners_are_uniform() {
    // The animation frames must not bias the outcome.
    let roster = roster_of(4);
    let mut rng = SystemRng;
    let mut wins: Vec<u32> = vec![0; 4];
    for _ in 0..4000 {
        let mut lottery = fast_lottery(false);
        let w = lottery
            .draw(roster.participants(), &mut rng, |_| {})
            .unwrap();
        let idx = roster
            .participants()
            .iter()
            .position(|p| p.id == w.id)
            .unwrap();
        wins[idx] += 1;
    }
    for count in wins.iter() {
        assert!((800..1200).contains(count), "{:?}", wins);
    }
}

#[test]
fn dedup_keeps_first_occurrences() {
    let mut roster = Roster::new();
    roster.ingest_text("Lin, Chen, Lin\nWang\nChen\nLin");
    let originals: Vec<Participant> = roster.participants().to_vec();
    let removed = roster.remove_duplicates();
    assert_eq!(removed, 3);
    let kept: Vec<&Participant> = roster.participants().iter().collect();
    assert_eq!(kept, vec![&originals[0], &originals[1], &originals[3]]);
    assert!(!roster.duplicates().has_duplicates);
}

#[test]
fn grouping_shuffles_every_time() {
    let roster = roster_of(10);
    let mut rng = SystemRng;
    let first = generate_groups(roster.participants(), 4, &mut rng).unwrap();
    let differs = (0..20).any(|_| {
        let other = generate_groups(roster.participants(), 4, &mut rng).unwrap();
        other != first
    });
    assert!(differs);
}

#[test]
fn grouping_does_not_touch_the_roster() {
    let roster = roster_of(7);
    let before = roster.clone();
    let mut rng = SeededRng::from_seed(3);
    let groups = generate_groups(roster.participants(), 3, &mut rng).unwrap();
    assert_eq!(roster, before);
    let sizes: Vec<usize> = groups.iter().map(|g| g.members.len()).collect();
    assert_eq!(sizes, vec![3, 3, 1]);
}

#[test]
fn file_and_text_ingestion_agree() {
    let mut from_text = Roster::new();
    from_text.ingest_text("Anna\nBob\nClara");
    let mut from_file = Roster::new();
    from_file
        .ingest_bytes(b"\xEF\xBB\xBFAnna,1\r\nBob,2\r\nClara,3\r\n")
        .unwrap();
    let names = |r: &Roster| -> Vec<String> {
        r.participants().iter().map(|p| p.name.clone()).collect()
    };
    assert_eq!(names(&from_text), names(&from_file));
}
