//! Integration tests for round generation: conservation, play-count balance, pairing rotation.

use court_rotation_web::{
    compute_stats, generate_round, ActivePlayer, CourtMatch, EngineConfig, PlayerId, Round,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn roster(n: u32) -> Vec<ActivePlayer> {
    (1..=n).map(|i| ActivePlayer::new(i, i)).collect()
}

fn ids(players: &[ActivePlayer]) -> Vec<PlayerId> {
    players.iter().map(|p| p.id).collect()
}

/// Play `rounds` rounds, feeding each generated round back as history.
fn simulate(players: &[ActivePlayer], courts: u32, rounds: usize, seed: u64) -> Vec<Round> {
    let config = EngineConfig::default();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut history = Vec::new();
    for no in 1..=rounds {
        let round = generate_round(players, courts, &history, &config, &mut rng)
            .unwrap()
            .into_round(no as u32);
        history.push(round);
    }
    history
}

fn play_spread(players: &[ActivePlayer], history: &[Round]) -> u32 {
    let stats = compute_stats(&ids(players), history, 5);
    let counts: Vec<u32> = stats.values().map(|s| s.played_count).collect();
    counts.iter().max().unwrap() - counts.iter().min().unwrap()
}

#[test]
fn every_player_is_placed_exactly_once() {
    for (n, courts) in [(4, 1), (5, 1), (9, 2), (12, 2), (13, 4), (17, 3)] {
        let players = roster(n);
        let history = simulate(&players, courts, 12, n as u64);
        for round in &history {
            let placed = round.player_ids();
            let unique: HashSet<PlayerId> = placed.iter().copied().collect();
            assert_eq!(placed.len(), n as usize, "round {}", round.round_no);
            let expected: HashSet<PlayerId> = ids(&players).into_iter().collect();
            assert_eq!(unique, expected);
            assert_eq!(round.courts.len() * 4 + round.rests.len(), n as usize);
            assert!(round.courts.len() <= courts as usize);
            for court in &round.courts {
                let on_court: HashSet<PlayerId> = court.players().into_iter().collect();
                assert_eq!(on_court.len(), 4);
            }
        }
    }
}

#[test]
fn courts_are_numbered_from_one() {
    let players = roster(12);
    let history = simulate(&players, 3, 1, 3);
    let numbers: Vec<u32> = history[0].courts.iter().map(|c| c.court_no).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[test]
fn eight_players_one_court_spread_stays_within_one() {
    let players = roster(8);
    let history = simulate(&players, 1, 20, 42);
    for r in 1..=history.len() {
        assert!(play_spread(&players, &history[..r]) <= 1, "after round {r}");
    }
    // 20 rounds * 4 slots / 8 players divides evenly
    assert_eq!(play_spread(&players, &history), 0);
}

#[test]
fn six_players_one_court_fifteen_rounds() {
    let players = roster(6);
    let history = simulate(&players, 1, 15, 7);
    assert!(play_spread(&players, &history) <= 1);
}

#[test]
fn ten_players_two_courts_twenty_rounds() {
    let players = roster(10);
    let history = simulate(&players, 2, 20, 11);
    assert!(play_spread(&players, &history) <= 1);
}

#[test]
fn spread_respects_theoretical_bound() {
    for (p, c, rounds) in [(5, 1, 12), (7, 1, 21), (9, 2, 17), (13, 3, 25), (12, 2, 9), (16, 3, 10)] {
        let players = roster(p);
        for seed in 0..3 {
            let history = simulate(&players, c, rounds, seed);
            for r in 1..=rounds {
                let slots = (c * 4).min(p / 4 * 4);
                let theoretical = if (r as u32 * slots) % p == 0 { 0 } else { 1 };
                let allowance = if p as f64 / (c * 4) as f64 > 1.5 { 1 } else { 0 };
                let spread = play_spread(&players, &history[..r]);
                assert!(
                    spread <= theoretical + allowance,
                    "{p} players, {c} courts, round {r}, seed {seed}: spread {spread}"
                );
            }
        }
    }
}

/// Partner of player 1 identifies the split of a four-player court.
fn partner_of_first(round: &Round) -> PlayerId {
    let court = &round.courts[0];
    let pair = if court.pair_a.contains(&1) { court.pair_a } else { court.pair_b };
    if pair[0] == 1 {
        pair[1]
    } else {
        pair[0]
    }
}

#[test]
fn four_players_cycle_through_three_pairings() {
    for seed in [0, 1, 99] {
        let players = roster(4);
        let history = simulate(&players, 1, 30, seed);
        let partners: Vec<PlayerId> = history.iter().map(partner_of_first).collect();

        assert!(history.iter().all(|r| r.courts.len() == 1 && r.rests.is_empty()));
        assert!(partners.iter().all(|p| [2, 3, 4].contains(p)));
        for i in 1..partners.len() {
            assert_ne!(partners[i], partners[i - 1], "repeat at round {}", i + 1);
        }
        for i in 3..partners.len() {
            assert_eq!(partners[i], partners[i - 3], "period broken at round {}", i + 1);
        }
        assert_eq!(&partners[..3], &[2, 3, 4]);
    }
}

#[test]
fn consecutive_rest_counts_and_resets() {
    let players = roster(5);
    let round = |no: u32, rest: PlayerId| {
        let on_court: Vec<PlayerId> = (1..=5).filter(|&i| i != rest).collect();
        Round::new(
            no,
            vec![CourtMatch::new(1, [on_court[0], on_court[1]], [on_court[2], on_court[3]])],
            vec![rest],
        )
    };
    // player 5 rests in rounds 3, 4, 5 and plays in round 6
    let mut history = vec![round(1, 1), round(2, 2), round(3, 5), round(4, 5), round(5, 5)];
    let at_five = compute_stats(&ids(&players), &history, 5);
    assert_eq!(at_five[&5].consec_rest, 3);
    assert_eq!(at_five[&5].rest_count, 3);

    history.push(round(6, 1));
    let at_six = compute_stats(&ids(&players), &history, 5);
    assert_eq!(at_six[&5].consec_rest, 0);
    assert_eq!(at_six[&1].consec_rest, 1);
}

#[test]
fn stats_replay_is_idempotent() {
    let players = roster(9);
    let history = simulate(&players, 2, 10, 5);
    assert_eq!(
        compute_stats(&ids(&players), &history, 5),
        compute_stats(&ids(&players), &history, 5)
    );
}

#[test]
fn three_players_all_rest() {
    let players = roster(3);
    for courts in [0, 1, 4] {
        let mut rng = StdRng::seed_from_u64(1);
        let round = generate_round(&players, courts, &[], &EngineConfig::default(), &mut rng).unwrap();
        assert!(round.courts.is_empty());
        assert_eq!(round.rests, vec![1, 2, 3]);
    }
}

#[test]
fn late_joiner_catches_up() {
    let mut players = roster(8);
    let mut history = simulate(&players, 1, 6, 3);
    players.push(ActivePlayer::new(9, 9));
    let config = EngineConfig::default();
    let mut rng = StdRng::seed_from_u64(4);
    let round = generate_round(&players, 1, &history, &config, &mut rng).unwrap();
    assert!(round.courts[0].contains(9));
    history.push(round.into_round(7));
    assert_eq!(history.len(), 7);
}
