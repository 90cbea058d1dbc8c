//! Properties checked against freshly built boards.
use crate::catalogs::Catalog;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use scratch_core::{
    BOARD_SIZE, Board, GameResult, MAX_PER_CATEGORY, PlaySession, PlayState, WIN_COUNT,
    build_board, detect_triple, verify_board,
};

/// One iteration of a scenario; `Err` carries a human-readable violation.
pub type Check = fn(&Catalog, &mut ChaCha20Rng) -> Result<(), String>;

#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    pub key: &'static str,
    pub description: &'static str,
    pub check: Check,
}

pub const SCENARIOS: [Scenario; 6] = [
    Scenario {
        key: "winning-board",
        description: "winning results produce exactly one triple of the prize's value",
        check: winning_board,
    },
    Scenario {
        key: "losing-board",
        description: "losing results show no category more than twice",
        check: losing_board,
    },
    Scenario {
        key: "board-shape",
        description: "boards have nine cells with ids 0..9",
        check: board_shape,
    },
    Scenario {
        key: "local-detection",
        description: "the grid alone agrees with the server result",
        check: local_detection,
    },
    Scenario {
        key: "session-flow",
        description: "a full play session completes and celebrates correctly",
        check: session_flow,
    },
    Scenario {
        key: "determinism",
        description: "the same seed always yields the same board",
        check: determinism,
    },
];

#[must_use]
pub fn find(key: &str) -> Option<Scenario> {
    SCENARIOS.iter().copied().find(|s| s.key == key)
}

/// Scenario keys named in `keys`; `all` expands to every scenario.
#[must_use]
pub fn expand(keys: &[String]) -> Vec<String> {
    if keys.iter().any(|k| k == "all") {
        return SCENARIOS.iter().map(|s| s.key.to_string()).collect();
    }
    keys.to_vec()
}

fn random_result(catalog: &Catalog, rng: &mut ChaCha20Rng) -> GameResult {
    if rng.gen_bool(0.5) {
        let index = rng.gen_range(0..catalog.prizes.len());
        GameResult::winning(catalog.prizes[index].clone())
    } else {
        GameResult::losing()
    }
}

fn winning_board(catalog: &Catalog, rng: &mut ChaCha20Rng) -> Result<(), String> {
    let index = rng.gen_range(0..catalog.prizes.len());
    let prize = catalog.prizes[index].clone();
    let expected = prize.display_cents().unwrap_or(0);
    let board = build_board(&GameResult::winning(prize), &catalog.prizes, rng);
    let report = verify_board(&GameResult::winning(catalog.prizes[index].clone()), &board)
        .map_err(|e| e.to_string())?;
    let count = board.count_value(expected);
    if count < WIN_COUNT {
        return Err(format!("only {count} cells carry the prize value {expected}"));
    }
    if report.value_cents != Some(expected) {
        return Err(format!(
            "triple carries {:?}, expected {expected}",
            report.value_cents
        ));
    }
    Ok(())
}

fn losing_board(catalog: &Catalog, rng: &mut ChaCha20Rng) -> Result<(), String> {
    let result = GameResult::losing();
    let board = build_board(&result, &catalog.prizes, rng);
    verify_board(&result, &board).map_err(|e| e.to_string())?;
    match board
        .category_counts()
        .into_iter()
        .find(|(_, n)| *n > MAX_PER_CATEGORY)
    {
        Some((category, n)) => Err(format!("{category} appears {n} times on a losing board")),
        None => Ok(()),
    }
}

fn board_shape(catalog: &Catalog, rng: &mut ChaCha20Rng) -> Result<(), String> {
    let board = build_board(&random_result(catalog, rng), &catalog.prizes, rng);
    if board.len() != BOARD_SIZE {
        return Err(format!("board has {} cells", board.len()));
    }
    let ids_in_order = board
        .items()
        .iter()
        .enumerate()
        .all(|(i, item)| usize::from(item.id) == i);
    if !ids_in_order {
        return Err(String::from("cell ids are not 0..9 in order"));
    }
    if board.items().iter().any(|item| item.icon.is_empty()) {
        return Err(String::from("a cell has no icon"));
    }
    Ok(())
}

fn local_detection(catalog: &Catalog, rng: &mut ChaCha20Rng) -> Result<(), String> {
    if !catalog.has_distinct_categories() {
        return Ok(());
    }
    let result = random_result(catalog, rng);
    let board = build_board(&result, &catalog.prizes, rng);
    let report = detect_triple(&board);
    if report.won == result.is_winner {
        Ok(())
    } else {
        Err(format!(
            "grid reads won={} but server said {}",
            report.won, result.is_winner
        ))
    }
}

fn session_flow(catalog: &Catalog, rng: &mut ChaCha20Rng) -> Result<(), String> {
    let result = random_result(catalog, rng);
    let winner = result.is_winner;
    let mut session = PlaySession::new();
    session.request_play().map_err(|e| e.to_string())?;
    session
        .resolve(result, &catalog.prizes, rng)
        .map_err(|e| e.to_string())?;
    for cell in 0..BOARD_SIZE - 1 {
        if session.reveal(cell).map_err(|e| e.to_string())? {
            return Err(format!("board completed early at cell {cell}"));
        }
    }
    if !session.reveal(BOARD_SIZE - 1).map_err(|e| e.to_string())? {
        return Err(String::from("last reveal did not complete the board"));
    }
    if session.state() != PlayState::Completed {
        return Err(format!("session ended in {}", session.state().label()));
    }
    if !session.take_balance_refresh() {
        return Err(String::from("completion did not request a balance refresh"));
    }
    if let Some(mismatch) = session.mismatch() {
        return Err(mismatch.to_string());
    }
    let celebrated = session.celebration().is_some_and(|r| r.won);
    if catalog.has_distinct_categories() && celebrated != winner {
        return Err(format!("celebration {celebrated} for winner={winner}"));
    }
    Ok(())
}

fn determinism(catalog: &Catalog, rng: &mut ChaCha20Rng) -> Result<(), String> {
    let seed: u64 = rng.r#gen();
    let result = random_result(catalog, rng);
    let build = || -> Board {
        build_board(
            &result,
            &catalog.prizes,
            &mut ChaCha20Rng::seed_from_u64(seed),
        )
    };
    if build() == build() {
        Ok(())
    } else {
        Err(format!("seed {seed} produced two different boards"))
    }
}
