//! Reveal-grid construction.
//!
//! The server decides every play. This module only arranges nine cells so the
//! grid shows that decision: a winning play gets exactly one triple carrying the
//! prize value, a losing play never shows three of anything.
use crate::category::{Category, DUMMY_COUNT};
use crate::prize::{GameResult, Prize};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;
use thiserror::Error;

/// Cells on a reveal grid (3×3).
pub const BOARD_SIZE: usize = 9;
/// Matching cells that make a win.
pub const WIN_COUNT: usize = 3;
/// Most cells any non-winning category may occupy.
pub const MAX_PER_CATEGORY: usize = 2;
/// Random draws attempted per filler slot before the deterministic fallback.
pub const FILLER_RETRIES: usize = 20;

/// One cell of the reveal grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScratchItem {
    pub id: u8,
    pub category: Category,
    pub value_cents: i64,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Tile {
    category: Category,
    value_cents: i64,
    icon: String,
}

type Tiles = SmallVec<[Tile; BOARD_SIZE]>;

/// A freshly arranged grid. Empty when the catalog was empty, otherwise nine cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    items: Vec<ScratchItem>,
}

impl Board {
    fn from_tiles(tiles: Tiles) -> Self {
        let items = tiles
            .into_iter()
            .enumerate()
            .map(|(index, tile)| ScratchItem {
                id: u8::try_from(index).unwrap_or(u8::MAX),
                category: tile.category,
                value_cents: tile.value_cents,
                icon: tile.icon,
            })
            .collect();
        Self { items }
    }

    #[must_use]
    pub fn items(&self) -> &[ScratchItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ScratchItem> {
        self.items.get(index)
    }

    /// Occurrences of each category on the grid.
    #[must_use]
    pub fn category_counts(&self) -> BTreeMap<Category, usize> {
        let mut counts = BTreeMap::new();
        for item in &self.items {
            *counts.entry(item.category).or_insert(0) += 1;
        }
        counts
    }

    #[must_use]
    pub fn count_of(&self, category: Category) -> usize {
        self.items
            .iter()
            .filter(|item| item.category == category)
            .count()
    }

    /// Cells carrying exactly `value_cents`.
    #[must_use]
    pub fn count_value(&self, value_cents: i64) -> usize {
        self.items
            .iter()
            .filter(|item| item.value_cents == value_cents)
            .count()
    }
}

/// Arrange a reveal grid for `result` using the card's prize `catalog`.
///
/// Returns an empty board when the catalog is empty. Any other input yields
/// nine cells in random order; the outcome class always follows `result`.
pub fn build_board<R: Rng + ?Sized>(result: &GameResult, catalog: &[Prize], rng: &mut R) -> Board {
    if catalog.is_empty() {
        return Board::default();
    }
    let tiles = match result.winning_prize() {
        Some(prize) => winning_tiles(result, prize, catalog, rng),
        None => losing_tiles(catalog, rng),
    };
    Board::from_tiles(tiles)
}

fn icon_for(category: Category, image_url: &str) -> String {
    if image_url.trim().is_empty() {
        category.icon_path()
    } else {
        image_url.to_string()
    }
}

fn dummy_tile(category: Category) -> Tile {
    Tile {
        category,
        value_cents: 0,
        icon: category.icon_path(),
    }
}

fn dummy_tiles() -> Vec<Tile> {
    Category::DUMMIES.iter().copied().map(dummy_tile).collect()
}

/// One tile per distinct category in the catalog, taken from the first prize
/// mapped onto that category.
fn catalog_tiles(catalog: &[Prize]) -> Vec<Tile> {
    let mut tiles: Vec<Tile> = Vec::new();
    for (index, prize) in catalog.iter().enumerate() {
        let category = Category::for_catalog_index(index);
        if tiles.iter().any(|tile| tile.category == category) {
            continue;
        }
        tiles.push(Tile {
            category,
            value_cents: prize.display_cents().unwrap_or(0),
            icon: icon_for(category, &prize.image_url),
        });
    }
    tiles
}

fn under_cap(counts: &BTreeMap<Category, usize>, category: Category) -> bool {
    counts.get(&category).copied().unwrap_or(0) < MAX_PER_CATEGORY
}

fn draw_under_cap<'a, R: Rng + ?Sized>(
    pool: &'a [Tile],
    counts: &BTreeMap<Category, usize>,
    rng: &mut R,
) -> Option<&'a Tile> {
    if pool.is_empty() {
        return None;
    }
    for _ in 0..FILLER_RETRIES {
        let candidate = &pool[rng.gen_range(0..pool.len())];
        if under_cap(counts, candidate.category) {
            return Some(candidate);
        }
    }
    None
}

fn first_under_cap<'a>(pool: &'a [Tile], counts: &BTreeMap<Category, usize>) -> Option<&'a Tile> {
    pool.iter().find(|tile| under_cap(counts, tile.category))
}

fn winning_tiles<R: Rng + ?Sized>(
    result: &GameResult,
    prize: &Prize,
    catalog: &[Prize],
    rng: &mut R,
) -> Tiles {
    let category = catalog
        .iter()
        .position(|entry| entry.id == prize.id)
        .map_or(Category::TIERS[0], Category::for_catalog_index);
    let winner = Tile {
        category,
        value_cents: result.winning_cents().unwrap_or(0),
        icon: icon_for(category, &prize.image_url),
    };

    let mut tiles: Tiles = std::iter::repeat_n(winner, WIN_COUNT).collect();
    let others: Vec<Tile> = catalog_tiles(catalog)
        .into_iter()
        .filter(|tile| tile.category != category)
        .collect();
    let dummies = dummy_tiles();
    let mut counts: BTreeMap<Category, usize> = BTreeMap::new();

    while tiles.len() < BOARD_SIZE {
        let pick = draw_under_cap(&others, &counts, rng)
            .or_else(|| first_under_cap(&others, &counts))
            .or_else(|| first_under_cap(&dummies, &counts));
        // Dummies alone hold 10 slots, more than the 6 fillers ever need.
        let Some(tile) = pick else { break };
        *counts.entry(tile.category).or_insert(0) += 1;
        tiles.push(tile.clone());
    }

    tiles.shuffle(rng);
    tiles
}

fn losing_tiles<R: Rng + ?Sized>(catalog: &[Prize], rng: &mut R) -> Tiles {
    let mut real = catalog_tiles(catalog);
    real.shuffle(rng);

    let pool_size = real.len() + DUMMY_COUNT;
    let per_real = BOARD_SIZE.div_ceil(pool_size).min(MAX_PER_CATEGORY);

    let mut tiles: Tiles = SmallVec::new();
    'fill: for tile in &real {
        for _ in 0..per_real {
            if tiles.len() == BOARD_SIZE {
                break 'fill;
            }
            tiles.push(tile.clone());
        }
    }
    let missing = BOARD_SIZE - tiles.len();
    tiles.extend(
        Category::DUMMIES
            .iter()
            .copied()
            .cycle()
            .take(missing)
            .map(dummy_tile),
    );

    if has_triple(&tiles) {
        log::debug!("losing pattern produced a triple; re-deriving with capped round-robin");
        tiles = capped_round_robin(&real);
    }

    tiles.shuffle(rng);
    tiles
}

/// Fill the grid by taking one tile per category per pass, never more than
/// [`MAX_PER_CATEGORY`] passes. Real categories go first, dummies after.
fn capped_round_robin(real: &[Tile]) -> Tiles {
    let pool: Vec<Tile> = real.iter().cloned().chain(dummy_tiles()).collect();
    let mut tiles: Tiles = SmallVec::new();
    for _ in 0..MAX_PER_CATEGORY {
        for tile in &pool {
            if tiles.len() == BOARD_SIZE {
                return tiles;
            }
            tiles.push(tile.clone());
        }
    }
    tiles
}

fn has_triple(tiles: &[Tile]) -> bool {
    let mut counts: BTreeMap<Category, usize> = BTreeMap::new();
    for tile in tiles {
        let count = counts.entry(tile.category).or_insert(0);
        *count += 1;
        if *count >= WIN_COUNT {
            return true;
        }
    }
    false
}

/// What the revealed grid shows on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripleReport {
    pub won: bool,
    pub category: Option<Category>,
    pub value_cents: Option<i64>,
}

/// Scan a grid for a category shown three or more times.
///
/// Drives celebratory UI only; the server result stays authoritative.
#[must_use]
pub fn detect_triple(board: &Board) -> TripleReport {
    let counts = board.category_counts();
    board
        .items()
        .iter()
        .find(|item| counts.get(&item.category).copied().unwrap_or(0) >= WIN_COUNT)
        .map_or_else(TripleReport::default, |item| TripleReport {
            won: true,
            category: Some(item.category),
            value_cents: Some(item.value_cents),
        })
}

/// Ways a built grid can disagree with the server result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardMismatch {
    #[error("board has {0} cells, expected 9")]
    Size(usize),
    #[error("server declared a win but the board shows no triple")]
    MissingTriple,
    #[error("server declared a loss but the board shows three {0}")]
    UnexpectedTriple(Category),
    #[error("board shows a second triple of {0}")]
    ExtraTriple(Category),
    #[error("winning triple carries {found} cents, expected {expected}")]
    WrongValue { expected: i64, found: i64 },
}

/// Check a grid against the authoritative result.
///
/// # Errors
///
/// Returns the first [`BoardMismatch`] found. A mismatch is a rendering bug;
/// callers report it and keep showing the server's outcome.
pub fn verify_board(result: &GameResult, board: &Board) -> Result<TripleReport, BoardMismatch> {
    if board.len() != BOARD_SIZE {
        return Err(BoardMismatch::Size(board.len()));
    }
    let report = detect_triple(board);
    let triples: Vec<Category> = board
        .category_counts()
        .into_iter()
        .filter(|(_, count)| *count >= WIN_COUNT)
        .map(|(category, _)| category)
        .collect();

    match (result.winning_cents(), report.category) {
        (Some(_), None) => Err(BoardMismatch::MissingTriple),
        (None, Some(category)) => Err(BoardMismatch::UnexpectedTriple(category)),
        (None, None) => Ok(report),
        (Some(expected), Some(category)) => {
            if let Some(extra) = triples.into_iter().find(|c| *c != category) {
                return Err(BoardMismatch::ExtraTriple(extra));
            }
            let found = report.value_cents.unwrap_or(0);
            if found == expected {
                Ok(report)
            } else {
                Err(BoardMismatch::WrongValue { expected, found })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn two_prize_catalog() -> Vec<Prize> {
        vec![Prize::money("p1", "50"), Prize::money("p2", "10")]
    }

    fn max_count(board: &Board) -> usize {
        board.category_counts().values().copied().max().unwrap_or(0)
    }

    #[test]
    fn empty_catalog_builds_nothing() {
        let mut rng = SmallRng::seed_from_u64(1);
        let win = GameResult::winning(Prize::money("p1", "50"));
        assert!(build_board(&win, &[], &mut rng).is_empty());
        assert!(build_board(&GameResult::losing(), &[], &mut rng).is_empty());
    }

    #[test]
    fn win_example_has_one_triple_of_fifty() {
        let catalog = two_prize_catalog();
        let result = GameResult::winning(catalog[0].clone());
        for seed in 0..200 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let board = build_board(&result, &catalog, &mut rng);
            assert_eq!(board.len(), BOARD_SIZE);
            assert_eq!(board.count_value(5_000), 3, "seed {seed}");
            assert!(board.count_value(1_000) <= 2, "seed {seed}");
            assert_eq!(board.count_of(Category::Diamond), 3);
            assert!(verify_board(&result, &board).is_ok(), "seed {seed}");
        }
    }

    #[test]
    fn single_category_loss_leans_on_dummies() {
        let catalog = vec![Prize::money("p1", "50")];
        for seed in 0..200 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let board = build_board(&GameResult::losing(), &catalog, &mut rng);
            assert_eq!(board.len(), BOARD_SIZE);
            assert!(board.count_value(5_000) <= 2, "seed {seed}");
            assert!(max_count(&board) <= MAX_PER_CATEGORY, "seed {seed}");
            assert!(!detect_triple(&board).won);
        }
    }

    #[test]
    fn unknown_prize_falls_back_to_first_category() {
        let catalog = two_prize_catalog();
        let mut stranger = Prize::money("ghost", "75");
        stranger.image_url = String::from("https://cdn.example/ghost.png");
        let result = GameResult::winning(stranger);
        let mut rng = SmallRng::seed_from_u64(9);
        let board = build_board(&result, &catalog, &mut rng);
        assert_eq!(board.count_of(Category::Diamond), 3);
        assert_eq!(board.count_value(7_500), 3);
        let report = verify_board(&result, &board).unwrap();
        assert_eq!(report.category, Some(Category::Diamond));
        assert!(
            board
                .items()
                .iter()
                .filter(|item| item.value_cents == 7_500)
                .all(|item| item.icon == "https://cdn.example/ghost.png")
        );
    }

    #[test]
    fn lone_winner_is_padded_with_capped_dummies() {
        let catalog = vec![Prize::money("only", "20")];
        let result = GameResult::winning(catalog[0].clone());
        let mut rng = SmallRng::seed_from_u64(3);
        let board = build_board(&result, &catalog, &mut rng);
        assert_eq!(board.len(), BOARD_SIZE);
        let counts = board.category_counts();
        assert_eq!(counts.get(&Category::Diamond), Some(&3));
        for dummy in Category::DUMMIES {
            assert!(counts.get(&dummy).copied().unwrap_or(0) <= MAX_PER_CATEGORY);
        }
        assert_eq!(board.count_value(0), 6);
    }

    #[test]
    fn redemption_value_is_used_when_value_missing() {
        let mut product = Prize::money("tv", "0");
        product.kind = crate::prize::PrizeKind::Product;
        product.value = None;
        product.redemption_value = Some(String::from("399.99"));
        let catalog = vec![product.clone(), Prize::money("p2", "1")];
        let result = GameResult::winning(product);
        let mut rng = SmallRng::seed_from_u64(11);
        let board = build_board(&result, &catalog, &mut rng);
        assert_eq!(board.count_value(39_999), 3);
    }

    #[test]
    fn wrapped_catalog_keeps_caps() {
        let catalog: Vec<Prize> = (0..13)
            .map(|i| Prize::money(&format!("p{i}"), &format!("{}", i + 1)))
            .collect();
        let result = GameResult::winning(catalog[11].clone());
        for seed in 0..100 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let board = build_board(&result, &catalog, &mut rng);
            let counts = board.category_counts();
            assert_eq!(counts.get(&Category::Diamond), Some(&3), "seed {seed}");
            assert!(
                counts
                    .iter()
                    .filter(|(c, _)| **c != Category::Diamond)
                    .all(|(_, n)| *n <= MAX_PER_CATEGORY)
            );
            assert_eq!(board.count_value(1_200), 3, "seed {seed}");
        }
    }

    #[test]
    fn capped_draw_gives_up_after_retries() {
        let pool = vec![dummy_tile(Category::Lemon)];
        let mut counts = BTreeMap::new();
        counts.insert(Category::Lemon, MAX_PER_CATEGORY);
        let mut rng = SmallRng::seed_from_u64(5);
        assert!(draw_under_cap(&pool, &counts, &mut rng).is_none());
        assert!(first_under_cap(&pool, &counts).is_none());
        assert!(draw_under_cap(&[], &BTreeMap::new(), &mut rng).is_none());
    }

    #[test]
    fn round_robin_fallback_never_triples() {
        let tiles = capped_round_robin(&[]);
        assert_eq!(tiles.len(), BOARD_SIZE);
        assert!(!has_triple(&tiles));

        let real = catalog_tiles(&two_prize_catalog());
        let tiles = capped_round_robin(&real);
        assert_eq!(tiles.len(), BOARD_SIZE);
        assert!(!has_triple(&tiles));
    }

    #[test]
    fn ids_follow_display_order() {
        let mut rng = SmallRng::seed_from_u64(2);
        let board = build_board(&GameResult::losing(), &two_prize_catalog(), &mut rng);
        for (index, item) in board.items().iter().enumerate() {
            assert_eq!(usize::from(item.id), index);
        }
    }

    #[test]
    fn verify_board_flags_each_mismatch() {
        let catalog = two_prize_catalog();
        let win = GameResult::winning(catalog[0].clone());
        let mut rng = SmallRng::seed_from_u64(4);
        let winning_board = build_board(&win, &catalog, &mut rng);
        let losing_board = build_board(&GameResult::losing(), &catalog, &mut rng);

        assert_eq!(
            verify_board(&win, &losing_board),
            Err(BoardMismatch::MissingTriple)
        );
        assert_eq!(
            verify_board(&GameResult::losing(), &winning_board),
            Err(BoardMismatch::UnexpectedTriple(Category::Diamond))
        );
        assert_eq!(
            verify_board(&win, &Board::default()),
            Err(BoardMismatch::Size(0))
        );

        let cheaper = GameResult::winning(Prize::money("p1", "49"));
        assert_eq!(
            verify_board(&cheaper, &winning_board),
            Err(BoardMismatch::WrongValue {
                expected: 4_900,
                found: 5_000
            })
        );
    }

    #[test]
    fn detect_triple_reports_value_of_the_triple() {
        let catalog = two_prize_catalog();
        let mut rng = SmallRng::seed_from_u64(8);
        let board = build_board(&GameResult::winning(catalog[1].clone()), &catalog, &mut rng);
        let report = detect_triple(&board);
        assert!(report.won);
        assert_eq!(report.category, Some(Category::Crown));
        assert_eq!(report.value_cents, Some(1_000));
    }

    #[test]
    fn arrangements_vary_across_seeds() {
        let catalog = two_prize_catalog();
        let result = GameResult::winning(catalog[0].clone());
        let layouts: std::collections::BTreeSet<Vec<Category>> = (0..20)
            .map(|seed| {
                let mut rng = SmallRng::seed_from_u64(seed);
                build_board(&result, &catalog, &mut rng)
                    .items()
                    .iter()
                    .map(|item| item.category)
                    .collect()
            })
            .collect();
        assert!(layouts.len() > 1);
    }
}
