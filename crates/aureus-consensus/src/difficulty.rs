use aureus_core::constants::{ADJUSTMENT_INTERVAL, MIN_DIFFICULTY, TARGET_BLOCK_TIME};
use aureus_core::Block;

/// Retarget difficulty after appending `chain`'s latest block (§4.3
/// "Difficulty retarget"). Applied after every appended block, not only at
/// interval boundaries.
///
/// Below `ADJUSTMENT_INTERVAL + 1` blocks, difficulty is left unchanged —
/// there is no fixed window to measure yet (§8 boundary: "First 10 blocks:
/// difficulty never adjusts below INITIAL_DIFFICULTY solely due to elapsed
/// time").
pub fn retarget(chain: &[Block], current_difficulty: u32) -> u32 {
    if chain.len() < ADJUSTMENT_INTERVAL + 1 {
        return current_difficulty;
    }
    let latest = &chain[chain.len() - 1];
    let window_start = &chain[chain.len() - 1 - ADJUSTMENT_INTERVAL];
    let actual = latest.timestamp - window_start.timestamp;
    let expected = ADJUSTMENT_INTERVAL as i64 * TARGET_BLOCK_TIME;

    if actual < expected / 2 {
        current_difficulty + 1
    } else if actual > expected * 2 && current_difficulty > MIN_DIFFICULTY {
        current_difficulty - 1
    } else {
        current_difficulty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aureus_core::constants::INITIAL_DIFFICULTY;

    fn block_at(height: u64, timestamp: i64) -> Block {
        let mut b = Block::genesis_unhashed(timestamp, INITIAL_DIFFICULTY);
        b.height = height;
        b
    }

    #[test]
    fn unchanged_below_adjustment_window() {
        let chain: Vec<Block> = (0..ADJUSTMENT_INTERVAL as u64).map(|h| block_at(h, h as i64 * 10)).collect();
        assert_eq!(retarget(&chain, INITIAL_DIFFICULTY), INITIAL_DIFFICULTY);
    }

    #[test]
    fn increases_when_blocks_come_too_fast() {
        // 11 blocks, 1 second apart: actual = 10s, expected = 100s, actual < expected/2.
        let chain: Vec<Block> = (0..=ADJUSTMENT_INTERVAL as u64).map(|h| block_at(h, h as i64)).collect();
        assert_eq!(retarget(&chain, INITIAL_DIFFICULTY), INITIAL_DIFFICULTY + 1);
    }

    #[test]
    fn decreases_when_blocks_come_too_slow() {
        // 11 blocks, 1000s apart: actual = 10000s, expected = 100s, actual > expected*2.
        let chain: Vec<Block> = (0..=ADJUSTMENT_INTERVAL as u64).map(|h| block_at(h, h as i64 * 1000)).collect();
        assert_eq!(retarget(&chain, INITIAL_DIFFICULTY), INITIAL_DIFFICULTY - 1);
    }

    #[test]
    fn never_drops_below_min_difficulty() {
        let chain: Vec<Block> = (0..=ADJUSTMENT_INTERVAL as u64).map(|h| block_at(h, h as i64 * 1000)).collect();
        assert_eq!(retarget(&chain, MIN_DIFFICULTY), MIN_DIFFICULTY);
    }

    #[test]
    fn unchanged_within_target_band() {
        // 11 blocks, 10s apart: actual == expected exactly.
        let chain: Vec<Block> = (0..=ADJUSTMENT_INTERVAL as u64).map(|h| block_at(h, h as i64 * 10)).collect();
        assert_eq!(retarget(&chain, INITIAL_DIFFICULTY), INITIAL_DIFFICULTY);
    }
}
