use nebula_sha256::Hasher;

fn digest_with_lanes(lanes: usize, data: &[u8]) -> [u8; 32] {
    let mut hasher = Hasher::with_lanes(lanes);
    hasher.update(data);
    hasher.finalize()
}

// -------------------------------------------------------
// Multi-engine equivalence (spec §8 property 4)
// -------------------------------------------------------

#[test]
fn empty_message_agrees_across_lane_counts() {
    let single = digest_with_lanes(1, b"");
    for lanes in [2usize, 4, 8] {
        assert_eq!(digest_with_lanes(lanes, b""), single, "lanes={lanes}");
    }
}

#[test]
fn single_block_message_agrees_across_lane_counts() {
    let data = b"abc";
    let single = digest_with_lanes(1, data);
    for lanes in [2usize, 4, 8] {
        assert_eq!(digest_with_lanes(lanes, data), single, "lanes={lanes}");
    }
}

#[test]
fn multi_block_message_agrees_across_lane_counts() {
    let data: Vec<u8> = (0..10_000u32).map(|i| (i % 256) as u8).collect();
    let single = digest_with_lanes(1, &data);
    for lanes in [2usize, 4, 8] {
        assert_eq!(digest_with_lanes(lanes, &data), single, "lanes={lanes}");
    }
}

#[test]
fn lane_count_exceeding_block_count_still_agrees() {
    // 16 lanes but only a couple of blocks worth of input: most lanes
    // never get dispatched a block at all.
    let data = vec![0u8; 100];
    let single = digest_with_lanes(1, &data);
    assert_eq!(digest_with_lanes(16, &data), single);
}

#[test]
fn million_byte_message_agrees_for_eight_lanes() {
    let data = vec![b'a'; 1_000_000];
    let single = digest_with_lanes(1, &data);
    assert_eq!(digest_with_lanes(8, &data), single);
}
