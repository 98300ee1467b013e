use secret_code::{Card, CardId, Feedback};

fn ids(values: &[u32]) -> Vec<CardId> {
    values.iter().map(|&v| CardId(v)).collect()
}

const A: u32 = 1;
const B: u32 = 2;
const C: u32 = 3;
const D: u32 = 4;

#[test]
fn test_swapped_middle_cards() {
    let feedback = Feedback::evaluate_ids(&ids(&[A, B, C, D]), &ids(&[A, C, B, D]));
    assert_eq!(feedback, Feedback::new(2, 2));
}

#[test]
fn test_total_miss() {
    let feedback = Feedback::evaluate_ids(&ids(&[A, B, C, D]), &ids(&[5, 6, 7, 8]));
    assert_eq!(feedback, Feedback::new(0, 0));
    assert_eq!(feedback.to_marker_string(), "-");
}

#[test]
fn test_exact_match() {
    let secret = ids(&[A, B, C, D]);
    let feedback = Feedback::evaluate_ids(&secret, &secret);
    assert_eq!(feedback, Feedback::new(4, 0));
    assert!(feedback.is_win(4));
}

#[test]
fn test_duplicates_in_secret() {
    let feedback = Feedback::evaluate_ids(&ids(&[A, A, B, C]), &ids(&[A, B, A, C]));
    assert_eq!(feedback.correct_position, 2);
    assert_eq!(feedback.correct_card_wrong_position, 2);
    assert_eq!(feedback.total_matches(), 4);
}

#[test]
fn test_repeated_guess_limited_by_secret() {
    // One A in the secret: only one of the three guessed As may count.
    let feedback = Feedback::evaluate_ids(&ids(&[B, A, C, D]), &ids(&[A, D, A, A]));
    assert_eq!(feedback, Feedback::new(0, 2));
}

#[test]
fn test_exact_match_consumes_before_displaced() {
    // The A in slot 0 is exact, so the extra A in slot 1 has nothing left to match.
    let feedback = Feedback::evaluate_ids(&ids(&[A, B, C, D]), &ids(&[A, A, D, C]));
    assert_eq!(feedback, Feedback::new(1, 2));
}

#[test]
fn test_all_displaced() {
    let feedback = Feedback::evaluate_ids(&ids(&[A, B, C, D]), &ids(&[D, C, B, A]));
    assert_eq!(feedback, Feedback::new(0, 4));
    assert!(!feedback.is_win(4));
}

#[test]
fn test_evaluate_cards_uses_ids_only() {
    let secret = vec![Card::correct(1, "2"), Card::correct(2, "3"), Card::correct(3, "5")];
    // Same ids, different text: still an exact match.
    let guess = vec![Card::correct(1, "dois"), Card::correct(3, "cinco"), Card::correct(2, "três")];
    assert_eq!(Feedback::evaluate(&secret, &guess), Feedback::new(1, 2));
}

#[test]
fn test_marker_string() {
    assert_eq!(Feedback::new(2, 1).to_marker_string(), "●●○");
    assert_eq!(Feedback::new(0, 3).to_marker_string(), "○○○");
}

#[test]
fn test_pattern_index_is_dense_and_unique() {
    let length = 4;
    let mut seen = vec![false; Feedback::num_patterns(length)];
    for exact in 0..=length {
        for displaced in 0..=(length - exact) {
            let idx = Feedback::new(exact, displaced).index(length);
            assert!(!seen[idx]);
            seen[idx] = true;
        }
    }
}

#[test]
fn test_display_in_portuguese() {
    assert_eq!(
        Feedback::new(1, 2).to_string(),
        "1 na posição certa, 2 na posição errada"
    );
}

#[test]
#[cfg(debug_assertions)]
#[should_panic]
fn test_unequal_lengths_panic_in_debug() {
    Feedback::evaluate_ids(&ids(&[A, B, C, D]), &ids(&[A, B, C]));
}
