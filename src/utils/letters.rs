use rand::Rng;

/// The alphabet puzzles are built from. Candidate words are normalized to
/// this set before placement; filler cells draw from it uniformly.
pub const ALPHABET: [char; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S',
    'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Pick a uniformly random letter for an unused grid cell.
pub fn random_letter(rng: &mut impl Rng) -> char {
    ALPHABET[rng.random_range(0..ALPHABET.len())]
}

/// Normalize a candidate word for placement and answer matching:
/// uppercased, surrounding whitespace removed.
pub fn normalize(word: &str) -> String {
    word.trim().to_uppercase()
}
