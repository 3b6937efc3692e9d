use sha2::{Digest, Sha256};

use super::PROOF_PREFIX;

/// Check the puzzle predicate: SHA-256 of the two proofs' decimal
/// representations concatenated (no separator) must start with
/// [`PROOF_PREFIX`].
pub fn check(last_proof: u64, proof: u64) -> bool {
    let guess = format!("{last_proof}{proof}");
    let mut hasher = Sha256::new();
    hasher.update(guess.as_bytes());
    let digest = hex::encode(hasher.finalize());
    digest.starts_with(PROOF_PREFIX)
}

/// Find the smallest proof satisfying [`check`] against `last_proof` by
/// exhaustive ascending search. CPU-bound with no upper bound; callers
/// decide where this runs (see the mining handler).
pub fn solve(last_proof: u64) -> u64 {
    let mut proof = 0;
    while !check(last_proof, proof) {
        proof += 1;
    }
    proof
}

#[cfg(test)]
mod tests {
    use super::{check, solve};

    #[test]
    fn known_solution_passes_check() {
        assert!(check(100, 35293));
        assert!(!check(100, 0));
        assert!(!check(1, 1));
    }

    #[test]
    fn solve_finds_smallest_solution() {
        let proof = solve(100);
        assert_eq!(proof, 35293);
        assert!((0..proof).all(|p| !check(100, p)));
    }

    #[test]
    fn solutions_chain_forward() {
        // Each solve is seeded by the previous proof, same as mining does.
        assert_eq!(solve(35293), 35089);
    }
}
