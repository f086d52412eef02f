//! Shared test utilities

#![allow(dead_code)]

mod temp_repo;

pub use fake_oracle::FakeOracle;
pub use temp_repo::TempGitRepo;

/// Graph for the standard stack scenario
///
/// ```text
/// m0 - m1                 main
///  \     \
///   o1    a1 - b1 - c1    feature-a, feature-b, feature-c
///   old-merged
/// ```
///
/// `old-merged` diverges from `feature-c` at `m0`, which is on `main`.
/// `feature-c` is checked out.
pub fn standard_stack() -> FakeOracle {
    FakeOracle::new()
        .commit("m0", &[])
        .commit("m1", &["m0"])
        .commit("o1", &["m0"])
        .commit("a1", &["m1"])
        .commit("b1", &["a1"])
        .commit("c1", &["b1"])
        .branch("main", "m1")
        .branch("old-merged", "o1")
        .branch("feature-a", "a1")
        .branch("feature-b", "b1")
        .branch("feature-c", "c1")
        .checkout("feature-c")
}

/// A chain of `n` branches `b0..b{n-1}` stacked on `main`, with the last checked out
pub fn long_chain(n: usize) -> FakeOracle {
    let mut oracle = FakeOracle::new().commit("m0", &[]).branch("main", "m0");
    let mut parent = "m0".to_string();
    for i in 0..n {
        let commit = format!("c{i}");
        oracle = oracle
            .commit(&commit, &[parent.as_str()])
            .branch(&format!("b{i}"), &commit);
        parent = commit;
    }
    oracle.checkout(&format!("b{}", n - 1))
}

/// Owned string list helper
pub fn refs(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| (*n).to_string()).collect()
}
