use std::str::FromStr;
use std::sync::OnceLock;

/// What `with_txn` does with a transaction whose closure returned `Ok`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnPolicy {
    /// Commit on success (production behavior)
    CommitOnOk,
    /// Roll back even on success, for tests that must leave no rows behind
    RollbackOnOk,
}

impl FromStr for TxnPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "commit" | "commit_on_ok" => Ok(Self::CommitOnOk),
            "rollback" | "rollback_on_ok" => Ok(Self::RollbackOnOk),
            other => Err(format!("unknown txn policy '{other}' (expected commit | rollback)")),
        }
    }
}

static POLICY: OnceLock<TxnPolicy> = OnceLock::new();

/// Current process-wide policy, `CommitOnOk` until one is set.
pub fn current() -> TxnPolicy {
    POLICY.get().copied().unwrap_or(TxnPolicy::CommitOnOk)
}

/// Set the policy for the process. Only the first call takes effect.
pub fn set_txn_policy(policy: TxnPolicy) {
    let _ = POLICY.set(policy);
}
