use crate::builder::CollisionPolicy;
use crate::diff::DiffOptions;

/// Per-matcher verification options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VerifyOptions {
    /// Also fail when available objects were not expected
    pub check_extra: bool,
    pub collision_policy: CollisionPolicy,
}

impl VerifyOptions {
    pub fn with_check_extra(mut self, check_extra: bool) -> Self {
        self.check_extra = check_extra;
        self
    }

    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }

    pub(crate) fn diff_options(&self) -> DiffOptions {
        DiffOptions {
            check_extra: self.check_extra,
        }
    }
}
