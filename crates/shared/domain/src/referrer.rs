//! Referrer resolution state machine.
//!
//! A page view walks `Idle -> Resolving -> {Resolved, Failed}` exactly once.
//! The primary account lookup alone decides between `Resolved` and `Failed`;
//! the 3K outcome only changes which name is displayed and whether a notice
//! explains the fallback.

use serde::{Deserialize, Serialize};

use crate::account::ReferrerAccount;
use crate::constants::{
    HANDOFF_PLACEHOLDER, MSG_LOAD_FAILED, MSG_REFERRER_NOT_FOUND, MSG_THREE_K_NO_RECORD,
    MSG_THREE_K_UNAVAILABLE,
};
use crate::three_k::ThreeKUser;

/// Why the primary account lookup failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryFailure {
    /// No account carries the referrer id
    NotFound,
    /// The lookup failed with a classified status code
    Status(u16),
    /// The cause could not be classified
    Unclassified,
}

impl PrimaryFailure {
    /// Human-readable message shown in the failed state.
    pub fn message(&self) -> String {
        match self {
            PrimaryFailure::NotFound => MSG_REFERRER_NOT_FOUND.to_string(),
            PrimaryFailure::Status(code) => format!("HTTP error! status: {}", code),
            PrimaryFailure::Unclassified => MSG_LOAD_FAILED.to_string(),
        }
    }
}

/// Settled result of the 3K directory lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreeKOutcome {
    Found(ThreeKUser),
    Missing,
    Unavailable,
}

/// Where the displayed name came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum NameSource {
    ThreeK,
    Primary,
}

/// Explains why the 3K override was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum NameNotice {
    /// The 3K directory has no record for the referrer
    NoRecord,
    /// The 3K directory could not be queried
    Unavailable,
}

impl NameNotice {
    pub fn message(&self) -> &'static str {
        match self {
            NameNotice::NoRecord => MSG_THREE_K_NO_RECORD,
            NameNotice::Unavailable => MSG_THREE_K_UNAVAILABLE,
        }
    }
}

/// Merged referrer record shown on a resolved page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferrerDisplay {
    pub referrer_id: String,
    pub email: String,
    pub name: String,
    pub token_id: Option<String>,
    pub name_source: NameSource,
    pub notice: Option<NameNotice>,
}

impl ReferrerDisplay {
    /// Merge the primary record with the 3K outcome.
    pub fn merge(referrer_id: &str, primary: ReferrerAccount, three_k: &ThreeKOutcome) -> Self {
        let override_name = match three_k {
            ThreeKOutcome::Found(user) => user.display_name().map(str::to_string),
            _ => None,
        };

        let notice = match three_k {
            ThreeKOutcome::Found(_) => None,
            ThreeKOutcome::Missing => Some(NameNotice::NoRecord),
            ThreeKOutcome::Unavailable => Some(NameNotice::Unavailable),
        };

        let (name, name_source) = match override_name {
            Some(name) => (name, NameSource::ThreeK),
            None => (primary.name, NameSource::Primary),
        };

        Self {
            referrer_id: referrer_id.to_string(),
            email: primary.email,
            name,
            token_id: primary.token_id,
            name_source,
            notice,
        }
    }
}

/// Payload handed to the confirmation step.
///
/// Field names are the keys the confirmation step reads from session storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MintingHandoff {
    /// Referrer id
    #[serde(rename = "var1")]
    pub referrer_id: String,
    /// Referrer email
    #[serde(rename = "var2")]
    pub email: String,
    /// Resolved referrer name
    #[serde(rename = "var3")]
    pub name: String,
    /// Referrer token id
    #[serde(rename = "var4")]
    pub token_id: String,
}

impl From<&ReferrerDisplay> for MintingHandoff {
    fn from(display: &ReferrerDisplay) -> Self {
        Self {
            referrer_id: or_placeholder(Some(&display.referrer_id)),
            email: or_placeholder(Some(&display.email)),
            name: or_placeholder(Some(&display.name)),
            token_id: or_placeholder(display.token_id.as_ref()),
        }
    }
}

fn or_placeholder(value: Option<&String>) -> String {
    value
        .filter(|v| !v.is_empty())
        .cloned()
        .unwrap_or_else(|| HANDOFF_PLACEHOLDER.to_string())
}

/// States of one resolution flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    Resolving { referrer_id: String },
    Resolved(ReferrerDisplay),
    Failed { referrer_id: String, failure: PrimaryFailure },
}

/// One page view's resolution flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferrerFlow {
    state: FlowState,
}

impl Default for ReferrerFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferrerFlow {
    pub fn new() -> Self {
        Self {
            state: FlowState::Idle,
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    /// Start resolving once the referrer id is known.
    ///
    /// Returns `false` and stays put when the id is blank or the flow has
    /// already left `Idle`.
    pub fn begin(&mut self, referrer_id: &str) -> bool {
        let referrer_id = referrer_id.trim();
        if referrer_id.is_empty() || self.state != FlowState::Idle {
            return false;
        }

        self.state = FlowState::Resolving {
            referrer_id: referrer_id.to_string(),
        };
        true
    }

    /// Settle the flow once both lookups have completed.
    ///
    /// Returns `false` when the flow is not `Resolving`.
    pub fn settle(
        &mut self,
        primary: Result<ReferrerAccount, PrimaryFailure>,
        three_k: ThreeKOutcome,
    ) -> bool {
        let FlowState::Resolving { referrer_id } = &self.state else {
            return false;
        };
        let referrer_id = referrer_id.clone();

        self.state = match primary {
            Ok(account) => {
                FlowState::Resolved(ReferrerDisplay::merge(&referrer_id, account, &three_k))
            }
            Err(failure) => FlowState::Failed {
                referrer_id,
                failure,
            },
        };
        true
    }

    /// The forward action; only available once resolved.
    pub fn proceed(&self) -> Option<MintingHandoff> {
        match &self.state {
            FlowState::Resolved(display) => Some(MintingHandoff::from(display)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERRER: &str = "0x1234567890abcdef";

    fn primary() -> ReferrerAccount {
        ReferrerAccount {
            user_id: REFERRER.to_string(),
            name: "Bob".to_string(),
            email: "bob@example.com".to_string(),
            token_id: Some("88".to_string()),
        }
    }

    fn three_k(name: Option<&str>) -> ThreeKOutcome {
        ThreeKOutcome::Found(ThreeKUser {
            user_id: REFERRER.to_string(),
            name: name.map(str::to_string),
            email: Some("alice@3k.example".to_string()),
            token_id: Some("99".to_string()),
        })
    }

    fn settled(
        primary: Result<ReferrerAccount, PrimaryFailure>,
        outcome: ThreeKOutcome,
    ) -> ReferrerFlow {
        let mut flow = ReferrerFlow::new();
        assert!(flow.begin(REFERRER));
        assert!(flow.settle(primary, outcome));
        flow
    }

    fn display(flow: &ReferrerFlow) -> &ReferrerDisplay {
        match flow.state() {
            FlowState::Resolved(display) => display,
            other => panic!("expected resolved, got {:?}", other),
        }
    }

    #[test]
    fn test_three_k_name_overrides_primary() {
        let flow = settled(Ok(primary()), three_k(Some("Alice")));
        let shown = display(&flow);

        assert_eq!(shown.name, "Alice");
        assert_eq!(shown.name_source, NameSource::ThreeK);
        assert_eq!(shown.notice, None);
        // email and token id never come from 3K
        assert_eq!(shown.email, "bob@example.com");
        assert_eq!(shown.token_id.as_deref(), Some("88"));
    }

    #[test]
    fn test_three_k_miss_falls_back_with_notice() {
        let flow = settled(Ok(primary()), ThreeKOutcome::Missing);
        let shown = display(&flow);

        assert_eq!(shown.name, "Bob");
        assert_eq!(shown.name_source, NameSource::Primary);
        assert_eq!(shown.notice, Some(NameNotice::NoRecord));
    }

    #[test]
    fn test_three_k_error_falls_back_with_notice() {
        let flow = settled(Ok(primary()), ThreeKOutcome::Unavailable);
        let shown = display(&flow);

        assert_eq!(shown.name, "Bob");
        assert_eq!(shown.notice, Some(NameNotice::Unavailable));
        assert_ne!(NameNotice::Unavailable.message(), NameNotice::NoRecord.message());
    }

    #[test]
    fn test_three_k_record_without_name() {
        let flow = settled(Ok(primary()), three_k(Some("")));
        let shown = display(&flow);

        assert_eq!(shown.name, "Bob");
        assert_eq!(shown.name_source, NameSource::Primary);
        assert_eq!(shown.notice, None);
    }

    #[test]
    fn test_primary_not_found_fails_regardless_of_three_k() {
        let outcomes = [
            three_k(Some("Alice")),
            ThreeKOutcome::Missing,
            ThreeKOutcome::Unavailable,
        ];
        for outcome in outcomes {
            let flow = settled(Err(PrimaryFailure::NotFound), outcome);

            assert_eq!(
                flow.state(),
                &FlowState::Failed {
                    referrer_id: REFERRER.to_string(),
                    failure: PrimaryFailure::NotFound,
                }
            );
            assert!(flow.proceed().is_none());
        }
    }

    #[test]
    fn test_failure_messages() {
        assert_eq!(PrimaryFailure::NotFound.message(), MSG_REFERRER_NOT_FOUND);
        assert_eq!(PrimaryFailure::Status(500).message(), "HTTP error! status: 500");
        assert_eq!(PrimaryFailure::Unclassified.message(), MSG_LOAD_FAILED);
    }

    #[test]
    fn test_blank_referrer_stays_idle() {
        let mut flow = ReferrerFlow::new();
        assert!(!flow.begin("   "));
        assert_eq!(flow.state(), &FlowState::Idle);
        assert!(!flow.settle(Ok(primary()), ThreeKOutcome::Missing));
        assert_eq!(flow.state(), &FlowState::Idle);
    }

    #[test]
    fn test_no_second_attempt_in_same_flow() {
        let mut flow = settled(Err(PrimaryFailure::Status(500)), ThreeKOutcome::Missing);

        assert!(!flow.begin("0xother"));
        assert!(!flow.settle(Ok(primary()), ThreeKOutcome::Missing));
        assert!(matches!(flow.state(), FlowState::Failed { .. }));
    }

    #[test]
    fn test_handoff_uses_resolved_name() {
        let flow = settled(Ok(primary()), three_k(Some("Alice")));
        let handoff = flow.proceed().unwrap();

        assert_eq!(
            handoff,
            MintingHandoff {
                referrer_id: REFERRER.to_string(),
                email: "bob@example.com".to_string(),
                name: "Alice".to_string(),
                token_id: "88".to_string(),
            }
        );
    }

    #[test]
    fn test_handoff_substitutes_placeholder() {
        let mut bare = primary();
        bare.name = String::new();
        bare.email = String::new();
        bare.token_id = None;

        let flow = settled(Ok(bare), ThreeKOutcome::Unavailable);
        let json = serde_json::to_value(flow.proceed().unwrap()).unwrap();

        assert_eq!(json["var1"], REFERRER);
        assert_eq!(json["var2"], "N/A");
        assert_eq!(json["var3"], "N/A");
        assert_eq!(json["var4"], "N/A");
    }

    #[test]
    fn test_proceed_unavailable_while_resolving() {
        let mut flow = ReferrerFlow::new();
        assert!(flow.proceed().is_none());
        flow.begin(REFERRER);
        assert!(flow.proceed().is_none());
    }
}
