//! Chat digest of checks missing a severity tag.
//!
//! Builds a Slack block-kit message: a header linking to the untagged-checks
//! view, a divider, and one section per check with its failure count,
//! description, compatibility and topics.

use fleet_health_core::Check;
use serde_json::{json, Value};

/// Default base URL for check links.
pub const DEFAULT_CHECKS_URL: &str = "https://k2.kolide.com/1401/checks";

/// Build the message payload for `checks`.
///
/// `checks_url` is the base for per-check links (`{checks_url}/{id}`) and the
/// filtered overview (`{checks_url}/active?tags[]=untagged`).
pub fn incomplete_checks_message(checks: &[Check], checks_url: &str) -> Value {
    let checks_url = checks_url.trim_end_matches('/');

    let mut blocks = vec![
        json!({
            "type": "section",
            "text": {
                "type": "mrkdwn",
                "text": format!(
                    "The following <{checks_url}/active?tags%5B%5D=untagged|checks> are missing tags:"
                ),
            },
        }),
        json!({ "type": "divider" }),
    ];

    blocks.extend(checks.iter().map(|check| {
        json!({
            "type": "section",
            "text": {
                "type": "mrkdwn",
                "text": check_summary(check, checks_url),
            },
        })
    }));

    json!({ "blocks": blocks })
}

/// One mrkdwn section describing `check`.
fn check_summary(check: &Check, checks_url: &str) -> String {
    format!(
        "*<{checks_url}/{id}|{name}>* ({count} failure{plural})\n{description}\n\n_Compatibility_: {compatibility}\n_Topics_: {topics}",
        id = check.id,
        name = check.name,
        count = check.failing_device_count,
        plural = if check.failing_device_count == 1 { "" } else { "s" },
        description = check.description,
        compatibility = join_or_na(&check.compatibility),
        topics = join_or_na(&check.topics),
    )
}

fn join_or_na(values: &[String]) -> String {
    if values.is_empty() {
        "n/a".to_string()
    } else {
        values.join(", ")
    }
}
