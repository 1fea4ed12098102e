use crate::models::ContractAward;
use anyhow::{Context, Result};
use log::info;
use regex::{Regex, RegexBuilder};
use reqwest::Client;

const MAX_FEED_ITEMS: usize = 4;
const MAX_AWARDS: usize = 6;
const AWARD_NOTE: &str = "DoD daily awards";

// Approximates "X was awarded $NNN (million|billion)" in award summaries.
const AWARD_PATTERN: &str = r"([A-Z][A-Za-z0-9&\.\- ]+(?:, [A-Z][A-Za-z\.\- ]+)*?)\s*(?:, [A-Z]{2})?\s*(?:has been awarded|was awarded)\s*\$([\d,]+(?:\.\d+)?)\s*(billion|million)?";

/// Best-effort scrape of the DoD daily contracts RSS feed. Vendor names and
/// amounts appear in item summaries; anything the pattern misses is skipped.
pub async fn fetch_contract_awards(http: &Client, feed_url: &str) -> Result<Vec<ContractAward>> {
    let body = http
        .get(feed_url)
        .send()
        .await
        .with_context(|| format!("GET {} failed", feed_url))?
        .error_for_status()
        .with_context(|| format!("GET {} returned error", feed_url))?
        .text()
        .await
        .context("failed to read contracts feed body")?;

    let awards = parse_feed_awards(&body, MAX_AWARDS)?;
    info!("Extracted {} contract award(s) from the feed", awards.len());
    Ok(awards)
}

/// Fixed anchor entries appended after whatever the feed produced, so the
/// contracts panel is never empty.
pub fn anchor_awards() -> Vec<ContractAward> {
    vec![
        ContractAward {
            entity: "Lockheed Martin".to_string(),
            value_usd: 540_000_000,
            note: "JASSM production lot (placeholder)".to_string(),
        },
        ContractAward {
            entity: "Raytheon".to_string(),
            value_usd: 220_000_000,
            note: "Patriot spares IDIQ (placeholder)".to_string(),
        },
    ]
}

fn parse_feed_awards(feed: &str, limit: usize) -> Result<Vec<ContractAward>> {
    let award_re = RegexBuilder::new(AWARD_PATTERN)
        .case_insensitive(true)
        .build()
        .context("invalid award pattern")?;
    let tag_re = Regex::new(r"<[^>]+>").context("invalid tag pattern")?;

    let mut awards = Vec::new();
    for description in item_descriptions(feed)?.into_iter().take(MAX_FEED_ITEMS) {
        let text = strip_markup(&tag_re, &description);
        for capture in award_re.captures_iter(&text) {
            let entity = capture[1].trim().to_string();
            let amount: f64 = match capture[2].replace(',', "").parse() {
                Ok(value) => value,
                Err(_) => continue,
            };
            let value_usd = match capture.get(3).map(|m| m.as_str().to_lowercase()) {
                Some(scale) if scale == "billion" => (amount * 1_000_000_000.0) as i64,
                Some(scale) if scale == "million" => (amount * 1_000_000.0) as i64,
                _ => amount as i64,
            };
            awards.push(ContractAward {
                entity,
                value_usd,
                note: AWARD_NOTE.to_string(),
            });
            if awards.len() >= limit {
                return Ok(awards);
            }
        }
    }
    Ok(awards)
}

/// Pulls the description (or summary) out of each `<item>` block. RSS 2.0
/// also carries a channel-level `<description>`, which must not count against
/// the item budget.
fn item_descriptions(feed: &str) -> Result<Vec<String>> {
    let item_re = RegexBuilder::new(r"<item[\s>].*?</item>")
        .dot_matches_new_line(true)
        .case_insensitive(true)
        .build()
        .context("invalid item pattern")?;
    let description_re = RegexBuilder::new(r"<(description|summary)>(.*?)</(?:description|summary)>")
        .dot_matches_new_line(true)
        .case_insensitive(true)
        .build()
        .context("invalid description pattern")?;

    Ok(item_re
        .find_iter(feed)
        .filter_map(|item| {
            description_re
                .captures(item.as_str())
                .map(|capture| capture[2].to_string())
        })
        .collect())
}

/// Unwraps CDATA, decodes the common entities, and replaces tags with spaces.
fn strip_markup(tag_re: &Regex, raw: &str) -> String {
    let mut text = raw.trim().to_string();
    if let Some(inner) = text
        .strip_prefix("<![CDATA[")
        .and_then(|rest| rest.strip_suffix("]]>"))
    {
        text = inner.to_string();
    }
    text = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&");

    tag_re.replace_all(&text, " ").into_owned()
}
